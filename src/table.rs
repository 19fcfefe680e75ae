/*
    Renders a parse attempt's step trace as a grid table
*/

use itertools::Itertools;
use prettytable as pt;
use prettytable::cell;
use prettytable::row;

use crate::engine::{RejectReason, StepAction, TraceStep, STEP_LIMIT};
use crate::grammar::END_MARKER;

pub fn trace_table(trace: &[TraceStep]) -> pt::Table {
    let mut table = pt::Table::new();
    table.set_titles(row!["Step", "Stack", "Input", "Action", "Rule"]);

    for step in trace {
        let (action, rule) = describe_action(&step.action);
        table.add_row(row![
            step.step,
            stack_cell(&step.stack),
            step.input.join(" "),
            action,
            rule
        ]);
    }

    return table;
}

// The bottom-of-stack marker is presentation only; the engine's stack
// holds just the parsed symbols
fn stack_cell(stack: &[String]) -> String {
    std::iter::once(END_MARKER)
        .chain(stack.iter().map(String::as_str))
        .join(" ")
}

fn describe_action(action: &StepAction) -> (String, String) {
    match action {
        StepAction::Shift(token) =>
            ("Shift".to_string(), format!("Shift {}", token)),
        StepAction::Reduce { production, shift_available: false } =>
            ("Reduce".to_string(), production.to_string()),
        StepAction::Reduce { production, shift_available: true } =>
            ("Reduce (s/r conflict)".to_string(), format!("{} (reduce preferred)", production)),
        StepAction::Accept =>
            ("Accept".to_string(), String::new()),
        StepAction::Reject(reason) => describe_rejection(reason),
    }
}

fn describe_rejection(reason: &RejectReason) -> (String, String) {
    match reason {
        RejectReason::NoAction =>
            ("Reject".to_string(), "no viable action".to_string()),
        RejectReason::ReduceReduce(rules) => (
            "Reduce-reduce conflict".to_string(),
            format!("Rules: [{}]", rules.iter().join(", "))
        ),
        RejectReason::StepLimit =>
            ("Reject".to_string(), format!("over {} steps", STEP_LIMIT)),
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::{Production, Symbol};
    use super::*;

    fn production(lhs: &str, rhs: &[&str]) -> Production {
        Production {
            lhs: lhs.to_string(),
            rhs: rhs.iter().map(|s| Symbol::Terminal(s.to_string())).collect(),
        }
    }

    #[test]
    fn stack_cell_prepends_marker() {
        assert_eq!(stack_cell(&[]), "$");
        assert_eq!(stack_cell(&["E".to_string(), "+".to_string()]), "$ E +");
    }

    #[test]
    fn describe_shift() {
        let (action, rule) = describe_action(&StepAction::Shift("id".to_string()));

        assert_eq!(action, "Shift");
        assert_eq!(rule, "Shift id");
    }

    #[test]
    fn describe_plain_reduce() {
        let (action, rule) = describe_action(&StepAction::Reduce {
            production: production("T", &["id"]),
            shift_available: false,
        });

        assert_eq!(action, "Reduce");
        assert_eq!(rule, "T -> id");
    }

    #[test]
    fn describe_conflicted_reduce() {
        let (action, rule) = describe_action(&StepAction::Reduce {
            production: production("T", &["id"]),
            shift_available: true,
        });

        assert_eq!(action, "Reduce (s/r conflict)");
        assert_eq!(rule, "T -> id (reduce preferred)");
    }

    #[test]
    fn describe_reduce_reduce_rejection() {
        let tied = vec![
            production("A", &["x"]),
            production("B", &["x"])
        ];
        let (action, rule) = describe_action(&StepAction::Reject(RejectReason::ReduceReduce(tied)));

        assert_eq!(action, "Reduce-reduce conflict");
        assert_eq!(rule, "Rules: [A -> x, B -> x]");
    }

    #[test]
    fn table_has_a_row_per_step() {
        let trace = vec![
            TraceStep {
                step: 1,
                stack: Vec::new(),
                input: vec!["a".to_string(), "$".to_string()],
                action: StepAction::Shift("a".to_string()),
            },
            TraceStep {
                step: 2,
                stack: vec!["a".to_string()],
                input: vec!["$".to_string()],
                action: StepAction::Accept,
            },
        ];

        assert_eq!(trace_table(&trace).len(), 2);
    }
}
