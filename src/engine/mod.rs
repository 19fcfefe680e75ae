/*
    This module simulates shift-reduce parsing over a loaded grammar
*/

mod matcher;

use std::fmt::Display;

use itertools::Itertools;

use crate::grammar::{END_MARKER, Grammar, Production, Symbol};
use crate::tree::ParseTree;
use matcher::reduction_candidates;

// Hard bound on applied actions per attempt, so every parse terminates
pub const STEP_LIMIT: usize = 100;

#[derive(Debug, PartialEq, Clone)]
pub enum RejectReason {
    // Nothing left to shift and nothing on the stack reduces
    NoAction,
    // Two or more reductions of the same (longest) length matched;
    // carries the tied rules
    ReduceReduce(Vec<Production>),
    // The attempt ran past STEP_LIMIT without settling
    StepLimit,
}

impl Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::NoAction => write!(f, "no viable action"),
            RejectReason::ReduceReduce(_) => write!(f, "reduce-reduce conflict"),
            RejectReason::StepLimit => write!(f, "step limit exceeded"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum ParseStatus {
    Accepted,
    Rejected(RejectReason),
}

impl Display for ParseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseStatus::Accepted => write!(f, "Accepted"),
            ParseStatus::Rejected(reason) => write!(f, "Rejected ({})", reason),
        }
    }
}

// What one step did. The stack and input snapshots in the owning
// TraceStep are taken before the action applies.
#[derive(Debug, PartialEq, Clone)]
pub enum StepAction {
    Shift(String),
    Reduce {
        production: Production,
        // True when input remained, i.e. a shift was also on the table
        shift_available: bool,
    },
    Accept,
    Reject(RejectReason),
}

#[derive(Debug, PartialEq, Clone)]
pub struct TraceStep {
    pub step: usize,
    pub stack: Vec<String>,
    pub input: Vec<String>,
    pub action: StepAction,
}

#[derive(Debug, PartialEq)]
pub struct ParseOutcome {
    pub status: ParseStatus,
    pub trace: Vec<TraceStep>,
    pub tree: Option<ParseTree>,
}

// Per-attempt state. The stack holds tree nodes directly: each entry is
// both a grammar symbol and the sub-tree it roots, so the symbol stack
// and the tree stack cannot fall out of step.
struct ParseState {
    stack: Vec<ParseTree>,
    input: Vec<String>,
    cursor: usize,
    trace: Vec<TraceStep>,
}

impl ParseState {
    fn new(tokens: &[String]) -> Self {
        let mut input = tokens.to_vec();
        input.push(END_MARKER.to_string());

        ParseState {
            stack: Vec::new(),
            input,
            cursor: 0,
            trace: Vec::new(),
        }
    }

    fn stack_symbols(&self) -> Vec<&str> {
        self.stack.iter().map(|entry| entry.symbol.text()).collect()
    }

    fn next_token(&self) -> &str {
        &self.input[self.cursor]
    }

    fn can_shift(&self) -> bool {
        self.next_token() != END_MARKER
    }

    fn at_end_marker(&self) -> bool {
        self.cursor + 1 == self.input.len()
    }

    fn is_accepting(&self, grammar: &Grammar) -> bool {
        let start_on_top = match self.stack.as_slice() {
            [only] => only.symbol.text() == grammar.start_symbol(),
            _ => false,
        };

        start_on_top && self.at_end_marker()
    }

    fn record(&mut self, action: StepAction) {
        let step = self.trace.len() + 1;

        self.trace.push(TraceStep {
            step,
            stack: self.stack_symbols().iter().map(|s| s.to_string()).collect(),
            input: self.input[self.cursor..].to_vec(),
            action,
        });
    }

    fn steps(&self) -> usize {
        self.trace.len()
    }

    fn shift(&mut self, grammar: &Grammar) {
        let token = self.next_token().to_string();
        self.stack.push(ParseTree::leaf(grammar.classify(&token)));
        self.cursor += 1;
    }

    fn reduce(&mut self, production: &Production) {
        // The matcher only proposes productions whose rewrite is already
        // on top of the stack, so the split cannot underflow
        let fold_from = self.stack.len() - production.rhs.len();
        let children = self.stack.split_off(fold_from);

        self.stack.push(ParseTree::node(
            Symbol::Nonterminal(production.lhs.clone()),
            children,
        ));
    }
}

enum Action<'g> {
    Shift,
    Reduce(&'g Production),
    Reject(RejectReason),
}

// Decides what this step does, in fixed order: accept has already been
// ruled out, so shift only when nothing reduces, and otherwise reduce
// even if a shift is available too.
fn resolve_action<'g>(candidates: &[&'g Production], can_shift: bool) -> Action<'g> {
    if candidates.is_empty() {
        if can_shift {
            Action::Shift
        } else {
            Action::Reject(RejectReason::NoAction)
        }
    } else {
        match choose_reduction(candidates) {
            Ok(production) => Action::Reduce(production),
            Err(tied) => Action::Reject(RejectReason::ReduceReduce(tied)),
        }
    }
}

// Picks the candidate with the longest right-hand side. A tie at the
// longest length leaves no single rule to apply, which rejects the parse.
fn choose_reduction<'g>(candidates: &[&'g Production]) -> Result<&'g Production, Vec<Production>> {
    let longest = candidates.iter().copied()
        .max_set_by_key(|production| production.rhs.len());

    if longest.len() == 1 {
        Ok(longest[0])
    } else {
        Err(longest.into_iter().cloned().collect())
    }
}

// Runs one attempt to completion. Rejections are ordinary outcomes; the
// caller decides how to present them.
pub fn parse(grammar: &Grammar, tokens: &[String]) -> ParseOutcome {
    let mut state = ParseState::new(tokens);

    loop {
        if state.is_accepting(grammar) {
            state.record(StepAction::Accept);
            let tree = state.stack.pop();

            return ParseOutcome {
                status: ParseStatus::Accepted,
                trace: state.trace,
                tree,
            };
        }

        let stack_symbols = state.stack_symbols();
        let candidates = reduction_candidates(&stack_symbols, grammar);

        match resolve_action(&candidates, state.can_shift()) {
            Action::Shift => {
                state.record(StepAction::Shift(state.next_token().to_string()));
                state.shift(grammar);
            }
            Action::Reduce(production) => {
                state.record(StepAction::Reduce {
                    production: production.clone(),
                    shift_available: state.can_shift(),
                });
                state.reduce(production);
            }
            Action::Reject(reason) => {
                state.record(StepAction::Reject(reason.clone()));

                return ParseOutcome {
                    status: ParseStatus::Rejected(reason),
                    trace: state.trace,
                    tree: None,
                };
            }
        }

        if state.steps() >= STEP_LIMIT {
            let reason = RejectReason::StepLimit;
            state.record(StepAction::Reject(reason.clone()));

            return ParseOutcome {
                status: ParseStatus::Rejected(reason),
                trace: state.trace,
                tree: None,
            };
        }
    }
}
