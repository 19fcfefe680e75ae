use crate::grammar::END_MARKER;
use super::CompileErrorType::ReservedSymbol;
use super::{CompileError, CompileErrors, FileResult, Rule};

fn get_rule_reserved_symbols(rule: &Rule) -> CompileErrors {
    // The left-hand side and every rewrite symbol are checked the same
    // way; the engine appends the marker itself, so a grammar mentioning
    // it would collide with the input sentinel
    std::iter::once(&rule.lhs)
        .chain(rule.alternatives.iter().flatten())
        .filter(|symbol| symbol.as_str() == END_MARKER)
        .map(|symbol| CompileError {
            location: rule.location.to_owned(),
            error: ReservedSymbol(symbol.to_owned())
        })
        .collect()
}

fn get_reserved_symbols(rules: &[Rule]) -> CompileErrors {
    // Collect the offending symbols in each rule, while flattening
    // into all the offenses in the ruleset
    rules.iter()
        .flat_map(get_rule_reserved_symbols)
        .collect()
}

pub fn verify_rules(rules: &[Rule]) -> FileResult<()> {
    let mut errors = Vec::new();

    errors.extend(get_reserved_symbols(rules).into_iter());

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}
