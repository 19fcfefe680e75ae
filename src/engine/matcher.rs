use std::cmp::Reverse;

use crate::grammar::{Grammar, Production, Symbol};

// Every production whose right-hand side, read left to right, equals a
// contiguous suffix of the stack. Ranked longest right-hand side first;
// same-length candidates keep their declaration order. Epsilon
// productions would match any stack endlessly, so they are never
// proposed.
pub fn reduction_candidates<'g>(stack: &[&str], grammar: &'g Grammar) -> Vec<&'g Production> {
    let mut candidates = grammar.productions().iter()
        .filter(|production| !production.is_epsilon())
        .filter(|production| matches_suffix(&production.rhs, stack))
        .collect::<Vec<_>>();

    // Stable, so declaration order survives within a length
    candidates.sort_by_key(|production| Reverse(production.rhs.len()));

    return candidates;
}

fn matches_suffix(rhs: &[Symbol], stack: &[&str]) -> bool {
    if rhs.len() > stack.len() {
        return false;
    }

    let suffix = &stack[stack.len() - rhs.len()..];
    rhs.iter().zip(suffix).all(|(symbol, item)| symbol.text() == *item)
}
