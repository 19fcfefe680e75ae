/*
    This module is for storing grammars and answering questions
    about their symbols
*/

use std::collections::HashSet;
use std::fmt::Display;

use itertools::Itertools;

// Appended to every input line by the engine; rules may not use it
pub const END_MARKER: &str = "$";

// The base unit in a grammar rule
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn text(&self) -> &str {
        match self {
            Symbol::Terminal(text) => text,
            Symbol::Nonterminal(text) => text,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

// A single flattened rule: alternatives are split apart before these
// are built, so one production is one rewrite
#[derive(Debug, PartialEq, Clone)]
pub struct Production {
    pub lhs: String,
    pub rhs: Vec<Symbol>,
}

impl Production {
    // An empty right-hand side rewrites to nothing
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_epsilon() {
            write!(f, "{} -> ε", self.lhs)
        } else {
            write!(f, "{} -> {}", self.lhs, self.rhs.iter().join(" "))
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum GrammarError {
    // No productions were supplied, so there is no start symbol
    Empty,
    // A rule has a blank left-hand side
    EmptyLhs,
    // A requested start symbol is not defined by any rule
    UnknownStart(String),
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::Empty => write!(f, "Grammar has no rules"),
            GrammarError::EmptyLhs => write!(f, "Rule has a blank left-hand side"),
            GrammarError::UnknownStart(symbol) => write!(f, "Start symbol `{}` is not defined by any rule", symbol),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Grammar {
    start_symbol: String,
    productions: Vec<Production>,
    nonterminals: HashSet<String>,
}

impl Grammar {
    // Builds a grammar from ordered (lhs, alternatives) pairs, flattening
    // each alternative into its own production. A symbol is a nonterminal
    // exactly when some rule defines it; everything else is a terminal.
    // The first rule's left-hand side becomes the start symbol.
    pub fn from_rules(rules: Vec<(String, Vec<Vec<String>>)>) -> Result<Grammar, GrammarError> {
        let start_symbol = match rules.first() {
            Some((lhs, _)) => lhs.clone(),
            None => return Err(GrammarError::Empty),
        };

        if rules.iter().any(|(lhs, _)| lhs.is_empty()) {
            return Err(GrammarError::EmptyLhs);
        }

        let nonterminals: HashSet<String> = rules.iter().map(|(lhs, _)| lhs.clone()).collect();

        let productions = rules.into_iter()
            .flat_map(|(lhs, alternatives)| {
                alternatives.into_iter()
                    .map(move |alternative| (lhs.clone(), alternative))
            })
            .map(|(lhs, alternative)| Production {
                lhs,
                rhs: alternative.into_iter()
                    .map(|token| classify_with(&nonterminals, token))
                    .collect(),
            })
            .collect_vec();

        Ok(Grammar {
            start_symbol,
            productions,
            nonterminals,
        })
    }

    // Replaces the derived start symbol with one picked by the user
    pub fn with_start(self, start: &str) -> Result<Grammar, GrammarError> {
        if !self.nonterminals.contains(start) {
            return Err(GrammarError::UnknownStart(start.to_string()));
        }

        Ok(Grammar {
            start_symbol: start.to_string(),
            ..self
        })
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn is_nonterminal(&self, text: &str) -> bool {
        self.nonterminals.contains(text)
    }

    pub fn classify(&self, token: &str) -> Symbol {
        classify_with(&self.nonterminals, token.to_string())
    }
}

fn classify_with(nonterminals: &HashSet<String>, token: String) -> Symbol {
    if nonterminals.contains(&token) {
        Symbol::Nonterminal(token)
    } else {
        Symbol::Terminal(token)
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Start symbol: {}", self.start_symbol)?;
        write!(f, "{}", self.productions.iter().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(lhs: &str, alternatives: &[&[&str]]) -> (String, Vec<Vec<String>>) {
        (
            lhs.to_string(),
            alternatives.iter()
                .map(|alternative| alternative.iter().map(|s| s.to_string()).collect())
                .collect()
        )
    }

    #[test]
    fn classify_symbols() {
        let grammar = Grammar::from_rules(vec![
            rule("S", &[&["A", "b"]]),
            rule("A", &[&["a"], &[]])
        ]).unwrap();

        assert!(grammar.is_nonterminal("S"));
        assert!(grammar.is_nonterminal("A"));
        assert!(!grammar.is_nonterminal("a"));
        assert!(!grammar.is_nonterminal("b"));

        assert_eq!(grammar.classify("A"), Symbol::Nonterminal("A".to_string()));
        assert_eq!(grammar.classify("b"), Symbol::Terminal("b".to_string()));
        assert_eq!(grammar.classify("undefined"), Symbol::Terminal("undefined".to_string()));
    }

    #[test]
    fn flatten_alternatives_in_order() {
        let grammar = Grammar::from_rules(vec![
            rule("E", &[&["E", "+", "T"], &["T"]]),
            rule("T", &[&["id"]])
        ]).unwrap();

        let rendered = grammar.productions().iter()
            .map(Production::to_string)
            .collect::<Vec<_>>();
        assert_eq!(rendered, vec![
            "E -> E + T",
            "E -> T",
            "T -> id"
        ]);
    }

    #[test]
    fn start_symbol_is_first_lhs() {
        let grammar = Grammar::from_rules(vec![
            rule("Top", &[&["Second"]]),
            rule("Second", &[&["x"]])
        ]).unwrap();

        assert_eq!(grammar.start_symbol(), "Top");
    }

    #[test]
    fn repeated_lhs_accumulates() {
        let grammar = Grammar::from_rules(vec![
            rule("A", &[&["a"]]),
            rule("B", &[&["b"]]),
            rule("A", &[&["a", "a"]])
        ]).unwrap();

        assert_eq!(grammar.productions().len(), 3);
        assert_eq!(grammar.productions()[2].to_string(), "A -> a a");
        assert_eq!(grammar.start_symbol(), "A");
    }

    #[test]
    fn empty_grammar_is_an_error() {
        assert_eq!(Grammar::from_rules(Vec::new()), Err(GrammarError::Empty));
    }

    #[test]
    fn blank_lhs_is_an_error() {
        let result = Grammar::from_rules(vec![
            rule("S", &[&["a"]]),
            rule("", &[&["b"]])
        ]);

        assert_eq!(result, Err(GrammarError::EmptyLhs));
    }

    #[test]
    fn start_override() {
        let grammar = Grammar::from_rules(vec![
            rule("S", &[&["A"]]),
            rule("A", &[&["a"]])
        ]).unwrap();
        let grammar = grammar.with_start("A").unwrap();

        assert_eq!(grammar.start_symbol(), "A");
    }

    #[test]
    fn start_override_must_be_nonterminal() {
        let grammar = Grammar::from_rules(vec![
            rule("S", &[&["a"]])
        ]).unwrap();

        assert_eq!(grammar.with_start("a"), Err(GrammarError::UnknownStart("a".to_string())));
    }

    #[test]
    fn epsilon_production_display() {
        let grammar = Grammar::from_rules(vec![
            rule("A", &[&[]])
        ]).unwrap();

        assert!(grammar.productions()[0].is_epsilon());
        assert_eq!(grammar.productions()[0].to_string(), "A -> ε");
    }
}
