/*
    This module parses grammar files
*/

mod lexer;
mod verifier;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::PathBuf;

use crate::grammar::{Grammar, GrammarError};
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;
use verifier::verify_rules;

#[derive(Debug)]
pub enum CompileErrorType {
    // A line which should contain a rule has no `->`
    MissingArrow,
    // An `->` showed up on the right-hand side of a rule
    UnexpectedArrow,
    // A rule line starts with something other than a plain symbol
    MissingLhs,
    // The end-of-input marker is reserved for the engine
    ReservedSymbol(String),
    // The rules read fine but do not form a usable grammar
    Grammar(GrammarError),
    // A full list of alternatives reached the alternative parser unsplit
    // This is a problem with shifty, not the grammar
    UnsplitAlternatives,
    // A blank line got too deep into the parser
    // This is a problem with shifty, not the grammar
    UnexpectedBlankLine,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::ReservedSymbol(a), CompileErrorType::ReservedSymbol(b)) => a == b,
            (CompileErrorType::Grammar(a), CompileErrorType::Grammar(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other)
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingArrow => write!(f, "Expected `->` after the rule's left-hand side"),
            CompileErrorType::UnexpectedArrow => write!(f, "Unexpected `->` encountered"),
            CompileErrorType::MissingLhs => write!(f, "Tried to define something other than a symbol"),
            CompileErrorType::ReservedSymbol(symbol) => write!(f, "`{}` is reserved as the end-of-input marker", symbol),
            CompileErrorType::Grammar(error) => write!(f, "{}", error),
            CompileErrorType::UnsplitAlternatives => write!(f, "Alternatives were not fully split (this is a problem with shifty, not the grammar)"),
            CompileErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in rule parser (this is a problem with shifty, not the grammar)"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> CompileError {
    CompileError {
        location: Location::file_level(file),
        error: CompileErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

// One rule line, still in raw text form; terminal/nonterminal
// classification happens when the grammar is assembled
#[derive(PartialEq, Debug)]
struct Rule {
    lhs: String,
    alternatives: Vec<Vec<String>>,
    location: Location
}

fn parse_alternative(tokens: &[Token]) -> Result<Vec<String>> {
    tokens.iter().map(|t| match t {
        Token::Arrow => Err(CompileErrorType::UnexpectedArrow),
        Token::Or => Err(CompileErrorType::UnsplitAlternatives),
        Token::Symbol(s) => Ok(s.clone())
    }).collect()
}

fn parse_alternatives(tokens: &[Token]) -> Result<Vec<Vec<String>>> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    // Try to get the symbol the rule defines. The match returns a result
    // which is then unwrapped with the ? operator
    let lhs = match tokens.first() {
        Some(Token::Symbol(s)) => Ok(s.clone()),
        Some(_) => Err(CompileErrorType::MissingLhs),
        None => Err(CompileErrorType::UnexpectedBlankLine)
    }?;

    if tokens.get(1) != Some(&Token::Arrow) {
        return Err(CompileErrorType::MissingArrow)
    }

    let alternatives = parse_alternatives(&tokens[2..])?;

    return Ok(Rule {
        lhs,
        alternatives,
        location
    });
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    parse_line(&lex_line(line), location.clone())
        .map_err(|error| CompileError { location, error })
}

fn is_rule_line(line: &String) -> bool {
    let line = line.trim_start();
    !line.is_empty() && !line.starts_with('#')
}

// Returns an iterator over the lines of a file, with the io errors wrapped
// in CompileError and enumerated
fn file_line_nums<'a>(file: File, path: &'a PathBuf) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    std::io::BufReader::new(file)
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.clone())))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

// Rules stay in declaration order: the first one names the start symbol,
// and the engine's tie-break ranks same-length reductions by it
fn grammar_from_rules(rules: Vec<Rule>, path: &PathBuf) -> FileResult<Grammar> {
    verify_rules(&rules)?;

    let raw_rules = rules.into_iter()
        .map(|rule| (rule.lhs, rule.alternatives))
        .collect_vec();

    Grammar::from_rules(raw_rules).map_err(|error| vec![CompileError {
        location: Location::file_level(path.clone()),
        error: CompileErrorType::Grammar(error)
    }])
}

pub fn parse_file(path: &PathBuf) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.clone())])?;
    let lines = file_line_nums(file, path);

    let parsed_lines = lines.map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location::at(path.clone(), num)))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition(LineResult::is_ok);
    if errors.len() > 0 {
        return Err(errors.into_iter().map(LineResult::unwrap_err).collect_vec());
    }
    let rules_unwrapped = rules.into_iter().map(LineResult::unwrap).collect_vec();

    return grammar_from_rules(rules_unwrapped, path);
}
