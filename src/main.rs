mod cli;
mod engine;
mod error_handling;
mod grammar;
mod parser;
mod table;
mod tree;

use std::io::{self, BufRead, Write};
use std::process;

use clap::Parser;

use cli::Cli;
use engine::ParseOutcome;
use grammar::{Grammar, GrammarError};

fn main() {
    let cli = Cli::parse();

    let grammar = match parser::parse_file(&cli.file) {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            process::exit(1);
        }
    };

    let grammar = match apply_start_override(grammar, cli.start) {
        Ok(grammar) => grammar,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    };

    println!("--- Grammar ---");
    println!("{}", grammar);
    print_usage();

    run_session(&grammar);
}

fn apply_start_override(grammar: Grammar, start: Option<String>) -> Result<Grammar, GrammarError> {
    match start {
        Some(symbol) => grammar.with_start(&symbol),
        None => Ok(grammar)
    }
}

fn print_usage() {
    println!();
    println!("Separate tokens with spaces; the `$` end marker is appended automatically.");
    println!("Enter `exit` (or press Ctrl-D) to quit.");
}

fn run_session(grammar: &Grammar) {
    let mut lines = io::stdin().lock().lines();

    loop {
        print!("\ninput string: ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            // EOF or a broken stdin both end the session
            _ => break,
        };

        if line.trim() == "exit" {
            break;
        }

        let tokens = line.split_whitespace().map(str::to_string).collect::<Vec<_>>();
        report(&engine::parse(grammar, &tokens));
    }
}

fn report(outcome: &ParseOutcome) {
    println!();
    println!("{}", table::trace_table(&outcome.trace));
    println!("Result: {}", outcome.status);

    match &outcome.tree {
        Some(tree) => {
            println!();
            println!("--- Parse Tree ---");
            println!("{}", tree);
        }
        None => println!("No parse tree generated.")
    }
}
