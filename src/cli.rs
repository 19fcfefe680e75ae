use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// Start symbol (default: first rule in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>
}
