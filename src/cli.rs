use clap::Parser;
use std::path::PathBuf;

use crate::model::MAX_CODE_LENGTH;
use crate::writer::Format;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input PL/0 program (or lexeme list with --lexemes)
    pub input: PathBuf,
    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Input holds numeric token codes instead of source text
    #[arg(long)]
    pub lexemes: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Code)]
    pub format: Format,
    /// Instruction capacity
    #[arg(long, default_value_t = MAX_CODE_LENGTH)]
    pub max_code: usize,
    /// Print the symbol table to stderr after a successful compilation
    #[arg(long)]
    pub symbols: bool,
    /// Log verbosity (-v warn, -vv info, -vvv debug, -vvvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
