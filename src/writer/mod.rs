//! Renders generated code for the outside world.
pub mod json;
pub mod text;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// `op r l m`, one instruction per line.
    #[default]
    Code,
    /// Addressed mnemonic listing.
    Listing,
    /// JSON document.
    Json,
}
