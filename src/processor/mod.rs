//! The functional core: tokens in, stack-machine code out.
//!
//! Parsing, scope checking and emission happen in one pass in
//! [`codegen::CodeGenerator`].
pub mod codegen;
pub mod cursor;
pub mod emitter;
pub mod error;
pub mod lexer;
pub mod symbol;
pub mod token;

pub use codegen::CodeGenerator;
pub use error::CodeGenError;
pub use token::Token;

use log::info;

use crate::model::{MAX_CODE_LENGTH, Program};

/// Knobs for a single compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Instruction capacity. Exceeding it aborts the process.
    pub max_code_length: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_code_length: MAX_CODE_LENGTH,
        }
    }
}

/// Generates code for a token sequence with a fresh compiler context.
pub fn generate(tokens: &[Token], config: &GeneratorConfig) -> Result<Program, CodeGenError> {
    info!(
        "generating code for {} tokens (capacity {})",
        tokens.len(),
        config.max_code_length
    );
    let program = CodeGenerator::new(tokens, config).generate()?;
    info!("emitted {} instructions", program.len());
    Ok(program)
}
