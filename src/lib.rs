pub mod cli;
pub mod loader;
pub mod logger;
pub mod model;
pub mod processor;
pub mod writer;

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, anyhow};
use clap::Parser;
use log::info;

use crate::model::Program;
use crate::processor::{CodeGenerator, GeneratorConfig};
use crate::writer::Format;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    logger::configure(args.verbose).map_err(|e| anyhow!(e))?;

    // 1. ── Load ───────────────────────────────────────────────────────
    let input = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Reading {}", args.input.display()))?;
    let tokens = if args.lexemes {
        loader::load_lexemes(&input)
    } else {
        loader::load_source(&input)
    }
    .with_context(|| format!("Loading {}", args.input.display()))?;

    // 2. ── Generate ───────────────────────────────────────────────────
    let config = GeneratorConfig {
        max_code_length: args.max_code,
    };
    let (program, symbols) = CodeGenerator::new(&tokens, &config)
        .generate_with_symbols()
        .with_context(|| format!("Generating code for {}", args.input.display()))?;
    info!("generated {} instructions", program.len());

    // 3. ── Write outputs ──────────────────────────────────────────────
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_program(&program, args.format, &mut out)?;
            out.flush()
                .with_context(|| format!("Writing {}", path.display()))?;
        }
        None => write_program(&program, args.format, &mut io::stdout().lock())?,
    }

    if args.symbols {
        writer::text::emit_symbols(&symbols, &mut io::stderr().lock())
            .with_context(|| "Writing symbol table")?;
    }

    Ok(())
}

fn write_program<W: Write>(program: &Program, format: Format, out: &mut W) -> anyhow::Result<()> {
    match format {
        Format::Code => writer::text::emit(program, out).with_context(|| "Writing code")?,
        Format::Listing => {
            writer::text::emit_listing(program, out).with_context(|| "Writing listing")?
        }
        Format::Json => writer::json::emit(program, out).with_context(|| "Writing JSON")?,
    }
    Ok(())
}
