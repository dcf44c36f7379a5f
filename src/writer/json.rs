//! JSON rendering of emitted code.

use std::io::Write;

use anyhow::Result;

use crate::model::Program;

pub fn emit<W: Write>(program: &Program, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, program)?;
    writeln!(out)?;
    Ok(())
}
