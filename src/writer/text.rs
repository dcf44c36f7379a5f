//! Plain-text renderings of emitted code and of the symbol table.

use std::io::{self, Write};

use crate::model::Program;
use crate::processor::symbol::{SymbolKind, SymbolTable};

/// Writes `op r l m` lines, in address order.
pub fn emit<W: Write>(program: &Program, out: &mut W) -> io::Result<()> {
    for ins in &program.instructions {
        writeln!(out, "{ins}")?;
    }
    Ok(())
}

/// Writes `addr MNEMONIC r l m` lines.
pub fn emit_listing<W: Write>(program: &Program, out: &mut W) -> io::Result<()> {
    for (addr, ins) in program.instructions.iter().enumerate() {
        writeln!(
            out,
            "{addr:4}  {:<9} {} {} {}",
            ins.op.mnemonic(),
            ins.r,
            ins.l,
            ins.m
        )?;
    }
    Ok(())
}

pub fn emit_symbols<W: Write>(symbols: &SymbolTable, out: &mut W) -> io::Result<()> {
    writeln!(out, "{:<12} {:<9} {:>5} {:>7}  scope", "name", "kind", "level", "value")?;
    for sym in symbols.iter() {
        let value = match sym.kind {
            SymbolKind::Const { value } => value,
            SymbolKind::Var { address } | SymbolKind::Proc { address } => address,
        };
        let scope = match sym.scope {
            Some(id) => symbols.get(id).name.as_str(),
            None => "global",
        };
        writeln!(
            out,
            "{:<12} {:<9} {:>5} {:>7}  {}",
            sym.name,
            sym.kind_name(),
            sym.level,
            value,
            scope
        )?;
    }
    Ok(())
}
