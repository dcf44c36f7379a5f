//! Capacity-bounded instruction buffer with single-shot backpatching.

use log::{error, trace};

use crate::model::{Instruction, MAX_CODE_LENGTH, OpCode, Program};

/// A jump whose target is not known yet.
///
/// Consumed by [`Emitter::backpatch`], so each placeholder is patched at
/// most once.
#[derive(Debug)]
#[must_use = "a placeholder jump must be backpatched"]
pub struct PatchSite {
    address: usize,
}

#[derive(Debug)]
pub struct Emitter {
    code: Vec<Instruction>,
    capacity: usize,
    unpatched: usize,
}

impl Emitter {
    pub fn new(capacity: usize) -> Self {
        Self {
            // The bound may be far larger than any real program.
            code: Vec::with_capacity(capacity.min(MAX_CODE_LENGTH)),
            capacity,
            unpatched: 0,
        }
    }

    /// Appends an instruction and returns its address.
    ///
    /// # Panics
    ///
    /// When the buffer is full. Running out of code space ends the whole
    /// compilation; it is not one of the generator's error codes.
    pub fn emit(&mut self, op: OpCode, r: i32, l: i32, m: i32) -> usize {
        if self.code.len() == self.capacity {
            error!(
                "MAX_CODE_LENGTH({}) reached, terminating code generator",
                self.capacity
            );
            panic!(
                "MAX_CODE_LENGTH({}) reached: emit is unsuccessful",
                self.capacity
            );
        }

        let address = self.code.len();
        let ins = Instruction::new(op, r, l, m);
        trace!("{address:04} {} {r} {l} {m}", op.mnemonic());
        self.code.push(ins);
        address
    }

    /// Emits a jump with a placeholder target of 0.
    pub fn emit_jump(&mut self, op: OpCode) -> PatchSite {
        debug_assert!(op.is_jump(), "{op:?} is not a jump");
        let address = self.emit(op, 0, 0, 0);
        self.unpatched += 1;
        PatchSite { address }
    }

    /// Points a placeholder jump at `target`.
    pub fn backpatch(&mut self, site: PatchSite, target: usize) {
        let ins = &mut self.code[site.address];
        trace!("patch {:04} {} -> {target:04}", site.address, ins.op.mnemonic());
        ins.m = target as i32;
        self.unpatched -= 1;
    }

    /// Address the next emitted instruction will get.
    pub fn emitted_count(&self) -> usize {
        self.code.len()
    }

    pub fn unpatched(&self) -> usize {
        self.unpatched
    }

    pub fn finish(self) -> Program {
        debug_assert_eq!(self.unpatched, 0, "jump left without a target");
        Program {
            instructions: self.code,
        }
    }
}
