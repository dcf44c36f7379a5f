use std::fmt;

use serde::{Serialize, Serializer};

/// Default bound on the number of instructions a single compilation may emit.
pub const MAX_CODE_LENGTH: usize = 500;

/// Operation codes understood by the stack machine.
///
/// The discriminant is the numeric code written to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    Lit = 1,
    Rtn = 2,
    Lod = 3,
    Sto = 4,
    Cal = 5,
    Inc = 6,
    Jmp = 7,
    Jpc = 8,
    Write = 9,
    Read = 10,
    Halt = 11,
    Neg = 12,
    Add = 13,
    Sub = 14,
    Mul = 15,
    Div = 16,
    Odd = 17,
    Eql = 19,
    Neq = 20,
    Lss = 21,
    Leq = 22,
    Gtr = 23,
    Geq = 24,
}

impl OpCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Lit => "LIT",
            OpCode::Rtn => "RTN",
            OpCode::Lod => "LOD",
            OpCode::Sto => "STO",
            OpCode::Cal => "CAL",
            OpCode::Inc => "INC",
            OpCode::Jmp => "JMP",
            OpCode::Jpc => "JPC",
            OpCode::Write => "SIO_WRITE",
            OpCode::Read => "SIO_READ",
            OpCode::Halt => "SIO_HALT",
            OpCode::Neg => "NEG",
            OpCode::Add => "ADD",
            OpCode::Sub => "SUB",
            OpCode::Mul => "MUL",
            OpCode::Div => "DIV",
            OpCode::Odd => "ODD",
            OpCode::Eql => "EQL",
            OpCode::Neq => "NEQ",
            OpCode::Lss => "LSS",
            OpCode::Leq => "LEQ",
            OpCode::Gtr => "GTR",
            OpCode::Geq => "GEQ",
        }
    }

    /// Jumps are the only instructions whose target may be backpatched.
    pub fn is_jump(self) -> bool {
        matches!(self, OpCode::Jmp | OpCode::Jpc)
    }
}

impl Serialize for OpCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.mnemonic())
    }
}

/// One machine instruction: `op r l m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub op: OpCode,
    /// Numeric form of `op`, kept alongside the mnemonic in JSON output.
    pub code: i32,
    /// Register field; always 0 for this language.
    pub r: i32,
    /// Lexical level difference.
    pub l: i32,
    /// Modifier: literal, address, jump target or frame size.
    pub m: i32,
}

impl Instruction {
    pub fn new(op: OpCode, r: i32, l: i32, m: i32) -> Self {
        Self {
            op,
            code: op.code(),
            r,
            l,
            m,
        }
    }
}

impl fmt::Display for Instruction {
    /// `op r l m` with every field as an integer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.code, self.r, self.l, self.m)
    }
}

/// Emitted code of a successful compilation. Addresses are indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn last(&self) -> Option<&Instruction> {
        self.instructions.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_display() {
        let test_cases = vec![
            (Instruction::new(OpCode::Lit, 0, 0, 5), "1 0 0 5"),
            (Instruction::new(OpCode::Cal, 0, 1, 12), "5 0 1 12"),
            (Instruction::new(OpCode::Halt, 0, 0, 3), "11 0 0 3"),
            (Instruction::new(OpCode::Geq, 0, 0, 0), "24 0 0 0"),
        ];

        for (ins, expected) in test_cases {
            assert_eq!(ins.to_string(), expected);
        }
    }

    #[test]
    fn test_only_jumps_are_patchable() {
        assert!(OpCode::Jmp.is_jump());
        assert!(OpCode::Jpc.is_jump());
        assert!(!OpCode::Cal.is_jump());
        assert!(!OpCode::Inc.is_jump());
    }

    #[test]
    fn test_json_shape() {
        let program = Program {
            instructions: vec![Instruction::new(OpCode::Lit, 0, 0, 7)],
        };
        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(json["instructions"][0]["op"], "LIT");
        assert_eq!(json["instructions"][0]["code"], 1);
        assert_eq!(json["instructions"][0]["m"], 7);
    }
}
