use std::{fmt::Display, str::FromStr};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cpu {
    pub acc: i64,  // The accumulator register
    pub pc: usize, // The program counter register
}

impl Display for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cpu [ acc: {}, pc: {} ]", self.acc, self.pc)
    }
}

impl Cpu {
    pub fn new(acc: i64, pc: usize) -> Self {
        Cpu { acc, pc }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    NOP, // PC += 1
    ACC, // A += arg, PC += 1
    JMP, // PC += arg
}

impl OpCode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::NOP => "nop",
            Self::ACC => "acc",
            Self::JMP => "jmp",
        }
    }

    /// The opcode a single-flip mutation turns this one into, if any.
    /// `acc` is never a corruption candidate.
    pub fn flipped(self) -> Option<Self> {
        match self {
            Self::NOP => Some(Self::JMP),
            Self::JMP => Some(Self::NOP),
            Self::ACC => None,
        }
    }
}

/// Error returned when a mnemonic is not part of the instruction set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMnemonic(pub String);

impl FromStr for OpCode {
    type Err = UnknownMnemonic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nop" => Ok(Self::NOP),
            "acc" => Ok(Self::ACC),
            "jmp" => Ok(Self::JMP),
            _ => Err(UnknownMnemonic(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: OpCode,
    pub arg: i64,
}

impl Instruction {
    pub fn new(op: OpCode, arg: i64) -> Self {
        Self { op, arg }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:+}", self.op.mnemonic(), self.arg)
    }
}
