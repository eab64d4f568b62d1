use std::{fmt::Display, fs, path::Path, str::FromStr};

use crate::cpu::{Instruction, OpCode};
use crate::error::Error;

/// An ordered, fixed-length list of instructions addressed from 0.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        source.parse()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, address: usize) -> Option<&Instruction> {
        self.instructions.get(address)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Returns a copy of the program with the instruction at `index` switched
    /// between `nop` and `jmp`, keeping its argument.
    ///
    /// Returns `None` when `index` is out of range or points to an `acc`.
    pub fn with_flipped(&self, index: usize) -> Option<Program> {
        let op = self.instructions.get(index)?.op.flipped()?;
        let mut instructions = self.instructions.clone();
        instructions[index].op = op;
        Some(Program { instructions })
    }

    /// Every candidate the repair search considers: the program itself first
    /// (tagged `None`), then each single-flip variant in ascending index order.
    pub fn variants(&self) -> impl Iterator<Item = (Option<usize>, Program)> + '_ {
        std::iter::once((None, self.clone())).chain(
            (0..self.len()).filter_map(move |index| {
                self.with_flipped(index).map(|program| (Some(index), program))
            }),
        )
    }
}

fn parse_line(line: usize, text: &str) -> Result<Instruction, Error> {
    let malformed = || Error::MalformedLine {
        line,
        text: text.to_owned(),
    };

    let mut fields = text.split_whitespace();
    let (mnemonic, arg) = match (fields.next(), fields.next(), fields.next()) {
        (Some(mnemonic), Some(arg), None) => (mnemonic, arg),
        _ => return Err(malformed()),
    };

    let op = mnemonic
        .parse::<OpCode>()
        .map_err(|e| Error::InvalidInstruction { line, mnemonic: e.0 })?;
    let arg = arg.parse::<i64>().map_err(|_| malformed())?;

    Ok(Instruction::new(op, arg))
}

impl FromStr for Program {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let instructions = s
            .lines()
            .enumerate()
            .map(|(index, text)| (index + 1, text.trim()))
            .filter(|(_, text)| !text.is_empty())
            .map(|(line, text)| parse_line(line, text))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Program::new(instructions))
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for instr in &self.instructions {
            writeln!(f, "{}", instr)?;
        }
        Ok(())
    }
}
