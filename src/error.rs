//! Defines the [`Error`] type of the crate.

use std::path::PathBuf;

/// An error that might occur while loading, running or repairing a program.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A line of the input started with a mnemonic outside of `nop`, `acc` and `jmp`.
    #[error("line {line}: invalid instruction `{mnemonic}`")]
    InvalidInstruction { line: usize, mnemonic: String },

    /// A line of the input was not of the form `<mnemonic> <integer>`.
    #[error("line {line}: malformed instruction `{text}`")]
    MalformedLine { line: usize, text: String },

    /// A jump moved the program counter below zero or past the end of the program.
    ///
    /// Landing exactly one past the last instruction is a normal halt and never
    /// produces this error.
    #[error("jump at {pc} targets {target}, outside of program of length {len}")]
    OutOfBoundsJump { pc: usize, target: i64, len: usize },

    /// An `acc` instruction pushed the accumulator outside of the `i64` range.
    #[error("accumulator overflow at {pc}: {acc} + {arg}")]
    AccumulatorOverflow { pc: usize, acc: i64, arg: i64 },

    /// Neither the program nor any of its single-flip variants halts normally.
    #[error("no single-flip variant of the program terminates")]
    NoTerminatingVariant,

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
