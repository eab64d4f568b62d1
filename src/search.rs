//! Repair search over single-flip variants of a program.
//!
//! A program that loops forever is assumed to carry exactly one corrupted
//! instruction, a `nop` that should be a `jmp` or the other way around. The
//! search runs the program as given, then every variant with one such
//! instruction switched, and reports the first one that halts normally.

use log::{debug, info, warn};

use crate::error::Error;
use crate::program::Program;
use crate::{Halt, Interpreter};

/// The first candidate that halted normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repair {
    /// Index of the switched instruction, `None` if the program halted as given.
    pub flipped: Option<usize>,
    /// Accumulator value at the normal halt.
    pub accumulator: i64,
}

pub fn repair(program: &Program) -> Result<Repair, Error> {
    let mut vm = Interpreter::default();

    for (flipped, candidate) in program.variants() {
        vm.load(candidate);

        let halt = vm.run().map_err(|e| {
            warn!("candidate {:?} failed: {}", flipped, e);
            e
        })?;
        debug!("candidate {:?} -> {:?} in {} steps", flipped, halt, vm.steps());

        if let Halt::Normally { accumulator } = halt {
            info!(
                "program terminates with flip {:?}, accumulator {}",
                flipped, accumulator
            );
            return Ok(Repair {
                flipped,
                accumulator,
            });
        }
    }

    Err(Error::NoTerminatingVariant)
}
