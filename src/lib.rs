pub mod cpu;
pub mod error;
pub mod memory;
pub mod program;
pub mod search;

use cpu::{Cpu, OpCode};
use error::Error;
use log::{debug, trace};
use memory::{Addressable, Memory};
use program::Program;

pub use search::{repair, Repair};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The program counter reached exactly one past the last instruction.
    Normally { accumulator: i64 },
    /// The program counter came back to an address that was already executed.
    /// The instruction at `pc` was not executed a second time.
    OnLoop { pc: usize, accumulator: i64 },
}

impl Halt {
    pub fn accumulator(&self) -> i64 {
        match *self {
            Self::Normally { accumulator } | Self::OnLoop { accumulator, .. } => accumulator,
        }
    }
}

/// Where an [`Interpreter`] stands after its last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Running,
    Halted(Halt),
}

#[derive(Debug)]
pub struct Interpreter {
    cpu: Cpu,
    visited: Memory,
    program: Program,
    state: ExecutionState,
    steps: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        // An empty program is already past its last instruction.
        Self {
            cpu: Cpu::default(),
            visited: Memory::default(),
            program: Program::default(),
            state: ExecutionState::Halted(Halt::Normally { accumulator: 0 }),
            steps: 0,
        }
    }
}

impl Interpreter {
    pub fn new(program: Program) -> Self {
        let mut interp = Self::default();
        interp.load(program);
        interp
    }

    /// Binds `program` and resets every register, the visited map and the
    /// step counter, exactly as a freshly constructed interpreter would be.
    pub fn load(&mut self, program: Program) {
        self.cpu = Cpu::default();
        self.visited.reset(program.len());
        self.steps = 0;
        self.state = if program.is_empty() {
            ExecutionState::Halted(Halt::Normally { accumulator: 0 })
        } else {
            ExecutionState::Running
        };
        self.program = program;

        debug!("loaded program of {} instructions", self.program.len());
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    /// Number of instructions executed since the last [`Interpreter::load`].
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn debug_state(&self) {
        debug!(
            "State: {:?} after {} steps, {} | {} of {} addresses visited",
            self.state,
            self.steps,
            self.cpu,
            self.visited.marked(),
            self.visited.size()
        );
    }

    fn halt(&mut self, halt: Halt) -> ExecutionState {
        self.state = ExecutionState::Halted(halt);
        self.debug_state();
        self.state
    }

    /// Applies one transition. Once halted, further calls return the same
    /// state without touching the registers.
    pub fn step(&mut self) -> Result<ExecutionState, Error> {
        if let ExecutionState::Halted(_) = self.state {
            return Ok(self.state);
        }

        let pc = self.cpu.pc;
        if self.visited.read(pc) {
            return Ok(self.halt(Halt::OnLoop {
                pc,
                accumulator: self.cpu.acc,
            }));
        }
        self.visited.write(pc, true);

        let instr = self.program.instructions()[pc];
        trace!("{:>5}: {:<8} acc: {}", pc, instr, self.cpu.acc);

        let offset = match instr.op {
            OpCode::NOP => 1,
            OpCode::ACC => {
                self.cpu.acc = self
                    .cpu
                    .acc
                    .checked_add(instr.arg)
                    .ok_or(Error::AccumulatorOverflow {
                        pc,
                        acc: self.cpu.acc,
                        arg: instr.arg,
                    })?;
                1
            }
            OpCode::JMP => instr.arg,
        };
        self.steps += 1;

        let len = self.program.len();
        // Saturates on overflow, which is out of bounds either way.
        let target = (pc as i64).saturating_add(offset);
        if target < 0 || target > len as i64 {
            return Err(Error::OutOfBoundsJump { pc, target, len });
        }
        self.cpu.pc = target as usize;

        if self.cpu.pc == len {
            return Ok(self.halt(Halt::Normally {
                accumulator: self.cpu.acc,
            }));
        }

        Ok(self.state)
    }

    /// Steps until the program halts. Every address can be executed at most
    /// once, so this returns after at most `len + 1` transitions.
    pub fn run(&mut self) -> Result<Halt, Error> {
        loop {
            if let ExecutionState::Halted(halt) = self.step()? {
                return Ok(halt);
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::cpu::Instruction;
    use proptest::prelude::*;

    fn instruction(max_len: usize) -> impl Strategy<Value = Instruction> {
        let reach = max_len as i64;
        prop_oneof![
            (-reach..=reach).prop_map(|arg| Instruction::new(OpCode::NOP, arg)),
            (-50i64..=50).prop_map(|arg| Instruction::new(OpCode::ACC, arg)),
            (-reach..=reach).prop_map(|arg| Instruction::new(OpCode::JMP, arg)),
        ]
    }

    proptest! {
        #[test]
        fn nop_only_programs_halt_after_len_steps(len in 0usize..200) {
            let prog = Program::new(vec![Instruction::new(OpCode::NOP, 0); len]);
            let mut vm = Interpreter::new(prog);
            prop_assert_eq!(vm.run().unwrap(), Halt::Normally { accumulator: 0 });
            prop_assert_eq!(vm.steps(), len);
        }

        #[test]
        fn jump_free_programs_always_halt_normally(
            instrs in prop::collection::vec(
                prop_oneof![
                    any::<i32>().prop_map(|arg| Instruction::new(OpCode::NOP, arg as i64)),
                    (-1000i64..=1000).prop_map(|arg| Instruction::new(OpCode::ACC, arg)),
                ],
                0..100,
            )
        ) {
            let expected: i64 = instrs
                .iter()
                .filter(|i| i.op == OpCode::ACC)
                .map(|i| i.arg)
                .sum();
            let len = instrs.len();
            let mut vm = Interpreter::new(Program::new(instrs));
            prop_assert_eq!(vm.run().unwrap(), Halt::Normally { accumulator: expected });
            prop_assert_eq!(vm.steps(), len);
        }

        #[test]
        fn extreme_arguments_never_panic(
            instrs in prop::collection::vec(
                prop_oneof![
                    any::<i64>().prop_map(|arg| Instruction::new(OpCode::NOP, arg)),
                    any::<i64>().prop_map(|arg| Instruction::new(OpCode::ACC, arg)),
                    any::<i64>().prop_map(|arg| Instruction::new(OpCode::JMP, arg)),
                ],
                0..32,
            )
        ) {
            let len = instrs.len();
            let mut vm = Interpreter::new(Program::new(instrs));
            match vm.run() {
                Ok(_)
                | Err(Error::AccumulatorOverflow { .. })
                | Err(Error::OutOfBoundsJump { .. }) => {}
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
            prop_assert!(vm.steps() <= len);
        }

        #[test]
        fn runs_are_bounded_and_repeatable(
            instrs in prop::collection::vec(instruction(16), 1..16)
        ) {
            let prog = Program::new(instrs);
            let len = prog.len();
            let mut vm = Interpreter::default();

            vm.load(prog.clone());
            let first = vm.run();
            prop_assert!(vm.steps() <= len);
            let first_steps = vm.steps();

            vm.load(prog);
            let second = vm.run();
            prop_assert_eq!(vm.steps(), first_steps);

            match (first, second) {
                (Ok(a), Ok(b)) => {
                    prop_assert_eq!(a, b);
                }
                (Err(Error::OutOfBoundsJump { pc: a, .. }), Err(Error::OutOfBoundsJump { pc: b, .. })) => {
                    prop_assert_eq!(a, b);
                }
                (a, b) => {
                    prop_assert!(false, "diverging runs: {:?} / {:?}", a, b);
                }
            }
        }
    }
}
