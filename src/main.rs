//! Accumulator machine runner.
//!
//! Loads a program of `nop`/`acc`/`jmp` instructions and either reports the
//! accumulator when the program first loops (`--detect-loop`) or searches for
//! the single `nop`/`jmp` switch that lets it terminate.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use acc_vm::error::Error;
use acc_vm::program::Program;
use acc_vm::{repair, Halt, Interpreter};

/// Run or repair an accumulator machine program.
#[derive(Parser)]
#[command(name = "acc-vm", about = "Run or repair an accumulator machine program")]
struct Cli {
    /// Path to the program, one `<mnemonic> <integer>` per line.
    path: PathBuf,

    /// Run the program once and report where it loops instead of repairing it.
    #[arg(long)]
    detect_loop: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let program = Program::from_file(&cli.path)?;

    if cli.detect_loop {
        let mut vm = Interpreter::new(program);
        match vm.run()? {
            Halt::OnLoop { pc, accumulator } => println!(
                "Infinite loop found at line {} with accumulator value {}",
                pc, accumulator
            ),
            Halt::Normally { accumulator } => {
                println!("Execution complete with accumulator value {}", accumulator)
            }
        }
        return Ok(());
    }

    let fixed = repair(&program)?;
    println!("Accumulator after successful run: {}", fixed.accumulator);
    Ok(())
}
