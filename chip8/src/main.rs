use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use emu8_core::constants::DEFAULT_STEP_RATE;
use emu8_core::{Config, FaultPolicy};

mod keymap;
mod run;

/// How to treat opcodes the interpreter doesn't recognise
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OnFault {
    /// Stop the interpreter
    Halt,
    /// Skip the opcode and report it
    Skip,
    /// Skip the opcode with a warning
    Log,
}

impl From<OnFault> for FaultPolicy {
    fn from(on_fault: OnFault) -> Self {
        match on_fault {
            OnFault::Halt => FaultPolicy::Halt,
            OnFault::Skip => FaultPolicy::Skip,
            OnFault::Log => FaultPolicy::Log,
        }
    }
}

/// A Chip-8 interpreter
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions (and delay timer ticks) per second
    #[arg(long, default_value_t = DEFAULT_STEP_RATE)]
    hz: u32,

    /// Size of each Chip-8 pixel on screen
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// What to do on an unknown opcode
    #[arg(long, value_enum, default_value_t = OnFault::Halt)]
    fault_policy: OnFault,

    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            fault_policy: self.fault_policy.into(),
            seed: self.seed,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run::run(&args)
}
