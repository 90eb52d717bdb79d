/// What `Chip8::step` does when it fetches an opcode it doesn't recognise
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Report the fault and refuse to run any further
    #[default]
    Halt,
    /// Report the fault, step over the opcode and keep running
    Skip,
    /// Log the fault, step over the opcode and carry on as if it succeeded
    Log,
}

/// Construction time settings for a `Chip8`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub fault_policy: FaultPolicy,
    /// Seed for `CXNN`; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Config {
    pub fn with_fault_policy(self, fault_policy: FaultPolicy) -> Self {
        Config {
            fault_policy,
            ..self
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Config {
            seed: Some(seed),
            ..self
        }
    }
}
