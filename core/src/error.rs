use thiserror::Error;

/// Everything that can go wrong while loading or running a ROM.
///
/// Faults raised by `Chip8::step` are local to that step; none of them leave
/// the machine half-updated. Whether to keep stepping is up to the host,
/// except after `Halted`.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("ROM is too large ({size} bytes at {offset:#05X}), max size is {max_size} bytes")]
    RomTooLarge {
        size: usize,
        offset: u16,
        max_size: usize,
    },

    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("memory access out of bounds at address {address:#06X}")]
    AddressRange { address: usize },

    #[error("stack overflow calling from {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("stack underflow returning from {pc:#05X}")]
    StackUnderflow { pc: u16 },

    #[error("key {key:#X} is not on the keypad")]
    InvalidKey { key: u8 },

    #[error("interpreter halted after a fault at {pc:#05X}")]
    Halted { pc: u16 },

    #[error("unable to read ROM: {0}")]
    Io(#[from] std::io::Error),
}
