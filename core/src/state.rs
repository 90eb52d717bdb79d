use crate::constants::{FONT_SHEET, KEY_COUNT, MEMORY_SIZE, PROGRAM_START, STACK_DEPTH};
use crate::error::Chip8Error;

/// The Chip8 machine state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - V0..VE are general purpose registers
///     - VF is also written as the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, the address of the next instruction
///
/// Pointer
/// - (sp) the number of return addresses on the stack
///
/// Timers
/// - an 8-bit delay timer, ticked down once per step until it hits 0
///
/// ## Memory
/// - 16 return addresses of stack
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the font sheet
///     - 0x200.. holds the loaded program
///
/// ## Input
/// - the pressed status of keys 0..F, written by the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub keypad: [bool; KEY_COUNT],
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..FONT_SHEET.len()].copy_from_slice(&FONT_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            keypad: [false; KEY_COUNT],
        }
    }

    /// Pushes a return address, failing if the stack is already full
    pub fn push(&mut self, address: u16) -> Result<(), Chip8Error> {
        let slot = self
            .stack
            .get_mut(self.sp as usize)
            .ok_or(Chip8Error::StackOverflow { pc: self.pc })?;
        *slot = address;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recent return address, failing if the stack is empty
    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow { pc: self.pc });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Returns the `len` bytes of memory starting at `start`
    pub fn memory_range(&self, start: u16, len: usize) -> Result<&[u8], Chip8Error> {
        let start = usize::from(start);
        self.memory
            .get(start..start + len)
            .ok_or(Chip8Error::AddressRange {
                address: (start + len).saturating_sub(1),
            })
    }

    /// Returns the `len` bytes of memory starting at `start` for writing
    pub fn memory_range_mut(&mut self, start: u16, len: usize) -> Result<&mut [u8], Chip8Error> {
        let start = usize::from(start);
        self.memory
            .get_mut(start..start + len)
            .ok_or(Chip8Error::AddressRange {
                address: (start + len).saturating_sub(1),
            })
    }

    /// The lowest numbered key that is currently held down
    pub fn first_pressed_key(&self) -> Option<u8> {
        self.keypad.iter().position(|&pressed| pressed).map(|key| key as u8)
    }

    /// Whether the key named by the low nibble of `key` is held down
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keypad[usize::from(key & 0xF)]
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> Result<u16, Chip8Error> {
        let bytes = self.memory_range(self.pc, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
