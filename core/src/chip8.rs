use std::io::Read;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Config, FaultPolicy};
use crate::constants::{KEY_COUNT, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START};
use crate::error::Chip8Error;
use crate::frame_buffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::operations;
use crate::render::Renderer;
use crate::state::State;

/// Whether a `Chip8` will execute any more instructions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    /// An unknown opcode was hit under `FaultPolicy::Halt`; only `reset` recovers
    Faulted,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current machine `state`, including the pressed keys
///  - the `frame_buffer` and whether it changed since it was last rendered
///  - whether the interpreter has faulted
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU and its delay timer
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    frame_buffer: FrameBuffer,
    draw_flag: bool,
    status: Status,
    config: Config,
    rng: StdRng,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Chip8 {
            state: State::new(),
            frame_buffer: FrameBuffer::new(),
            draw_flag: true,
            status: Status::Running,
            config,
            rng,
        }
    }

    /// Puts the machine back in its power-on state, dropping any loaded rom
    pub fn reset(&mut self) {
        debug!("resetting interpreter");
        self.state = State::new();
        self.frame_buffer.clear();
        self.draw_flag = true;
        self.status = Status::Running;
    }

    /// Copies `rom` into memory starting at `offset`
    ///
    /// # Arguments
    /// * `rom` the raw bytes of a program
    /// * `offset` the address of the first byte, usually `PROGRAM_START`
    pub fn load(&mut self, rom: &[u8], offset: u16) -> Result<(), Chip8Error> {
        let start = usize::from(offset);
        let end = start + rom.len();
        if end > MEMORY_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                offset,
                max_size: MEMORY_SIZE.saturating_sub(start),
            });
        }
        self.state.memory[start..end].copy_from_slice(rom);
        debug!("loaded {} byte rom at {:#05X}", rom.len(), offset);
        Ok(())
    }

    /// Load a rom from a source file at `PROGRAM_START`
    ///
    /// Reads at most one byte past `MAX_ROM_SIZE`, which is enough for `load`
    /// to reject an oversized rom.
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), Chip8Error> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE + 1);
        reader.take(MAX_ROM_SIZE as u64 + 1).read_to_end(&mut rom)?;
        self.load(&rom, PROGRAM_START)
    }

    /// Advances the CPU by a single instruction and the delay timer by a single tick
    /// - fetches the opcode at the pc
    /// - decodes and executes it, which moves the pc on
    /// - ticks the delay timer
    ///
    /// Faults leave the machine as it was before the step, apart from the
    /// pc and timer moving on under `FaultPolicy::Skip` and `FaultPolicy::Log`.
    pub fn step(&mut self) -> Result<(), Chip8Error> {
        let pc = self.state.pc;
        if self.status == Status::Faulted {
            return Err(Chip8Error::Halted { pc });
        }

        let op = self.state.fetch()?;
        let instruction = match Instruction::decode(op) {
            Some(instruction) => instruction,
            None => return self.unknown_opcode(op, pc),
        };
        trace!(
            "{:03X}: {:04X} {:?} v{:02X?} i{:03X}",
            pc,
            op,
            instruction,
            self.state.v,
            self.state.i
        );

        operations::execute(
            instruction,
            &mut self.state,
            &mut self.frame_buffer,
            &mut self.rng,
        )?;
        if instruction.touches_display() {
            self.draw_flag = true;
        }
        self.tick();
        Ok(())
    }

    fn unknown_opcode(&mut self, opcode: u16, pc: u16) -> Result<(), Chip8Error> {
        let fault = Chip8Error::UnknownOpcode { opcode, pc };
        match self.config.fault_policy {
            // Reported by whoever handles the returned error
            FaultPolicy::Halt => {
                self.status = Status::Faulted;
                Err(fault)
            }
            FaultPolicy::Skip => {
                debug!("{}, skipping", fault);
                self.state.pc = pc.wrapping_add(2);
                self.tick();
                Err(fault)
            }
            FaultPolicy::Log => {
                warn!("{}, skipping", fault);
                self.state.pc = pc.wrapping_add(2);
                self.tick();
                Ok(())
            }
        }
    }

    /// The delay timer counts down to 0 once per step
    fn tick(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
    }

    /// Set the pressed status of a key
    ///
    /// # Arguments
    /// * `key` the keypad key, 0x0..=0xF
    /// * `pressed` whether it is held down
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<(), Chip8Error> {
        let slot = self
            .state
            .keypad
            .get_mut(usize::from(key))
            .ok_or(Chip8Error::InvalidKey { key })?;
        *slot = pressed;
        Ok(())
    }

    pub fn key_press(&mut self, key: u8) -> Result<(), Chip8Error> {
        self.set_key(key, true)
    }

    pub fn key_release(&mut self, key: u8) -> Result<(), Chip8Error> {
        self.set_key(key, false)
    }

    /// Releases every key, e.g. when the host window loses focus
    pub fn release_all_keys(&mut self) {
        self.state.keypad = [false; KEY_COUNT];
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.frame_buffer.get_pixel(x, y)
    }

    /// Returns the FrameBuffer if the display should be redrawn, and marks it drawn
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if std::mem::take(&mut self.draw_flag) {
            Some(&self.frame_buffer)
        } else {
            None
        }
    }

    /// Renders the FrameBuffer if it changed since it was last taken.
    /// Returns whether anything was rendered.
    pub fn render(&mut self, renderer: &mut dyn Renderer) -> bool {
        match self.take_frame() {
            Some(frame) => {
                frame.render(renderer);
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn config(&self) -> Config {
        self.config
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
