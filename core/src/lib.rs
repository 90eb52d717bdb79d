pub use chip8::{Chip8, Status};
pub use config::{Config, FaultPolicy};
pub use error::Chip8Error;
pub use frame_buffer::FrameBuffer;
pub use instruction::Instruction;
pub use render::Renderer;
pub use state::State;

mod chip8;
mod config;
pub mod constants;
mod error;
mod frame_buffer;
mod instruction;
pub mod opcode;
mod operations;
mod render;
mod state;
