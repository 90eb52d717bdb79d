use rand::{Rng, RngCore};

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, GLYPH_HEIGHT, INDEX_LIMIT};
use crate::error::Chip8Error;
use crate::frame_buffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::state::State;

/// What happens to the program counter once an instruction has run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Next {
    /// Move on to the following instruction
    Advance,
    /// Skip over the following instruction
    Skip,
    /// Continue at an address
    Jump(u16),
    /// Run this instruction again on the next step
    Wait,
}

impl Next {
    fn skip_if(condition: bool) -> Self {
        if condition {
            Next::Skip
        } else {
            Next::Advance
        }
    }

    fn apply(self, state: &mut State) {
        match self {
            Next::Advance => state.pc = state.pc.wrapping_add(2),
            Next::Skip => state.pc = state.pc.wrapping_add(4),
            Next::Jump(addr) => state.pc = addr,
            Next::Wait => {}
        }
    }
}

/// Executes a single instruction against the machine and moves the pc on.
///
/// Handlers validate everything that can fail before writing anything, so an
/// `Err` leaves `state` and `frame` exactly as they were.
pub fn execute(
    instruction: Instruction,
    state: &mut State,
    frame: &mut FrameBuffer,
    rng: &mut dyn RngCore,
) -> Result<(), Chip8Error> {
    use Instruction::*;

    let next = match instruction {
        Clear => clear(frame),
        Return => ret(state)?,
        Jump { addr } => Next::Jump(addr),
        Call { addr } => call(state, addr)?,
        SkipEqImm { x, nn } => Next::skip_if(state.v[x] == nn),
        SkipNeImm { x, nn } => Next::skip_if(state.v[x] != nn),
        SkipEqReg { x, y } => Next::skip_if(state.v[x] == state.v[y]),
        LoadImm { x, nn } => {
            state.v[x] = nn;
            Next::Advance
        }
        AddImm { x, nn } => {
            state.v[x] = state.v[x].wrapping_add(nn);
            Next::Advance
        }
        Copy { x, y } => {
            state.v[x] = state.v[y];
            Next::Advance
        }
        Or { x, y } => {
            state.v[x] |= state.v[y];
            Next::Advance
        }
        And { x, y } => {
            state.v[x] &= state.v[y];
            Next::Advance
        }
        Xor { x, y } => {
            state.v[x] ^= state.v[y];
            Next::Advance
        }
        Add { x, y } => add(state, x, y),
        Sub { x, y } => sub(state, x, y),
        ShiftRight { x } => shr(state, x),
        SubRev { x, y } => subn(state, x, y),
        ShiftLeft { x } => shl(state, x),
        SkipNeReg { x, y } => Next::skip_if(state.v[x] != state.v[y]),
        SetIndex { addr } => {
            state.i = addr;
            Next::Advance
        }
        JumpOffset { addr } => Next::Jump(addr.wrapping_add(u16::from(state.v[0x0]))),
        Random { x, nn } => {
            state.v[x] = rng.gen::<u8>() & nn;
            Next::Advance
        }
        Draw { x, y, n } => draw(state, frame, x, y, n)?,
        SkipKeyDown { x } => Next::skip_if(state.is_pressed(state.v[x])),
        SkipKeyUp { x } => Next::skip_if(!state.is_pressed(state.v[x])),
        GetDelay { x } => {
            state.v[x] = state.delay_timer;
            Next::Advance
        }
        WaitKey { x } => wait_key(state, x),
        SetDelay { x } => {
            state.delay_timer = state.v[x];
            Next::Advance
        }
        // There is no audio so the sound timer isn't modelled
        SetSound { .. } => Next::Advance,
        AddIndex { x } => add_index(state, x),
        FontAddress { x } => {
            state.i = u16::from(state.v[x]) * GLYPH_HEIGHT;
            Next::Advance
        }
        Bcd { x } => bcd(state, x)?,
        StoreRegs { x } => store(state, x)?,
        LoadRegs { x } => load(state, x)?,
    };

    next.apply(state);
    Ok(())
}

/// clear
fn clear(frame: &mut FrameBuffer) -> Next {
    frame.clear();
    Next::Advance
}

/// PC = STACK.pop()
fn ret(state: &mut State) -> Result<Next, Chip8Error> {
    Ok(Next::Jump(state.pop()?))
}

/// STACK.push(PC + 2); PC = addr
fn call(state: &mut State, addr: u16) -> Result<Next, Chip8Error> {
    state.push(state.pc.wrapping_add(2))?;
    Ok(Next::Jump(addr))
}

/// Vx += Vy; VF = carry
fn add(state: &mut State, x: usize, y: usize) -> Next {
    let (res, carry) = state.v[x].overflowing_add(state.v[y]);
    state.v[x] = res;
    state.v[0xF] = u8::from(carry);
    Next::Advance
}

/// Vx -= Vy; VF = !borrow
fn sub(state: &mut State, x: usize, y: usize) -> Next {
    let (res, borrow) = state.v[x].overflowing_sub(state.v[y]);
    state.v[x] = res;
    state.v[0xF] = u8::from(!borrow);
    Next::Advance
}

/// Vx = Vy - Vx; VF = !borrow
fn subn(state: &mut State, x: usize, y: usize) -> Next {
    let (res, borrow) = state.v[y].overflowing_sub(state.v[x]);
    state.v[x] = res;
    state.v[0xF] = u8::from(!borrow);
    Next::Advance
}

/// Vx >>= 1; VF = lsb
fn shr(state: &mut State, x: usize) -> Next {
    let value = state.v[x];
    state.v[x] = value >> 1;
    state.v[0xF] = value & 0x1;
    Next::Advance
}

/// Vx <<= 1; VF = msb
fn shl(state: &mut State, x: usize) -> Next {
    let value = state.v[x];
    state.v[x] = value << 1;
    state.v[0xF] = value >> 7;
    Next::Advance
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite in memory I..I+n onto the FrameBuffer at Vx, Vy.
/// The origin wraps around the display but the sprite itself is clipped at the edges.
/// Sets VF if any pixels were erased.
fn draw(
    state: &mut State,
    frame: &mut FrameBuffer,
    x: usize,
    y: usize,
    n: u8,
) -> Result<Next, Chip8Error> {
    let origin_x = usize::from(state.v[x]) % DISPLAY_WIDTH;
    let origin_y = usize::from(state.v[y]) % DISPLAY_HEIGHT;
    let sprite = state.memory_range(state.i, usize::from(n))?;

    let mut collision = false;
    for (row, byte) in sprite.iter().enumerate() {
        let py = origin_y + row;
        if py >= DISPLAY_HEIGHT {
            break;
        }
        for bit in 0..8 {
            let px = origin_x + bit;
            if px >= DISPLAY_WIDTH {
                break;
            }
            if (byte >> (7 - bit)) & 0x1 == 0x1 {
                collision |= frame.flip_pixel(px, py);
            }
        }
    }

    state.v[0xF] = u8::from(collision);
    Ok(Next::Advance)
}

/// Vx = first pressed key, or try again next step
fn wait_key(state: &mut State, x: usize) -> Next {
    match state.first_pressed_key() {
        Some(key) => {
            state.v[x] = key;
            Next::Advance
        }
        None => Next::Wait,
    }
}

/// I += Vx; VF = I > 0xFFF
fn add_index(state: &mut State, x: usize) -> Next {
    let i = state.i.wrapping_add(u16::from(state.v[x]));
    state.i = i;
    state.v[0xF] = u8::from(i > INDEX_LIMIT);
    Next::Advance
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: usize) -> Result<Next, Chip8Error> {
    let value = state.v[x];
    let digits = [value / 100, value / 10 % 10, value % 10];
    state.memory_range_mut(state.i, 3)?.copy_from_slice(&digits);
    Ok(Next::Advance)
}

/// mem[I..=I+x] = V0..=Vx
fn store(state: &mut State, x: usize) -> Result<Next, Chip8Error> {
    let registers = state.v;
    state
        .memory_range_mut(state.i, x + 1)?
        .copy_from_slice(&registers[..=x]);
    Ok(Next::Advance)
}

/// V0..=Vx = mem[I..=I+x]
fn load(state: &mut State, x: usize) -> Result<Next, Chip8Error> {
    let mut loaded = [0; 16];
    loaded[..=x].copy_from_slice(state.memory_range(state.i, x + 1)?);
    state.v[..=x].copy_from_slice(&loaded[..=x]);
    Ok(Next::Advance)
}
