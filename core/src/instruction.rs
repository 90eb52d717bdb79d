use crate::opcode::Opcode;

/// A decoded Chip-8 instruction.
///
/// `x` and `y` name registers, `nn` is an 8-bit immediate and `addr` a 12-bit
/// address. Variants are listed in opcode order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` clear the display
    Clear,
    /// `00EE` return from a subroutine
    Return,
    /// `1NNN` PC = addr
    Jump { addr: u16 },
    /// `2NNN` STACK.push(PC + 2); PC = addr
    Call { addr: u16 },
    /// `3XNN` skip if Vx == nn
    SkipEqImm { x: usize, nn: u8 },
    /// `4XNN` skip if Vx != nn
    SkipNeImm { x: usize, nn: u8 },
    /// `5XY0` skip if Vx == Vy
    SkipEqReg { x: usize, y: usize },
    /// `6XNN` Vx = nn
    LoadImm { x: usize, nn: u8 },
    /// `7XNN` Vx += nn without touching VF
    AddImm { x: usize, nn: u8 },
    /// `8XY0` Vx = Vy
    Copy { x: usize, y: usize },
    /// `8XY1` Vx |= Vy
    Or { x: usize, y: usize },
    /// `8XY2` Vx &= Vy
    And { x: usize, y: usize },
    /// `8XY3` Vx ^= Vy
    Xor { x: usize, y: usize },
    /// `8XY4` Vx += Vy; VF = carry
    Add { x: usize, y: usize },
    /// `8XY5` Vx -= Vy; VF = !borrow
    Sub { x: usize, y: usize },
    /// `8XY6` Vx >>= 1; VF = shifted out bit
    ShiftRight { x: usize },
    /// `8XY7` Vx = Vy - Vx; VF = !borrow
    SubRev { x: usize, y: usize },
    /// `8XYE` Vx <<= 1; VF = shifted out bit
    ShiftLeft { x: usize },
    /// `9XY0` skip if Vx != Vy
    SkipNeReg { x: usize, y: usize },
    /// `ANNN` I = addr
    SetIndex { addr: u16 },
    /// `BNNN` PC = V0 + addr
    JumpOffset { addr: u16 },
    /// `CXNN` Vx = random & nn
    Random { x: usize, nn: u8 },
    /// `DXYN` draw an n byte sprite from I at (Vx, Vy)
    Draw { x: usize, y: usize, n: u8 },
    /// `EX9E` skip if key Vx is pressed
    SkipKeyDown { x: usize },
    /// `EXA1` skip if key Vx is not pressed
    SkipKeyUp { x: usize },
    /// `FX07` Vx = DT
    GetDelay { x: usize },
    /// `FX0A` Vx = next pressed key
    WaitKey { x: usize },
    /// `FX15` DT = Vx
    SetDelay { x: usize },
    /// `FX18` ST = Vx
    SetSound { x: usize },
    /// `FX1E` I += Vx; VF = I past 0xFFF
    AddIndex { x: usize },
    /// `FX29` I = address of the glyph for Vx
    FontAddress { x: usize },
    /// `FX33` mem[I..I+3] = bcd(Vx)
    Bcd { x: usize },
    /// `FX55` mem[I..=I+x] = V0..=Vx
    StoreRegs { x: usize },
    /// `FX65` V0..=Vx = mem[I..=I+x]
    LoadRegs { x: usize },
}

impl Instruction {
    /// Selects the Instruction for a given Opcode.
    ///
    /// Returns `None` when the opcode's selector bits don't name a Chip-8
    /// instruction (e.g. `0x5001` or any `0NNN` machine routine call).
    pub fn decode(op: u16) -> Option<Self> {
        let (x, y, n, nn, addr) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Self::Clear,
            (0x0, 0x0, 0xE, 0xE) => Self::Return,
            (0x1, ..) => Self::Jump { addr },
            (0x2, ..) => Self::Call { addr },
            (0x3, ..) => Self::SkipEqImm { x, nn },
            (0x4, ..) => Self::SkipNeImm { x, nn },
            (0x5, .., 0x0) => Self::SkipEqReg { x, y },
            (0x6, ..) => Self::LoadImm { x, nn },
            (0x7, ..) => Self::AddImm { x, nn },
            (0x8, .., 0x0) => Self::Copy { x, y },
            (0x8, .., 0x1) => Self::Or { x, y },
            (0x8, .., 0x2) => Self::And { x, y },
            (0x8, .., 0x3) => Self::Xor { x, y },
            (0x8, .., 0x4) => Self::Add { x, y },
            (0x8, .., 0x5) => Self::Sub { x, y },
            (0x8, .., 0x6) => Self::ShiftRight { x },
            (0x8, .., 0x7) => Self::SubRev { x, y },
            (0x8, .., 0xE) => Self::ShiftLeft { x },
            (0x9, .., 0x0) => Self::SkipNeReg { x, y },
            (0xA, ..) => Self::SetIndex { addr },
            (0xB, ..) => Self::JumpOffset { addr },
            (0xC, ..) => Self::Random { x, nn },
            (0xD, ..) => Self::Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => Self::SkipKeyDown { x },
            (0xE, _, 0xA, 0x1) => Self::SkipKeyUp { x },
            (0xF, _, 0x0, 0x7) => Self::GetDelay { x },
            (0xF, _, 0x0, 0xA) => Self::WaitKey { x },
            (0xF, _, 0x1, 0x5) => Self::SetDelay { x },
            (0xF, _, 0x1, 0x8) => Self::SetSound { x },
            (0xF, _, 0x1, 0xE) => Self::AddIndex { x },
            (0xF, _, 0x2, 0x9) => Self::FontAddress { x },
            (0xF, _, 0x3, 0x3) => Self::Bcd { x },
            (0xF, _, 0x5, 0x5) => Self::StoreRegs { x },
            (0xF, _, 0x6, 0x5) => Self::LoadRegs { x },
            _ => return None,
        };
        Some(instruction)
    }

    /// Whether executing this instruction can change the frame buffer
    pub fn touches_display(&self) -> bool {
        matches!(self, Self::Clear | Self::Draw { .. })
    }
}
