/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, stored big-endian. Their behavior is cased on some combination of:
/// - `(n, _, _, _)` the instruction family; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within families 0x5, 0x8 and 0x9
/// - `(_, _, n, n)` specific behavior within families 0x0, 0xE and 0xF
///
/// Nibbles not used to determine the operation carry operands.
/// - `(_, n, n, n)` a 12-bit address or immediate (`nnn`)
/// - `(_, _, n, n)` an 8-bit immediate assigned to and/or compared with Vx (`nn`)
/// - `(_, n, _, _)` the register Vx or the range of registers V0..=Vx (`x`)
/// - `(_, _, n, _)` the register Vy (`y`)
/// - `(_, _, _, n)` a 4-bit immediate, the height of a sprite (`n`)
///
/// Every 16-bit value decodes into fields; whether those fields name a real
/// instruction is decided by `Instruction::decode`.
pub trait Opcode {
    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The Opcode's most significant nibble.
    /// `[f___]`
    fn family(&self) -> u8;

    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> usize;

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> usize;

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__nn]`
    fn nn(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x() as u8, self.y() as u8, self.n())
    }

    fn family(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> usize {
        usize::from((self >> 8) & 0xF)
    }

    fn y(&self) -> usize {
        usize::from((self >> 4) & 0xF)
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibbles() {
        let op: u16 = 0xABCD;
        assert_eq!(op.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_family() {
        assert_eq!(0xABCDu16.family(), 0xA);
        assert_eq!(0x0FFFu16.family(), 0x0);
        assert_eq!(0xF000u16.family(), 0xF);
    }

    #[test]
    fn test_registers() {
        let op: u16 = 0x8AB4;
        assert_eq!(op.x(), 0xA);
        assert_eq!(op.y(), 0xB);
    }

    #[test]
    fn test_immediates() {
        let op: u16 = 0xABCD;
        assert_eq!(op.n(), 0xD);
        assert_eq!(op.nn(), 0xCD);
        assert_eq!(op.nnn(), 0x0BCD);
    }
}
