/// Width of the display in pixels
pub const DISPLAY_WIDTH: usize = 64;

/// Height of the display in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Address that ROMs are loaded at and execution starts from
pub const PROGRAM_START: u16 = 0x200;

/// Largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of return addresses the stack can hold
pub const STACK_DEPTH: usize = 16;

/// Number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

/// Highest address `I` can reach before `FX1E` reports an overflow
pub const INDEX_LIMIT: u16 = 0x0FFF;

/// Steps per second a host should drive the interpreter at.
/// Each step also ticks the delay timer so this matches the 60Hz timer rate.
pub const DEFAULT_STEP_RATE: u32 = 60;

/// Height in bytes of each glyph in the font sheet
pub const GLYPH_HEIGHT: u16 = 5;

/// # Font sheet
/// Hexadecimal glyphs 0..F stored from address 0x000.
/// Each glyph is 4 pixels wide and 5 pixels tall, one byte per row with the
/// glyph in the high nibble.
/// ```text
/// 0xF0 ****
/// 0x90 *  *
/// 0x90 *  *
/// 0x90 *  *
/// 0xF0 ****
/// ```
pub const FONT_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
