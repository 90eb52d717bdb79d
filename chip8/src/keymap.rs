use sdl2::keyboard::Scancode;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// Scancodes are used so the keys stay in place on non-QWERTY layouts.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(scancode: Scancode) -> Option<u8> {
    let key = match scancode {
        Scancode::Num1 => 0x1,
        Scancode::Num2 => 0x2,
        Scancode::Num3 => 0x3,
        Scancode::Num4 => 0xC,
        Scancode::Q => 0x4,
        Scancode::W => 0x5,
        Scancode::E => 0x6,
        Scancode::R => 0xD,
        Scancode::A => 0x7,
        Scancode::S => 0x8,
        Scancode::D => 0x9,
        Scancode::F => 0xE,
        Scancode::Z => 0xA,
        Scancode::X => 0x0,
        Scancode::C => 0xB,
        Scancode::V => 0xF,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_covers_every_key_once() {
        let scancodes = [
            Scancode::Num1,
            Scancode::Num2,
            Scancode::Num3,
            Scancode::Num4,
            Scancode::Q,
            Scancode::W,
            Scancode::E,
            Scancode::R,
            Scancode::A,
            Scancode::S,
            Scancode::D,
            Scancode::F,
            Scancode::Z,
            Scancode::X,
            Scancode::C,
            Scancode::V,
        ];
        let keys: HashSet<u8> = scancodes.iter().filter_map(|&code| keymap(code)).collect();
        assert_eq!(keys, (0x0..=0xF).collect::<HashSet<u8>>());
    }

    #[test]
    fn test_ignores_other_keys() {
        assert_eq!(keymap(Scancode::Space), None);
        assert_eq!(keymap(Scancode::Escape), None);
    }
}
