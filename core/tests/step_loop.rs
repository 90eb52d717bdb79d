//! Whole programs driven through the public `Chip8` interface.

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, MAX_ROM_SIZE, PROGRAM_START};
use emu8_core::{Chip8, Chip8Error, Config, FaultPolicy, Renderer, Status};

/// Records what a frame would look like on screen
struct Screen {
    pixels: Vec<bool>,
    presented: usize,
}

impl Screen {
    fn new() -> Self {
        Screen {
            pixels: vec![false; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            presented: 0,
        }
    }

    fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&on| on).count()
    }
}

impl Renderer for Screen {
    fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|pixel| *pixel = false);
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        self.pixels[y * DISPLAY_WIDTH + x] = on;
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}

fn assemble(program: &[u16]) -> Vec<u8> {
    program.iter().flat_map(|op| op.to_be_bytes()).collect()
}

fn boot(program: &[u16]) -> Chip8 {
    let mut chip8 = Chip8::with_config(Config::default().with_seed(42));
    chip8.load(&assemble(program), PROGRAM_START).unwrap();
    chip8
}

#[test]
fn loads_largest_rom() {
    let mut chip8 = Chip8::new();
    assert!(chip8.load(&vec![0; MAX_ROM_SIZE], PROGRAM_START).is_ok());
    assert!(matches!(
        chip8.load(&vec![0; MAX_ROM_SIZE + 1], PROGRAM_START),
        Err(Chip8Error::RomTooLarge { .. })
    ));
}

#[test]
fn counts_down_in_a_loop() {
    // V0 = 5; loop: V0 -= 1 (via V1 = 1; 8015); if V0 != 0 jump loop; V2 = 0xAA
    let mut chip8 = boot(&[
        0x6005, // 200: V0 = 5
        0x6101, // 202: V1 = 1
        0x8015, // 204: V0 -= V1
        0x3000, // 206: skip if V0 == 0
        0x1204, // 208: jump 204
        0x62AA, // 20A: V2 = 0xAA
        0x120C, // 20C: jump 20C
    ]);
    for _ in 0..20 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().v[0x0], 0);
    assert_eq!(chip8.state().v[0x2], 0xAA);
    assert_eq!(chip8.state().pc, 0x20C);
}

#[test]
fn calls_nested_subroutines() {
    let mut chip8 = boot(&[
        0x2206, // 200: call 206
        0x6101, // 202: V1 = 1
        0x1204, // 204: jump 204
        0x220C, // 206: call 20C
        0x7002, // 208: V0 += 2
        0x00EE, // 20A: return
        0x7010, // 20C: V0 += 0x10
        0x00EE, // 20E: return
    ]);
    for _ in 0..8 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().v[0x0], 0x12);
    assert_eq!(chip8.state().v[0x1], 0x1);
    assert_eq!(chip8.state().sp, 0);
    assert_eq!(chip8.state().pc, 0x204);
}

#[test]
fn draws_and_erases_a_glyph() {
    let mut chip8 = boot(&[
        0x600A, // V0 = A
        0xF029, // I = glyph A
        0x6108, // V1 = 8
        0x6204, // V2 = 4
        0xD125, // draw
        0xD125, // draw again
        0x00E0, // clear
    ]);
    let mut screen = Screen::new();

    for _ in 0..5 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().i, 50);
    assert!(chip8.render(&mut screen));
    // Glyph A: 0xF0, 0x90, 0xF0, 0x90, 0x90
    assert_eq!(screen.lit(), 14);
    assert!(chip8.get_pixel(8, 4));
    assert!(!chip8.get_pixel(9, 5));
    assert_eq!(chip8.state().v[0xF], 0);
    assert!(!chip8.render(&mut screen));

    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0xF], 1);
    assert!(chip8.render(&mut screen));
    assert_eq!(screen.lit(), 0);

    chip8.step().unwrap();
    for y in 0..DISPLAY_HEIGHT {
        for x in 0..DISPLAY_WIDTH {
            assert!(!chip8.get_pixel(x, y));
        }
    }
    assert!(chip8.render(&mut screen));
    // Initial frame was never taken, so the first render covered it
    assert_eq!(screen.presented, 3);
}

#[test]
fn clear_blanks_a_busy_screen() {
    let mut program = Vec::new();
    for glyph in 0..16u16 {
        program.extend_from_slice(&[
            0x6000 | glyph,     // V0 = glyph
            0xF029,             // I = font(V0)
            0x6100 | glyph * 4, // V1 = x
            0xD125,             // draw at (V1, V2)
        ]);
    }
    program.push(0x00E0);
    let mut chip8 = boot(&program);
    for _ in 0..64 {
        chip8.step().unwrap();
    }
    assert!(chip8.frame_buffer().lit() > 0);
    chip8.step().unwrap();
    assert!(chip8
        .frame_buffer()
        .rows()
        .iter()
        .all(|row| row.iter().all(|&on| !on)));
}

#[test]
fn skips_on_keys() {
    let mut chip8 = boot(&[
        0x6005, // V0 = 5
        0xE09E, // skip if key 5 down
        0x6101, // V1 = 1
        0xE0A1, // skip if key 5 up
        0x6201, // V2 = 1
        0x120A, // jump 20A
    ]);
    chip8.key_press(0x5).unwrap();
    for _ in 0..4 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().v[0x1], 0);
    assert_eq!(chip8.state().v[0x2], 1);
}

#[test]
fn key_wait_keeps_timers_running() {
    let mut chip8 = boot(&[
        0x6003, // V0 = 3
        0xF015, // DT = V0
        0xF10A, // V1 = key
        0xF207, // V2 = DT
    ]);
    chip8.step().unwrap();
    chip8.step().unwrap();
    assert_eq!(chip8.state().delay_timer, 2);
    for _ in 0..5 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().pc, 0x204);
    assert_eq!(chip8.state().delay_timer, 0);

    chip8.set_key(0xB, true).unwrap();
    chip8.step().unwrap();
    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0x1], 0xB);
    assert_eq!(chip8.state().v[0x2], 0);
}

#[test]
fn saves_and_restores_registers() {
    let mut chip8 = boot(&[
        0x6011, // V0 = 0x11
        0x6122, // V1 = 0x22
        0x6233, // V2 = 0x33
        0xA400, // I = 0x400
        0xF255, // mem[I..=I+2] = V0..=V2
        0x6000, // V0 = 0
        0x6100, // V1 = 0
        0x6200, // V2 = 0
        0xF165, // V0..=V1 = mem[I..=I+1]
    ]);
    for _ in 0..9 {
        chip8.step().unwrap();
    }
    let state = chip8.state();
    assert_eq!(state.memory[0x400..0x403], [0x11, 0x22, 0x33]);
    assert_eq!(state.v[0x0..0x3], [0x11, 0x22, 0x00]);
    assert_eq!(state.i, 0x400);
}

#[test]
fn unknown_opcode_leaves_registers_alone() {
    let mut chip8 = boot(&[0x6A42, 0x5001]);
    chip8.step().unwrap();
    let before = chip8.state().clone();
    assert!(matches!(
        chip8.step(),
        Err(Chip8Error::UnknownOpcode { opcode: 0x5001, .. })
    ));
    assert_eq!(chip8.state().v, before.v);
    assert_eq!(chip8.state().i, before.i);
    assert_eq!(chip8.status(), Status::Faulted);
}

#[test]
fn skip_policy_runs_past_garbage() {
    let mut chip8 = Chip8::with_config(Config::default().with_fault_policy(FaultPolicy::Skip));
    chip8
        .load(&assemble(&[0x0123, 0x8009, 0x6001]), PROGRAM_START)
        .unwrap();
    assert!(chip8.step().is_err());
    assert!(chip8.step().is_err());
    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0x0], 1);
    assert_eq!(chip8.status(), Status::Running);
}

#[test]
fn jump_off_the_end_of_memory() {
    let mut chip8 = boot(&[0x1FFF]);
    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0xFFF);
    assert!(matches!(
        chip8.step(),
        Err(Chip8Error::AddressRange { address: 0x1000 })
    ));
}

#[test]
fn random_is_reproducible_with_a_seed() {
    let program = [0xC0FF, 0xC1FF, 0xC20F];
    let mut first = boot(&program);
    let mut second = boot(&program);
    for _ in 0..3 {
        first.step().unwrap();
        second.step().unwrap();
    }
    assert_eq!(first.state().v, second.state().v);
    assert!(first.state().v[0x2] <= 0x0F);
}
