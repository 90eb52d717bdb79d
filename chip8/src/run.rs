use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use log::{error, info, warn};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;

use emu8_core::{Chip8, Chip8Error, Status};
use emu8_display::Display;

use crate::keymap::keymap;
use crate::Args;

pub(crate) fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut chip8 = Chip8::with_config(args.config());

    // Load ROM
    let file = File::open(&args.rom)?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader)?;
    info!("loaded ROM {}", args.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, args.scale)?;
    let mut events = sdl.event_pump()?;

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / args.hz.max(1);
    let mut last_cycle = Instant::now();

    // Whether or not the step rate should be respected
    let mut fast_forward = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    scancode: Some(code),
                    ..
                } => match (code, keymap(code)) {
                    (_, Some(key)) => chip8.key_press(key)?,
                    (Scancode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    scancode: Some(code),
                    ..
                } => match (code, keymap(code)) {
                    (_, Some(key)) => chip8.key_release(key)?,
                    (Scancode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                Event::Window {
                    win_event: WindowEvent::FocusLost,
                    ..
                } => chip8.release_all_keys(),
                _ => continue,
            };
        }

        // Update state
        match chip8.step() {
            Ok(()) => {}
            // Unknown opcodes only stop the interpreter under FaultPolicy::Halt
            Err(e @ Chip8Error::UnknownOpcode { .. }) if chip8.status() == Status::Running => {
                warn!("{}", e)
            }
            Err(e) => {
                error!("{}", e);
                break 'event;
            }
        }

        // If the frame changed, render it
        chip8.render(&mut display);

        // Handle timing
        let elapsed_cycle_time = last_cycle.elapsed();
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}
