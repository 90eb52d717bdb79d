use std::error::Error;

use log::error;
use sdl2::pixels::PixelFormatEnum;

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8_core::Renderer;

/// Bytes per pixel of an RGB24 texture
const CHANNELS: usize = 3;

/// # Pixel Buffer
/// An SDL2 RGB24 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
/// Lit pixels are white (255, 255, 255) and unlit ones black.
pub struct PixelBuffer {
    bytes: Vec<u8>,
}

impl PixelBuffer {
    pub fn new() -> Self {
        PixelBuffer {
            bytes: vec![0; DISPLAY_WIDTH * DISPLAY_HEIGHT * CHANNELS],
        }
    }

    pub fn clear(&mut self) {
        self.bytes.iter_mut().for_each(|byte| *byte = 0);
    }

    /// Writes the RGB value for one pixel; pixels off the display are ignored
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            return;
        }
        let start = (y * DISPLAY_WIDTH + x) * CHANNELS;
        let intensity = if on { 255 } else { 0 };
        self.bytes[start..start + CHANNELS].fill(intensity);
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes per row of pixels
    pub fn pitch(&self) -> usize {
        DISPLAY_WIDTH * CHANNELS
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels, drawn in an SDL2 window.
/// Pixels are staged in a `PixelBuffer` and uploaded as a texture when the frame is presented.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    pixels: PixelBuffer,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, Box<dyn Error>> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "Emu-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()?;
        let canvas = window.into_canvas().accelerated().build()?;

        Ok(Display {
            canvas,
            pixels: PixelBuffer::new(),
        })
    }

    /// Uploads the staged pixels as an SDL2 RGB24 texture and renders it.
    fn upload(&mut self) -> Result<(), Box<dyn Error>> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            DISPLAY_WIDTH as u32,
            DISPLAY_HEIGHT as u32,
        )?;
        texture.update(None, self.pixels.bytes(), self.pixels.pitch())?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

impl Renderer for Display {
    fn clear(&mut self) {
        self.pixels.clear();
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        self.pixels.set(x, y, on);
    }

    fn present(&mut self) {
        if let Err(e) = self.upload() {
            error!("unable to present frame: {}", e);
        }
    }
}
