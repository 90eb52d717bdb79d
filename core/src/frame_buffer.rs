use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::render::Renderer;

/// # Frame Buffer
/// The Chip-8 display is composed of 64x32 monochrome pixels.
/// The buffer is indexed as `[y][x]` with the origin in the top left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    /// Whether the pixel at `x`, `y` is on. Anything off the grid is off.
    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Sets the pixel at `x`, `y`; writes off the grid are dropped.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if let Some(pixel) = self.pixels.get_mut(y).and_then(|row| row.get_mut(x)) {
            *pixel = on;
        }
    }

    /// XORs a lit sprite pixel onto the pixel at `x`, `y`.
    ///
    /// Returns whether a lit pixel was turned off. Returns `false` without
    /// touching anything for coordinates off the grid.
    pub fn flip_pixel(&mut self, x: usize, y: usize) -> bool {
        match self.pixels.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(pixel) => {
                let erased = *pixel;
                *pixel = !*pixel;
                erased
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// The whole grid, one row per entry from top to bottom
    pub fn rows(&self) -> &[[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT] {
        &self.pixels
    }

    /// Number of pixels that are on
    pub fn lit(&self) -> usize {
        self.pixels.iter().flatten().filter(|&&on| on).count()
    }

    /// Replays the frame into `renderer` and presents it.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.clear();
        for (y, row) in self.pixels.iter().enumerate() {
            for (x, &on) in row.iter().enumerate() {
                if on {
                    renderer.set_pixel(x, y, true);
                }
            }
        }
        renderer.present();
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
