/// # Renderer
/// A sink for the contents of the frame buffer.
///
/// The interpreter never draws to the screen itself. After a frame changes the
/// host hands it a renderer and the frame is replayed as a `clear`, one
/// `set_pixel` per lit pixel, and a final `present`.
pub trait Renderer {
    /// Turns every pixel off.
    fn clear(&mut self);

    /// Turns the pixel at `x`, `y` on or off.
    fn set_pixel(&mut self, x: usize, y: usize, on: bool);

    /// Shows everything drawn since the last `present`.
    fn present(&mut self);
}
