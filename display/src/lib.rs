pub use display::{Display, PixelBuffer};

mod display;
