mod barcode;
mod encode;
pub mod raster;
mod render;

pub use barcode::Barcode;
pub use encode::{Encoder, DEFAULT_SIZE_HINT};
pub use raster::ImageRenderer;
pub use render::AsciiRenderer;
