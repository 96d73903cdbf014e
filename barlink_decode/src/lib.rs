pub mod canonical;
mod decode;
mod source;

pub use decode::Decoder;
pub use source::{DecodeSource, PixelArray};
