//! Decode and generate barcodes from whatever image representation is at hand.
//!
//! ```no_run
//! let barcode = barlink::encode("Hello", "QR_CODE")?;
//! barcode.save("hello.png")?;
//! let decoded = barlink::decode("hello.png")?;
//! assert_eq!(decoded.text(), "Hello");
//! # Ok::<(), barlink::Error>(())
//! ```

pub use barlink_core::{
    engine, hints, DecodeHints, Decoded, EncodeHints, Engine, EngineError, Error, HintValue,
    LumaBuffer, Module, ModuleGrid, Point, Result, RxingEngine, Symbology, UnsupportedInput,
};
pub use barlink_decode::{canonical, DecodeSource, Decoder, PixelArray};
pub use barlink_encode::{raster, AsciiRenderer, Barcode, Encoder, ImageRenderer, DEFAULT_SIZE_HINT};
pub use image;
pub use ndarray;

/// Decode the first barcode found in `source`: a path, encoded image bytes, an image or a pixel array.
pub fn decode<'a, S: Into<DecodeSource<'a>>>(source: S) -> Result<Decoded> {
    Decoder::new().decode(source)
}

/// Decode the first barcode found in `source` using `hints`.
pub fn decode_with_hints<'a, S: Into<DecodeSource<'a>>>(
    source: S,
    hints: DecodeHints,
) -> Result<Decoded> {
    Decoder::new().with_hints(hints).decode(source)
}

/// Decode raw 8-bit luma samples laid out row-major.
pub fn decode_luma_pixels(
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    hints: DecodeHints,
) -> Result<Decoded> {
    let buffer = LumaBuffer::new(width, height, pixels)?;
    Decoder::new().with_hints(hints).decode_luma(buffer)
}

/// Encode `data` in the symbology named `format` (e.g. `QR_CODE`, `CODE_128`) with the default
/// [DEFAULT_SIZE_HINT] of 29 by 29.
pub fn encode(data: &str, format: &str) -> Result<Barcode> {
    let (width, height) = DEFAULT_SIZE_HINT;
    encode_with(data, format, width, height, EncodeHints::default())
}

/// Encode `data` in the symbology named `format`. `width` and `height` hint the pixel size of a rendered image; the
/// module count of the result is up to the symbology.
pub fn encode_with(
    data: &str,
    format: &str,
    width: u32,
    height: u32,
    hints: EncodeHints,
) -> Result<Barcode> {
    let symbology: Symbology = format.parse()?;
    Encoder::new()
        .with_size(width, height)
        .with_hints(hints)
        .encode(data, symbology)
}
