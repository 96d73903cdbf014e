use log::debug;

use barlink_core::{EncodeHints, Engine, Error, Result, RxingEngine, Symbology};

use crate::Barcode;

/// Size hint used when none is given, as `(width, height)`.
pub const DEFAULT_SIZE_HINT: (u32, u32) = (29, 29);

/// Encoder for barcodes of any symbology the engine supports.
///
/// The size set with [Encoder::with_size] is a hint for the pixel size of a rendered image, 29 by 29 unless told
/// otherwise. It does not choose the number of modules: a QR code holding "Hello" has 21 modules per side plus the
/// quiet zone, and grows past the hint when the payload needs it. Linear symbologies take the height hint as their
/// row count, and 2D symbologies smaller than the hint are scaled up to it.
pub struct Encoder<E = RxingEngine> {
    engine: E,
    width: u32,
    height: u32,
    hints: EncodeHints,
}

impl Encoder {
    /// Construct a new encoder backed by `rxing`, with the default size hint and no hints.
    pub fn new() -> Self {
        Self::with_engine(RxingEngine)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Engine> Encoder<E> {
    /// Construct a new encoder on top of `engine`.
    pub fn with_engine(engine: E) -> Self {
        let (width, height) = DEFAULT_SIZE_HINT;
        Self {
            engine,
            width,
            height,
            hints: EncodeHints::default(),
        }
    }

    /// Hint the pixel size of the rendered image. Zero means no preference.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Use `hints` for every encode.
    pub fn with_hints(mut self, hints: EncodeHints) -> Self {
        self.hints = hints;
        self
    }

    /// Get the `(width, height)` size hint.
    pub fn size_hint(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn hints(&self) -> &EncodeHints {
        &self.hints
    }

    /// Encode `data` as a barcode of the given `symbology`.
    pub fn encode(&self, data: &str, symbology: Symbology) -> Result<Barcode> {
        let grid = self
            .engine
            .encode(data, symbology, self.width, self.height, &self.hints)
            .map_err(Error::from_encode_failure)?;
        debug!(
            "encoded {} as {}x{} modules",
            symbology,
            grid.width(),
            grid.height()
        );
        Ok(Barcode::new(grid, symbology))
    }
}
