use log::debug;

use barlink_core::{DecodeHints, Decoded, Engine, Error, LumaBuffer, Result, RxingEngine};

use crate::{canonical, DecodeSource};

/// Decoder dispatching every supported image shape to the matching engine entry point.
pub struct Decoder<E = RxingEngine> {
    engine: E,
    hints: DecodeHints,
}

impl Decoder {
    /// Construct a new decoder backed by `rxing`, without hints.
    pub fn new() -> Self {
        Self::with_engine(RxingEngine)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Engine> Decoder<E> {
    /// Construct a new decoder on top of `engine`.
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            hints: DecodeHints::default(),
        }
    }

    /// Use `hints` for every decode.
    pub fn with_hints(mut self, hints: DecodeHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn hints(&self) -> &DecodeHints {
        &self.hints
    }

    /// Decode the first symbol found in `source`.
    ///
    /// Paths and encoded bytes are handed to the engine untouched. Images and pixel arrays are canonicalized to a
    /// luma buffer first, and rejected before reaching the engine if they cannot be.
    pub fn decode<'a, S: Into<DecodeSource<'a>>>(&self, source: S) -> Result<Decoded> {
        let outcome = match source.into() {
            DecodeSource::Path(path) => {
                debug!("decoding file {}", path.display());
                self.engine.decode_path(path, &self.hints)
            }
            DecodeSource::Encoded(bytes) => {
                debug!("decoding {} encoded bytes", bytes.len());
                self.engine.decode_encoded(bytes, &self.hints)
            }
            DecodeSource::Image(image) => {
                let buffer = canonical::from_image(image);
                self.engine.decode_luma(buffer, &self.hints)
            }
            DecodeSource::Array(array) => {
                let buffer = canonical::from_array(&array)?;
                self.engine.decode_luma(buffer, &self.hints)
            }
        };
        outcome.map_err(Error::from_decode_failure)
    }

    /// Decode a luma buffer the caller already holds.
    pub fn decode_luma(&self, buffer: LumaBuffer) -> Result<Decoded> {
        self.engine
            .decode_luma(buffer, &self.hints)
            .map_err(Error::from_decode_failure)
    }
}
