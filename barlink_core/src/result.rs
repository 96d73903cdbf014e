use std::collections::BTreeMap;

use crate::Symbology;

/// Location of a symbol feature (e.g. a finder pattern) in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A symbol decoded by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub text: String,
    pub raw_bytes: Vec<u8>,
    pub num_bits: usize,
    pub points: Vec<Point>,
    pub symbology: Symbology,
    pub metadata: BTreeMap<String, String>,
    /// Engine timestamp of the decode, in milliseconds since the Unix epoch.
    pub timestamp: u128,
}

impl Decoded {
    /// Construct a result carrying only `text` and `symbology`.
    pub fn new(symbology: Symbology, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            raw_bytes: Vec::new(),
            num_bits: 0,
            points: Vec::new(),
            symbology,
            metadata: BTreeMap::new(),
            timestamp: 0,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn symbology(&self) -> Symbology {
        self.symbology
    }
}
