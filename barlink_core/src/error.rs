use std::path::PathBuf;

use log::debug;

use crate::engine::EngineError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced to callers of the decode and encode operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input cannot be turned into a pixel buffer. Raised before the engine is called.
    #[error("unsupported input: {0}")]
    UnsupportedInputKind(UnsupportedInput),
    /// A caller-supplied format name, hint or buffer is invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The path to decode does not resolve to a readable file.
    #[error("file not found or not readable: {}", .0.display())]
    ResourceNotFound(PathBuf),
    /// The engine located no symbol in the image.
    #[error("no barcode found: {0}")]
    NotFound(String),
    /// The engine located a symbol but could not validate or decode its payload.
    #[error("barcode could not be decoded: {0}")]
    FormatError(String),
    #[error("image codec failure: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why a decode input was rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnsupportedInput {
    #[error("pixel arrays must hold uint8 elements, got {0}")]
    ElementType(&'static str),
    #[error("pixel arrays must be 2D (grayscale) or 3D with 3 (RGB) or 4 (RGBA) channels, got shape {0:?}")]
    Shape(Vec<usize>),
}

impl From<UnsupportedInput> for Error {
    fn from(value: UnsupportedInput) -> Self {
        Error::UnsupportedInputKind(value)
    }
}

/// Failure classes the engine signals through its diagnostic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    NotFound,
    Format,
    Argument,
    Other,
}

fn classify_tokens(text: &str) -> Signal {
    const FORMAT_TOKENS: [&str; 3] = ["Checksum", "Format", "ReedSolomon"];
    const ARGUMENT_TOKENS: [&str; 2] = ["IllegalArgument", "UnsupportedOperation"];
    if text.contains("NotFound") {
        Signal::NotFound
    } else if ARGUMENT_TOKENS.iter().any(|token| text.contains(token)) {
        Signal::Argument
    } else if FORMAT_TOKENS.iter().any(|token| text.contains(token)) {
        Signal::Format
    } else {
        Signal::Other
    }
}

/// Classify on the exception name heading the message first, so that free text inside it cannot win.
fn classify(message: &str) -> Signal {
    let head = message.split(['(', ':']).next().unwrap_or(message);
    match classify_tokens(head) {
        Signal::Other => classify_tokens(message),
        signal => signal,
    }
}

impl Error {
    /// Map a failure of one of the engine's decode entry points.
    pub fn from_decode_failure(failure: EngineError) -> Self {
        let error = match failure {
            EngineError::Signal(message) => match classify(&message) {
                Signal::NotFound => Error::NotFound(message),
                Signal::Argument => Error::InvalidArgument(message),
                Signal::Format | Signal::Other => Error::FormatError(message),
            },
            EngineError::MissingResource(path) => Error::ResourceNotFound(path),
            EngineError::Image(e) => Error::Image(e),
            EngineError::Io(e) => Error::Io(e),
        };
        debug!("decode failed: {}", error);
        error
    }

    /// Map a failure of the engine's generation entry point. Every signal is a bad argument from the caller's point
    /// of view: too much data for the symbology, or data the symbology cannot represent.
    pub fn from_encode_failure(failure: EngineError) -> Self {
        let error = match failure {
            EngineError::Signal(message) => {
                Error::InvalidArgument(format!("encoding failed: {}", message))
            }
            EngineError::MissingResource(path) => Error::ResourceNotFound(path),
            EngineError::Image(e) => Error::Image(e),
            EngineError::Io(e) => Error::Io(e),
        };
        debug!("encode failed: {}", error);
        error
    }
}
