pub mod engine;
mod error;
mod grid;
pub mod hints;
mod luma;
mod result;
mod symbology;

pub use engine::{Engine, EngineError, RxingEngine};
pub use error::{Error, Result, UnsupportedInput};
pub use grid::{Module, ModuleGrid};
pub use hints::{DecodeHints, EncodeHints, HintValue};
pub use luma::LumaBuffer;
pub use result::{Decoded, Point};
pub use symbology::Symbology;
