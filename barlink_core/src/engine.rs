//! Call contract of the recognition and generation engine, and its implementation on top of `rxing`.

use std::io;
use std::path::{Path, PathBuf};

use image::ImageError;

use log::{debug, warn};
use rxing::{
    common::{BitMatrix, HybridBinarizer},
    datamatrix::encoder::SymbolShapeHint,
    BarcodeFormat, BinaryBitmap, DecodeHints as RxingDecodeHints, EncodeHints as RxingEncodeHints,
    Luma8LuminanceSource, MultiFormatReader, MultiFormatWriter, RXingResult, Reader, Writer,
};

use crate::{DecodeHints, Decoded, EncodeHints, Error, HintValue, LumaBuffer, ModuleGrid, Point, Symbology};

/// Failure reported by an [Engine].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Engine diagnostic, naming the failure class (e.g. `NotFoundException`).
    #[error("{0}")]
    Signal(String),
    /// The path to decode does not resolve to a readable file.
    #[error("file not found or not readable: {}", .0.display())]
    MissingResource(PathBuf),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<rxing::Exceptions> for EngineError {
    fn from(value: rxing::Exceptions) -> Self {
        EngineError::Signal(format!("{:?}", value))
    }
}

/// Entry points of a barcode recognition and generation engine.
pub trait Engine {
    /// Decode the image stored at `path`. The engine reads and decodes the file itself.
    fn decode_path(&self, path: &Path, hints: &DecodeHints) -> Result<Decoded, EngineError>;

    /// Decode an encoded image file (PNG, JPEG, ...) held in memory.
    fn decode_encoded(&self, bytes: &[u8], hints: &DecodeHints) -> Result<Decoded, EngineError>;

    /// Decode a canonical luma buffer.
    fn decode_luma(&self, buffer: LumaBuffer, hints: &DecodeHints) -> Result<Decoded, EngineError>;

    /// Generate the module grid of `data` in `symbology`. `width` and `height` are pixel size hints for rendering:
    /// the engine may honour them for linear symbologies, but module counts follow the symbology's rules.
    fn encode(
        &self,
        data: &str,
        symbology: Symbology,
        width: u32,
        height: u32,
        hints: &EncodeHints,
    ) -> Result<ModuleGrid, EngineError>;
}

impl<E: Engine + ?Sized> Engine for &E {
    fn decode_path(&self, path: &Path, hints: &DecodeHints) -> Result<Decoded, EngineError> {
        (**self).decode_path(path, hints)
    }

    fn decode_encoded(&self, bytes: &[u8], hints: &DecodeHints) -> Result<Decoded, EngineError> {
        (**self).decode_encoded(bytes, hints)
    }

    fn decode_luma(&self, buffer: LumaBuffer, hints: &DecodeHints) -> Result<Decoded, EngineError> {
        (**self).decode_luma(buffer, hints)
    }

    fn encode(
        &self,
        data: &str,
        symbology: Symbology,
        width: u32,
        height: u32,
        hints: &EncodeHints,
    ) -> Result<ModuleGrid, EngineError> {
        (**self).encode(data, symbology, width, height, hints)
    }
}

/// [Engine] backed by `rxing`'s multi-format reader and writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RxingEngine;

impl RxingEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for RxingEngine {
    fn decode_path(&self, path: &Path, hints: &DecodeHints) -> Result<Decoded, EngineError> {
        if !path.is_file() {
            return Err(EngineError::MissingResource(path.to_path_buf()));
        }
        debug!("loading {}", path.display());
        let image = image::open(path).map_err(|e| match e {
            ImageError::IoError(source) if is_unreadable(&source) => {
                EngineError::MissingResource(path.to_path_buf())
            }
            other => EngineError::Image(other),
        })?;
        self.decode_luma(LumaBuffer::from(image.into_luma8()), hints)
    }

    fn decode_encoded(&self, bytes: &[u8], hints: &DecodeHints) -> Result<Decoded, EngineError> {
        let image = image::load_from_memory(bytes)?;
        self.decode_luma(LumaBuffer::from(image.into_luma8()), hints)
    }

    fn decode_luma(&self, buffer: LumaBuffer, hints: &DecodeHints) -> Result<Decoded, EngineError> {
        if buffer.is_empty() {
            return Err(EngineError::Signal(
                "NotFoundException: image has no pixels".to_string(),
            ));
        }
        let (width, height) = (buffer.width(), buffer.height());
        debug!("decoding {}x{} luma buffer", width, height);
        let source = Luma8LuminanceSource::new(buffer.into_bytes(), width, height);
        let mut bitmap = BinaryBitmap::new(HybridBinarizer::new(source));
        let mut reader = MultiFormatReader::default();
        let result = reader.decode_with_hints(&mut bitmap, &decode_hints(hints)?)?;
        decoded(result)
    }

    fn encode(
        &self,
        data: &str,
        symbology: Symbology,
        width: u32,
        height: u32,
        hints: &EncodeHints,
    ) -> Result<ModuleGrid, EngineError> {
        let (width, height) = (size_hint(width)?, size_hint(height)?);
        debug!("encoding {} bytes as {} ({}x{} hint)", data.len(), symbology, width, height);
        let format = BarcodeFormat::from(symbology);
        let hints = encode_hints(hints)?;
        let matrix = MultiFormatWriter.encode_with_hints(data, &format, width, height, &hints)?;
        Ok(module_grid(&matrix))
    }
}

fn is_unreadable(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    )
}

fn size_hint(value: u32) -> Result<i32, EngineError> {
    i32::try_from(value).map_err(|_| {
        EngineError::Signal(format!("IllegalArgumentException: size hint {} is too large", value))
    })
}

fn bad_hint(error: Error) -> EngineError {
    EngineError::Signal(format!("IllegalArgumentException: {}", error))
}

/// Translate [DecodeHints] into the reader's hint set, including the passthrough hints the reader knows.
fn decode_hints(hints: &DecodeHints) -> Result<RxingDecodeHints, EngineError> {
    let mut translated = RxingDecodeHints::default();
    translated.TryHarder = hints.try_harder;
    translated.PureBarcode = hints.pure_barcode;
    translated.CharacterSet = hints.character_set.clone();
    translated.AlsoInverted = hints.also_inverted;
    translated.PossibleFormats = hints
        .possible_formats
        .as_ref()
        .map(|formats| formats.iter().copied().map(BarcodeFormat::from).collect());
    for (key, value) in &hints.passthrough {
        let value = value.clone();
        match key.to_ascii_uppercase().as_str() {
            "OTHER" => translated.Other = Some(value.into_text(key).map_err(bad_hint)?),
            "ALLOWED_LENGTHS" => {
                translated.AllowedLengths = Some(value.into_uint_list(key).map_err(bad_hint)?)
            }
            "ASSUME_CODE_39_CHECK_DIGIT" => {
                translated.AssumeCode39CheckDigit = Some(value.into_flag(key).map_err(bad_hint)?)
            }
            "ASSUME_GS1" => translated.AssumeGs1 = Some(value.into_flag(key).map_err(bad_hint)?),
            "RETURN_CODABAR_START_END" => {
                translated.ReturnCodabarStartEnd = Some(value.into_flag(key).map_err(bad_hint)?)
            }
            "ALLOWED_EAN_EXTENSIONS" => {
                translated.AllowedEanExtensions = Some(value.into_uint_list(key).map_err(bad_hint)?)
            }
            "QR_ASSUME_SPEC_CONFORM_INPUT" => {
                translated.QrAssumeSpecConformInput = Some(value.into_flag(key).map_err(bad_hint)?)
            }
            "TELEPEN_AS_NUMERIC" => {
                translated.TelepenAsNumeric = Some(value.into_flag(key).map_err(bad_hint)?)
            }
            _ => warn!("rxing does not interpret decode hint '{}', ignoring it", key),
        }
    }
    Ok(translated)
}

/// Translate [EncodeHints] into the writer's hint set, including the passthrough hints the writer knows.
fn encode_hints(hints: &EncodeHints) -> Result<RxingEncodeHints, EngineError> {
    let mut translated = RxingEncodeHints::default();
    translated.ErrorCorrection = hints.error_correction.clone();
    translated.CharacterSet = hints.character_set.clone();
    translated.Margin = hints.margin.map(|margin| margin.to_string());
    translated.QrVersion = hints.qr_version.map(|version| version.to_string());
    for (key, value) in &hints.passthrough {
        let value = value.clone();
        match key.to_ascii_uppercase().as_str() {
            "DATA_MATRIX_SHAPE" => translated.DataMatrixShape = Some(symbol_shape(key, value)?),
            "DATA_MATRIX_COMPACT" => {
                translated.DataMatrixCompact = Some(value.into_flag(key).map_err(bad_hint)?)
            }
            "PDF417_COMPACT" => translated.Pdf417Compact = Some(switch_text(key, value)?),
            "PDF417_COMPACTION" => {
                translated.Pdf417Compaction = Some(value.into_text(key).map_err(bad_hint)?)
            }
            "PDF417_AUTO_ECI" => translated.Pdf417AutoEci = Some(switch_text(key, value)?),
            "AZTEC_LAYERS" => translated.AztecLayers = Some(value.into_int(key).map_err(bad_hint)?),
            "QR_MASK_PATTERN" => {
                translated.QrMaskPattern = Some(value.into_text(key).map_err(bad_hint)?)
            }
            "QR_COMPACT" => translated.QrCompact = Some(switch_text(key, value)?),
            "GS1_FORMAT" => translated.Gs1Format = Some(value.into_flag(key).map_err(bad_hint)?),
            "FORCE_CODE_SET" => {
                translated.ForceCodeSet = Some(value.into_text(key).map_err(bad_hint)?)
            }
            "FORCE_C40" => translated.ForceC40 = Some(value.into_flag(key).map_err(bad_hint)?),
            "CODE128_COMPACT" => {
                translated.Code128Compact = Some(value.into_flag(key).map_err(bad_hint)?)
            }
            "TELEPEN_AS_NUMERIC" => {
                translated.TelepenAsNumeric = Some(value.into_flag(key).map_err(bad_hint)?)
            }
            _ => warn!("rxing does not interpret encode hint '{}', ignoring it", key),
        }
    }
    Ok(translated)
}

/// Read a hint the writer takes as a "true"/"false" string.
fn switch_text(key: &str, value: HintValue) -> Result<String, EngineError> {
    match value {
        HintValue::Flag(flag) => Ok(flag.to_string()),
        other => other.into_text(key).map_err(bad_hint),
    }
}

fn symbol_shape(key: &str, value: HintValue) -> Result<SymbolShapeHint, EngineError> {
    let name = value.into_text(key).map_err(bad_hint)?;
    match name.trim().to_ascii_uppercase().as_str() {
        "FORCE_NONE" => Ok(SymbolShapeHint::FORCE_NONE),
        "FORCE_SQUARE" => Ok(SymbolShapeHint::FORCE_SQUARE),
        "FORCE_RECTANGLE" => Ok(SymbolShapeHint::FORCE_RECTANGLE),
        _ => Err(EngineError::Signal(format!(
            "IllegalArgumentException: hint {} must be FORCE_NONE, FORCE_SQUARE or FORCE_RECTANGLE, got '{}'",
            key, name
        ))),
    }
}

fn decoded(result: RXingResult) -> Result<Decoded, EngineError> {
    let symbology = Symbology::try_from(result.getBarcodeFormat())
        .map_err(|e| EngineError::Signal(format!("FormatException: {}", e)))?;
    Ok(Decoded {
        text: result.getText().to_string(),
        raw_bytes: result.getRawBytes().to_vec(),
        num_bits: result.getNumBits(),
        points: result
            .getPoints()
            .iter()
            .map(|p| Point::new(p.x, p.y))
            .collect(),
        symbology,
        metadata: result
            .getRXingResultMetadata()
            .iter()
            .map(|(k, v)| (format!("{:?}", k), format!("{:?}", v)))
            .collect(),
        timestamp: result.getTimestamp(),
    })
}

fn module_grid(matrix: &BitMatrix) -> ModuleGrid {
    let (width, height) = (matrix.getWidth(), matrix.getHeight());
    ModuleGrid::from_fn(width as usize, height as usize, |x, y| {
        matrix.get(x as u32, y as u32)
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = RxingEngine
            .decode_path(Path::new("no/such/dir/code.png"), &DecodeHints::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingResource(_)));
    }

    #[test]
    fn test_directory_is_missing_resource() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = RxingEngine
            .decode_path(dir.path(), &DecodeHints::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingResource(path) if path == dir.path()));
    }

    #[test]
    fn test_blank_buffer_is_not_found() {
        let buffer = LumaBuffer::new(64, 64, vec![255; 64 * 64]).unwrap();
        let err = RxingEngine
            .decode_luma(buffer, &DecodeHints::default())
            .unwrap_err();
        assert!(err.to_string().contains("NotFound"), "{err}");
    }

    #[test]
    fn test_empty_buffer_is_not_found() {
        let buffer = LumaBuffer::new(0, 0, Vec::new()).unwrap();
        let err = RxingEngine
            .decode_luma(buffer, &DecodeHints::default())
            .unwrap_err();
        assert!(err.to_string().contains("NotFound"), "{err}");
    }

    #[test]
    fn test_garbage_bytes_are_an_image_error() {
        let err = RxingEngine
            .decode_encoded(b"definitely not an image", &DecodeHints::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::Image(_)));
    }

    #[test]
    fn test_encode_qr_with_zero_margin() {
        let hints = EncodeHints::new().with_margin(0);
        let grid = RxingEngine
            .encode("Hello", Symbology::QrCode, 0, 0, &hints)
            .unwrap();
        assert_eq!((grid.width(), grid.height()), (21, 21));
    }

    #[test]
    fn test_decode_hints_translation() {
        let hints = DecodeHints::new()
            .with_try_harder(true)
            .with_possible_formats([Symbology::QrCode, Symbology::Ean8])
            .with_passthrough("SOMETHING_ELSE", true);
        let translated = decode_hints(&hints).unwrap();
        assert_eq!(translated.TryHarder, Some(true));
        let formats = translated.PossibleFormats.unwrap();
        assert_eq!(formats.len(), 2);
        assert!(formats.contains(&BarcodeFormat::QR_CODE));
        assert!(formats.contains(&BarcodeFormat::EAN_8));
    }

    #[test]
    fn test_encode_hints_translation() {
        let hints = EncodeHints::new()
            .with_margin(2)
            .with_error_correction("Q")
            .with_qr_version(3)
            .unwrap();
        let translated = encode_hints(&hints).unwrap();
        assert_eq!(translated.Margin.as_deref(), Some("2"));
        assert_eq!(translated.ErrorCorrection.as_deref(), Some("Q"));
        assert_eq!(translated.QrVersion.as_deref(), Some("3"));
    }

    #[test]
    fn test_decode_passthrough_reaches_reader() {
        let hints = DecodeHints::from_options([
            ("allowed_lengths", HintValue::from(vec!["8", "13"])),
            ("ASSUME_GS1", HintValue::from(true)),
            ("Return_Codabar_Start_End", HintValue::from(true)),
            ("ALLOWED_EAN_EXTENSIONS", HintValue::from("2, 5")),
        ])
        .unwrap();
        let translated = decode_hints(&hints).unwrap();
        assert_eq!(translated.AllowedLengths, Some(vec![8, 13]));
        assert_eq!(translated.AssumeGs1, Some(true));
        assert_eq!(translated.ReturnCodabarStartEnd, Some(true));
        assert_eq!(translated.AllowedEanExtensions, Some(vec![2, 5]));
    }

    #[test]
    fn test_encode_passthrough_reaches_writer() {
        let hints = EncodeHints::new()
            .with_passthrough("data_matrix_shape", "force_rectangle")
            .with_passthrough("PDF417_COMPACT", true)
            .with_passthrough("AZTEC_LAYERS", -2i64)
            .with_passthrough("QR_MASK_PATTERN", 3u32)
            .with_passthrough("GS1_FORMAT", true);
        let translated = encode_hints(&hints).unwrap();
        assert_eq!(translated.DataMatrixShape, Some(SymbolShapeHint::FORCE_RECTANGLE));
        assert_eq!(translated.Pdf417Compact.as_deref(), Some("true"));
        assert_eq!(translated.AztecLayers, Some(-2));
        assert_eq!(translated.QrMaskPattern.as_deref(), Some("3"));
        assert_eq!(translated.Gs1Format, Some(true));
    }

    #[test]
    fn test_malformed_passthrough_is_an_argument_signal() {
        let hints = DecodeHints::new().with_passthrough("ALLOWED_LENGTHS", "eight");
        let err = decode_hints(&hints).err().unwrap();
        assert!(err.to_string().starts_with("IllegalArgumentException"), "{err}");

        let hints = EncodeHints::new().with_passthrough("DATA_MATRIX_SHAPE", "TRIANGLE");
        let err = encode_hints(&hints).unwrap_err();
        assert!(err.to_string().contains("DATA_MATRIX_SHAPE"), "{err}");
    }

    #[test]
    fn test_rectangle_shape_changes_data_matrix() {
        let plain = RxingEngine
            .encode("Hello world 123", Symbology::DataMatrix, 0, 0, &EncodeHints::default())
            .unwrap();
        let hints = EncodeHints::new().with_passthrough("DATA_MATRIX_SHAPE", "FORCE_RECTANGLE");
        let rectangle = RxingEngine
            .encode("Hello world 123", Symbology::DataMatrix, 0, 0, &hints)
            .unwrap();
        assert_eq!(plain.width(), plain.height());
        assert!(rectangle.width() > rectangle.height());
    }
}
