mod common;

use barlink::image::DynamicImage;
use barlink::{EncodeHints, Error, HintValue, Symbology};
use common::qr_code;
use tempfile::TempDir;

/// Quiet zone the engine adds around QR codes by default, in modules.
const QR_QUIET_ZONE: usize = 4;

#[test]
fn test_qr_size_follows_the_payload() {
    let barcode = barlink::encode("Hello", "QR_CODE").unwrap();
    assert_eq!(barcode.symbology(), Symbology::QrCode);
    assert_eq!(barcode.width(), barcode.height());
    let modules = barcode.width() - 2 * QR_QUIET_ZONE;
    assert!(modules >= 21 && (modules - 21) % 4 == 0, "{modules} is not a QR size");
}

#[test]
fn test_qr_grows_past_the_default_hint() {
    let barcode = barlink::encode(&"x".repeat(60), "QR_CODE").unwrap();
    assert_eq!(barcode.width(), barcode.height());
    assert!(barcode.width() > 29);
    let modules = barcode.width() - 2 * QR_QUIET_ZONE;
    assert!(modules > 21 && (modules - 21) % 4 == 0, "{modules} is not a QR size");
}

#[test]
fn test_default_hint_sets_linear_height() {
    let barcode = barlink::encode("Hello", "CODE_128").unwrap();
    assert!(barcode.width() > 29);
    assert_eq!(barcode.height(), 29);
}

#[test]
fn test_qr_without_margin_is_version_one() {
    let hints = EncodeHints::from_options([("MARGIN", HintValue::from(0u32))]).unwrap();
    let barcode = barlink::encode_with("Hello", "QR_CODE", 0, 0, hints).unwrap();
    assert_eq!((barcode.width(), barcode.height()), (21, 21));
}

#[test]
fn test_code128_honours_height_hint() {
    let barcode = barlink::encode_with("Test1234", "CODE_128", 300, 100, EncodeHints::default()).unwrap();
    assert!(barcode.width() > 0);
    assert_eq!(barcode.height(), 100);
}

#[test]
fn test_unknown_format_is_invalid_argument() {
    let err = barlink::encode("data", "INVALID_FORMAT_XYZ").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(ref msg) if msg.contains("INVALID_FORMAT_XYZ")), "{err}");
}

#[test]
fn test_data_too_big_is_invalid_argument() {
    let hints = EncodeHints::new().with_qr_version(1).unwrap();
    let data = "x".repeat(500);
    let err = barlink::encode_with(&data, "QR_CODE", 0, 0, hints).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "{err}");
}

#[test]
fn test_unencodable_data_is_invalid_argument() {
    let err = barlink::encode("not digits", "EAN_13").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "{err}");
}

#[test]
fn test_engine_specific_hint_reaches_the_engine() {
    let data = "Hello world 123";
    let square = barlink::encode_with(data, "DATA_MATRIX", 0, 0, EncodeHints::default()).unwrap();
    assert_eq!(square.width(), square.height());

    let hints = EncodeHints::from_options([("DATA_MATRIX_SHAPE", HintValue::from("FORCE_RECTANGLE"))]).unwrap();
    let rectangle = barlink::encode_with(data, "DATA_MATRIX", 0, 0, hints).unwrap();
    assert!(rectangle.width() > rectangle.height(), "{}x{}", rectangle.width(), rectangle.height());
}

#[test]
fn test_bad_engine_specific_hint_is_invalid_argument() {
    let hints = EncodeHints::new().with_passthrough("DATA_MATRIX_SHAPE", "TRIANGLE");
    let err = barlink::encode_with("abc", "DATA_MATRIX", 0, 0, hints).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(ref msg) if msg.contains("DATA_MATRIX_SHAPE")), "{err}");
}

#[test]
fn test_round_trip_through_image() {
    for (text, format, width, height) in [
        ("Test Matrix", "QR_CODE", 200, 200),
        ("Test1234", "CODE_128", 300, 100),
    ] {
        let barcode = barlink::encode_with(text, format, width, height, EncodeHints::default()).unwrap();
        let image = DynamicImage::ImageLuma8(barcode.to_image());
        let decoded = barlink::decode(&image).unwrap();
        assert_eq!(decoded.text(), text, "{format}");
        assert_eq!(decoded.symbology(), barcode.symbology());
    }
}

#[test]
fn test_save_then_decode() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("matrix_save_test.png");
    let barcode = barlink::encode_with("Test Matrix", "QR_CODE", 50, 50, EncodeHints::default()).unwrap();
    barcode.save(&path).unwrap();
    assert!(path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    assert_eq!(barlink::decode(&path).unwrap().text(), "Test Matrix");
}

#[test]
fn test_renderings_agree() {
    let barcode = qr_code("render me");
    let array = barcode.to_array();
    assert_eq!(array.shape(), &[barcode.height(), barcode.width()]);

    let image = barcode.to_image();
    assert_eq!(image.dimensions(), (barcode.width() as u32, barcode.height() as u32));
    for ((y, x), dark) in array.indexed_iter() {
        assert_eq!(image.get_pixel(x as u32, y as u32).0[0] == 0, *dark);
    }

    let text = barcode.to_text();
    assert!(text.contains("██"));
    assert_eq!(text.lines().count(), barcode.height());
}
