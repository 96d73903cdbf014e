use std::path::{Path, PathBuf};

use barlink::{Barcode, EncodeHints};

pub const QR_TEXT: &str = "Hello barlink!";

/// Encode `text` as a QR code rendered at roughly 200x200 pixels.
pub fn qr_code(text: &str) -> Barcode {
    barlink::encode_with(text, "QR_CODE", 200, 200, EncodeHints::default()).unwrap()
}

/// Save a QR code of `text` as a PNG file in `dir`.
pub fn qr_png(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("qr.png");
    qr_code(text).save(&path).unwrap();
    path
}
