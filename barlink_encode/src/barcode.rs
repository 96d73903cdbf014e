use std::path::Path;

use image::{GrayImage, ImageFormat};
use ndarray::Array2;

use barlink_core::{Module, ModuleGrid, Result, Symbology};

use crate::{raster, AsciiRenderer, ImageRenderer};

/// Text preview of a barcode without modules.
const EMPTY_PREVIEW: &str = "<Barcode (empty)>";

/// An encoded barcode: the engine's module grid along with the symbology it follows.
///
/// Dimensions are those of the engine's grid. For 2D symbologies the module count follows from the payload and the
/// symbology's capacity rules (plus the quiet zone the engine adds); a symbol smaller than the size hint is scaled up
/// to fill it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode {
    grid: ModuleGrid,
    symbology: Symbology,
}

impl Barcode {
    pub fn new(grid: ModuleGrid, symbology: Symbology) -> Self {
        Self { grid, symbology }
    }

    /// Number of modules per row.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    pub fn grid(&self) -> &ModuleGrid {
        &self.grid
    }

    /// Get the module at column `x` and row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<Module> {
        self.grid.get(x, y)
    }

    /// Render as a black and white image, one pixel per module.
    pub fn to_image(&self) -> GrayImage {
        ImageRenderer::new().render(&self.grid)
    }

    /// Get the modules as a `(height, width)` array, `true` for dark modules.
    pub fn to_array(&self) -> Array2<bool> {
        Array2::from_shape_fn((self.height(), self.width()), |(y, x)| self.grid.is_dark(x, y))
    }

    /// Render as text, dark modules as "██" and light ones as two spaces. A barcode without modules renders as a
    /// placeholder.
    pub fn to_text(&self) -> String {
        self.to_text_with(&AsciiRenderer::new())
    }

    /// Render as text with the patterns of `renderer`. A barcode without modules renders as a placeholder.
    pub fn to_text_with(&self, renderer: &AsciiRenderer) -> String {
        if self.grid.is_empty() {
            return EMPTY_PREVIEW.to_string();
        }
        renderer.render_to_string(&self.grid)
    }

    /// Save as a PNG image at `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_as(path, ImageFormat::Png)
    }

    /// Save as an image in `format` at `path`, replacing any existing file.
    pub fn save_as<P: AsRef<Path>>(&self, path: P, format: ImageFormat) -> Result<()> {
        raster::save(&self.to_image(), path.as_ref(), format)
    }

    pub fn into_grid(self) -> ModuleGrid {
        self.grid
    }
}

impl AsRef<ModuleGrid> for Barcode {
    fn as_ref(&self) -> &ModuleGrid {
        self.grid()
    }
}

impl From<Barcode> for ModuleGrid {
    fn from(value: Barcode) -> Self {
        value.grid
    }
}

impl std::fmt::Display for Barcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod test {
    use tempfile::TempDir;

    use super::*;

    fn diagonal(size: usize) -> Barcode {
        Barcode::new(ModuleGrid::from_fn(size, size, |x, y| x == y), Symbology::QrCode)
    }

    #[test]
    fn test_to_array_is_row_major() {
        let barcode = Barcode::new(ModuleGrid::from_fn(3, 2, |x, y| x == 2 && y == 0), Symbology::Code128);
        let array = barcode.to_array();
        assert_eq!(array.shape(), &[2, 3]);
        assert!(array[(0, 2)]);
        assert_eq!(array.iter().filter(|dark| **dark).count(), 1);
    }

    #[test]
    fn test_to_image_matches_dimensions() {
        let barcode = diagonal(5);
        let image = barcode.to_image();
        assert_eq!(image.dimensions(), (5, 5));
        assert_eq!(image.get_pixel(3, 3).0, [0]);
        assert_eq!(image.get_pixel(3, 2).0, [255]);
    }

    #[test]
    fn test_text_preview() {
        let text = diagonal(2).to_string();
        assert_eq!(text, "██  \n  ██");
    }

    #[test]
    fn test_text_preview_with_inverted_patterns() {
        let renderer = AsciiRenderer::with_patterns("X", "_").inverted();
        assert_eq!(diagonal(2).to_text_with(&renderer), "_X\nX_");
    }

    #[test]
    fn test_empty_text_preview_is_a_placeholder() {
        let empty = Barcode::new(ModuleGrid::from_fn(0, 0, |_, _| false), Symbology::QrCode);
        assert_eq!(empty.to_text(), EMPTY_PREVIEW);
        assert_eq!(empty.to_text_with(&AsciiRenderer::with_patterns("#", ".")), EMPTY_PREVIEW);
        assert!(!empty.to_text().is_empty());
        assert_eq!(empty.to_image().dimensions(), (0, 0));
        assert_eq!(empty.to_array().shape(), &[0, 0]);
    }

    #[test]
    fn test_save_writes_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("diagonal.png");
        let barcode = diagonal(6);
        barcode.save(&path).unwrap();
        let reloaded = image::open(&path).unwrap().into_luma8();
        assert_eq!(reloaded, barcode.to_image());
    }

    #[test]
    fn test_save_as_other_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("diagonal.bmp");
        diagonal(6).save_as(&path, ImageFormat::Bmp).unwrap();
        assert_eq!(image::ImageFormat::from_path(&path).unwrap(), ImageFormat::Bmp);
        assert_eq!(image::open(&path).unwrap().into_luma8().dimensions(), (6, 6));
    }
}
