//! Raster rendering of module grids and atomic image file output.

use std::io::{BufWriter, Write};
use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use log::debug;
use tempfile::NamedTempFile;

use barlink_core::{ModuleGrid, Result};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Renders a [ModuleGrid] as a black and white grayscale image.
#[derive(Debug, Clone, Copy)]
pub struct ImageRenderer {
    module_size: u32,
}

impl ImageRenderer {
    /// Construct a new [ImageRenderer] drawing one pixel per module.
    pub fn new() -> Self {
        Self { module_size: 1 }
    }

    /// Draw each module as a `pixels` by `pixels` square. Zero is treated as one.
    pub fn with_module_size(mut self, pixels: u32) -> Self {
        self.module_size = pixels.max(1);
        self
    }

    pub fn module_size(&self) -> u32 {
        self.module_size
    }

    /// Render `grid`: dark modules are black (0), light ones white (255). An empty grid yields a 0x0 image.
    pub fn render(&self, grid: &ModuleGrid) -> GrayImage {
        if grid.is_empty() {
            return GrayImage::new(0, 0);
        }
        let scale = self.module_size;
        let width = u32::try_from(grid.width()).unwrap_or(u32::MAX).saturating_mul(scale);
        let height = u32::try_from(grid.height()).unwrap_or(u32::MAX).saturating_mul(scale);
        GrayImage::from_fn(width, height, |x, y| {
            let (mx, my) = ((x / scale) as usize, (y / scale) as usize);
            if grid.is_dark(mx, my) {
                DARK
            } else {
                LIGHT
            }
        })
    }
}

impl Default for ImageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `image` to `path` in `format`. The image is written to a temporary file next to `path` which then replaces
/// the destination, so a failed write never leaves a partial file behind.
pub fn save(image: &GrayImage, path: &Path, format: ImageFormat) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        image.write_to(&mut writer, format)?;
        writer.flush()?;
    }
    file.persist(path).map_err(|e| e.error)?;
    debug!(
        "wrote {}x{} {:?} image to {}",
        image.width(),
        image.height(),
        format,
        path.display()
    );
    Ok(())
}
