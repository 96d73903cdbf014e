//! Conversion of in-memory images and pixel arrays into the canonical luma buffer.

use image::{DynamicImage, ImageBuffer, Pixel, RgbImage, RgbaImage};
use log::debug;
use ndarray::ArrayViewD;

use barlink_core::{Error, LumaBuffer, Result, UnsupportedInput};

use crate::PixelArray;

/// Canonicalize a decoded image. Single-channel 8-bit images are used as they are, anything else goes through the
/// image crate's luma conversion.
pub fn from_image(image: &DynamicImage) -> LumaBuffer {
    match image {
        DynamicImage::ImageLuma8(gray) => LumaBuffer::from(gray.clone()),
        other => {
            debug!("converting {:?} image to luma", other.color());
            LumaBuffer::from(other.to_luma8())
        }
    }
}

/// Canonicalize a pixel array: `uint8` elements, shaped `(height, width)` or `(height, width, 3 | 4)`.
pub fn from_array(array: &PixelArray<'_>) -> Result<LumaBuffer> {
    let PixelArray::U8(view) = array else {
        return Err(UnsupportedInput::ElementType(array.element_type()).into());
    };
    match *view.shape() {
        [height, width] => {
            let (width, height) = dimensions(view, width, height)?;
            LumaBuffer::new(width, height, row_major(view))
        }
        [height, width, 3] => {
            let (width, height) = dimensions(view, width, height)?;
            let rgb: RgbImage = image_buffer(width, height, row_major(view))?;
            Ok(from_image(&DynamicImage::ImageRgb8(rgb)))
        }
        [height, width, 4] => {
            let (width, height) = dimensions(view, width, height)?;
            let rgba: RgbaImage = image_buffer(width, height, row_major(view))?;
            Ok(from_image(&DynamicImage::ImageRgba8(rgba)))
        }
        _ => Err(UnsupportedInput::Shape(view.shape().to_vec()).into()),
    }
}

fn dimensions(view: &ArrayViewD<'_, u8>, width: usize, height: usize) -> Result<(u32, u32)> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(UnsupportedInput::Shape(view.shape().to_vec()).into()),
    }
}

/// Collect the elements in logical order, which is row-major whatever the view's memory layout.
fn row_major(view: &ArrayViewD<'_, u8>) -> Vec<u8> {
    match view.as_slice() {
        Some(contiguous) => contiguous.to_vec(),
        None => view.iter().copied().collect(),
    }
}

fn image_buffer<P>(width: u32, height: u32, data: Vec<u8>) -> Result<ImageBuffer<P, Vec<u8>>>
where
    P: Pixel<Subpixel = u8>,
{
    ImageBuffer::from_raw(width, height, data).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "pixel data does not fill a {}x{} image with {} channels",
            width,
            height,
            P::CHANNEL_COUNT
        ))
    })
}
