use std::path::{Path, PathBuf};

use image::DynamicImage;
use ndarray::{Array, ArrayView, ArrayViewD, Dimension};

/// Numeric pixel array of any rank, tagged with its element type.
#[derive(Debug, Clone)]
pub enum PixelArray<'a> {
    U8(ArrayViewD<'a, u8>),
    I8(ArrayViewD<'a, i8>),
    U16(ArrayViewD<'a, u16>),
    I16(ArrayViewD<'a, i16>),
    U32(ArrayViewD<'a, u32>),
    I32(ArrayViewD<'a, i32>),
    F32(ArrayViewD<'a, f32>),
    F64(ArrayViewD<'a, f64>),
    Bool(ArrayViewD<'a, bool>),
}

impl PixelArray<'_> {
    /// Name of the element type, e.g. `uint8`.
    pub fn element_type(&self) -> &'static str {
        match self {
            PixelArray::U8(_) => "uint8",
            PixelArray::I8(_) => "int8",
            PixelArray::U16(_) => "uint16",
            PixelArray::I16(_) => "int16",
            PixelArray::U32(_) => "uint32",
            PixelArray::I32(_) => "int32",
            PixelArray::F32(_) => "float32",
            PixelArray::F64(_) => "float64",
            PixelArray::Bool(_) => "bool",
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            PixelArray::U8(a) => a.shape(),
            PixelArray::I8(a) => a.shape(),
            PixelArray::U16(a) => a.shape(),
            PixelArray::I16(a) => a.shape(),
            PixelArray::U32(a) => a.shape(),
            PixelArray::I32(a) => a.shape(),
            PixelArray::F32(a) => a.shape(),
            PixelArray::F64(a) => a.shape(),
            PixelArray::Bool(a) => a.shape(),
        }
    }
}

/// An image in one of the shapes the decoder accepts.
#[derive(Debug, Clone)]
pub enum DecodeSource<'a> {
    /// Path to an image file, read by the engine.
    Path(&'a Path),
    /// Encoded image file contents (PNG, JPEG, ...), decoded by the engine.
    Encoded(&'a [u8]),
    /// An image already decoded in memory.
    Image(&'a DynamicImage),
    /// A numeric pixel array.
    Array(PixelArray<'a>),
}

impl<'a> From<&'a Path> for DecodeSource<'a> {
    fn from(value: &'a Path) -> Self {
        DecodeSource::Path(value)
    }
}

impl<'a> From<&'a PathBuf> for DecodeSource<'a> {
    fn from(value: &'a PathBuf) -> Self {
        DecodeSource::Path(value.as_path())
    }
}

impl<'a> From<&'a str> for DecodeSource<'a> {
    fn from(value: &'a str) -> Self {
        DecodeSource::Path(Path::new(value))
    }
}

impl<'a> From<&'a [u8]> for DecodeSource<'a> {
    fn from(value: &'a [u8]) -> Self {
        DecodeSource::Encoded(value)
    }
}

impl<'a> From<&'a Vec<u8>> for DecodeSource<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        DecodeSource::Encoded(value.as_slice())
    }
}

impl<'a> From<&'a DynamicImage> for DecodeSource<'a> {
    fn from(value: &'a DynamicImage) -> Self {
        DecodeSource::Image(value)
    }
}

impl<'a> From<PixelArray<'a>> for DecodeSource<'a> {
    fn from(value: PixelArray<'a>) -> Self {
        DecodeSource::Array(value)
    }
}

macro_rules! pixel_array_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl<'a, D: Dimension> From<ArrayView<'a, $ty, D>> for PixelArray<'a> {
            fn from(value: ArrayView<'a, $ty, D>) -> Self {
                PixelArray::$variant(value.into_dyn())
            }
        }

        impl<'a, D: Dimension> From<&'a Array<$ty, D>> for PixelArray<'a> {
            fn from(value: &'a Array<$ty, D>) -> Self {
                PixelArray::$variant(value.view().into_dyn())
            }
        }

        impl<'a, D: Dimension> From<ArrayView<'a, $ty, D>> for DecodeSource<'a> {
            fn from(value: ArrayView<'a, $ty, D>) -> Self {
                DecodeSource::Array(value.into())
            }
        }

        impl<'a, D: Dimension> From<&'a Array<$ty, D>> for DecodeSource<'a> {
            fn from(value: &'a Array<$ty, D>) -> Self {
                DecodeSource::Array(value.into())
            }
        }
    )*};
}

pixel_array_from! {
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}
