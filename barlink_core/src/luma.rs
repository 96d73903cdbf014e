use crate::{Error, Result};

/// Canonical pixel buffer handed to the engine: one 8-bit luma sample per pixel, row-major, no stride padding.
#[derive(Clone, PartialEq, Eq)]
pub struct LumaBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl LumaBuffer {
    /// Construct a new [LumaBuffer]. Fails if `bytes` does not hold exactly `width * height` samples.
    /// # Example
    /// ```
    /// use barlink_core::LumaBuffer;
    /// assert!(LumaBuffer::new(2, 2, vec![0; 4]).is_ok());
    /// assert!(LumaBuffer::new(2, 2, vec![0; 5]).is_err());
    /// ```
    pub fn new(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        let expected = (width as usize).checked_mul(height as usize).ok_or_else(|| {
            Error::InvalidArgument(format!("image dimensions {}x{} overflow", width, height))
        })?;
        if bytes.len() != expected {
            return Err(Error::InvalidArgument(format!(
                "pixel data length {} does not match width * height ({}x{})",
                bytes.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            bytes,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Take the samples out of the buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<image::GrayImage> for LumaBuffer {
    fn from(value: image::GrayImage) -> Self {
        let (width, height) = value.dimensions();
        Self {
            width,
            height,
            bytes: value.into_raw(),
        }
    }
}

impl std::fmt::Debug for LumaBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LumaBuffer({}x{})", self.width, self.height)
    }
}
