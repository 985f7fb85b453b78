//! Decoded source bitmap shared between renders.

use crate::{PicasciiError, Result};
use image::{DynamicImage, RgbaImage};
use std::path::Path;
use std::sync::Arc;

/// Immutable RGBA bitmap. Cloning shares the pixel data.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: Arc<RgbaImage>,
}

impl SourceImage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_dynamic(&image::open(path)?))
    }

    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self::from(image.to_rgba8())
    }

    /// Wrap a raw RGBA buffer (4 bytes per pixel, row-major).
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let actual = data.len();
        let expected = rgba_len(width, height).ok_or(PicasciiError::MalformedBuffer {
            expected: usize::MAX,
            actual,
        })?;
        if actual != expected {
            return Err(PicasciiError::MalformedBuffer { expected, actual });
        }
        RgbaImage::from_raw(width, height, data)
            .map(Self::from)
            .ok_or(PicasciiError::MalformedBuffer { expected, actual })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width() && y < self.height()).then(|| self.image.get_pixel(x, y).0)
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }
}

/// Byte length of a `width x height` RGBA buffer, `None` if it does not fit in `usize`.
pub fn rgba_len(width: u32, height: u32) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?
        .checked_mul(4)
}

impl From<RgbaImage> for SourceImage {
    fn from(image: RgbaImage) -> Self {
        Self { image: Arc::new(image) }
    }
}
