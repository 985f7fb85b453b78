//! Rasterizer - resizes the source bitmap to the output character grid.
//!
//! One output cell is one pixel of the scaled image. Text glyphs are taller
//! than wide, so the scaled height is multiplied by a vertical stretch
//! factor independently of the width.

use crate::{PicasciiError, Result, SourceImage};
use image::imageops::{self, FilterType};

/// Reference width used by [`ScalingPolicy::Auto`].
pub const AUTO_WIDTH: u32 = 135;
/// Width used by [`ScalingPolicy::Manual`] when the requested one is unusable.
pub const MANUAL_FALLBACK_WIDTH: u32 = 235;

/// Largest grid, in cells, a policy may produce. Keeps the RGBA buffer
/// under 256 MiB, which also fits a 32-bit address space.
pub const MAX_CELLS: u64 = 1 << 26;

const FILTER: FilterType = FilterType::Triangle;

/// How the source bitmap maps onto the character grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalingPolicy {
    /// One cell per source pixel; stretch is ignored.
    PixelPerfect,
    /// Fixed width of [`AUTO_WIDTH`] cells.
    Auto { vertical_stretch: f64 },
    /// Caller-chosen width, [`MANUAL_FALLBACK_WIDTH`] if absent or below 1.
    Manual {
        width: Option<i64>,
        vertical_stretch: f64,
    },
}

/// RGBA buffer at target resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaledImage {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, row-major RGBA.
    pub pixels: Vec<u8>,
}

impl ScalingPolicy {
    /// Target grid size for a source of `width x height` pixels.
    pub fn target_size(&self, width: u32, height: u32) -> Result<(u32, u32)> {
        let (reference, stretch) = match *self {
            ScalingPolicy::PixelPerfect => return checked_size(width as f64, height as f64),
            ScalingPolicy::Auto { vertical_stretch } => (AUTO_WIDTH, vertical_stretch),
            ScalingPolicy::Manual {
                width: requested,
                vertical_stretch,
            } => (manual_width(requested), vertical_stretch),
        };

        // Two steps on purpose: truncation at extreme aspect ratios depends on it
        let scale_factor = width as f64 / reference as f64;
        let target_w = (width as f64 / scale_factor).floor();
        let target_h = (height as f64 / scale_factor * stretch).floor();
        checked_size(target_w, target_h)
    }
}

/// Effective manual width after the fallback rule.
pub fn manual_width(requested: Option<i64>) -> u32 {
    match requested {
        Some(w) if w >= 1 => u32::try_from(w).unwrap_or(u32::MAX),
        _ => MANUAL_FALLBACK_WIDTH,
    }
}

fn checked_size(width: f64, height: f64) -> Result<(u32, u32)> {
    // NaN fails both comparisons
    if width >= 1.0 && height >= 1.0 && width * height <= MAX_CELLS as f64 {
        Ok((width as u32, height as u32))
    } else {
        Err(PicasciiError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        })
    }
}

/// Resize `source` according to `policy`.
pub fn scale(source: &SourceImage, policy: &ScalingPolicy) -> Result<ScaledImage> {
    let (width, height) = policy.target_size(source.width(), source.height())?;
    log::debug!(
        "scaling {}x{} -> {}x{} ({:?})",
        source.width(),
        source.height(),
        width,
        height,
        policy
    );

    let rgba = source.as_rgba();
    let pixels = if (width, height) == rgba.dimensions() {
        rgba.as_raw().clone()
    } else {
        imageops::resize(rgba, width, height, FILTER).into_raw()
    };

    Ok(ScaledImage { width, height, pixels })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, value: u8) -> SourceImage {
        SourceImage::from_rgba(width, height, vec![value; (width * height * 4) as usize]).unwrap()
    }

    #[test]
    fn test_auto_scaling_example() {
        let policy = ScalingPolicy::Auto { vertical_stretch: 1.0 };
        assert_eq!(policy.target_size(270, 180).unwrap(), (135, 90));
    }

    #[test]
    fn test_auto_applies_stretch_to_height_only() {
        let policy = ScalingPolicy::Auto { vertical_stretch: 0.5 };
        assert_eq!(policy.target_size(270, 180).unwrap(), (135, 45));
    }

    #[test]
    fn test_pixel_perfect_ignores_stretch() {
        assert_eq!(ScalingPolicy::PixelPerfect.target_size(7, 3).unwrap(), (7, 3));
    }

    #[test]
    fn test_manual_width() {
        let policy = ScalingPolicy::Manual {
            width: Some(100),
            vertical_stretch: 1.0,
        };
        assert_eq!(policy.target_size(200, 50).unwrap(), (100, 25));
    }

    #[test]
    fn test_manual_fallback() {
        assert_eq!(manual_width(Some(-5)), MANUAL_FALLBACK_WIDTH);
        assert_eq!(manual_width(Some(0)), MANUAL_FALLBACK_WIDTH);
        assert_eq!(manual_width(None), MANUAL_FALLBACK_WIDTH);
        assert_eq!(manual_width(Some(1)), 1);

        let policy = ScalingPolicy::Manual {
            width: Some(-5),
            vertical_stretch: 1.0,
        };
        assert_eq!(policy.target_size(470, 94).unwrap(), (235, 47));
    }

    #[test]
    fn test_collapsed_height_is_rejected() {
        // 270x1 at 135 wide collapses to half a row
        let policy = ScalingPolicy::Auto { vertical_stretch: 1.0 };
        assert!(matches!(
            policy.target_size(270, 1),
            Err(PicasciiError::InvalidDimensions { width: 135, height: 0 })
        ));
    }

    #[test]
    fn test_non_positive_stretch_is_rejected() {
        for stretch in [0.0, -1.0, f64::NAN] {
            let policy = ScalingPolicy::Auto { vertical_stretch: stretch };
            assert!(policy.target_size(270, 180).is_err(), "stretch {stretch}");
        }
    }

    #[test]
    fn test_huge_manual_width_is_rejected() {
        let policy = ScalingPolicy::Manual {
            width: Some(u32::MAX as i64),
            vertical_stretch: 1.0,
        };
        assert!(matches!(
            policy.target_size(1, 1),
            Err(PicasciiError::InvalidDimensions {
                width: 4294967295,
                height: 4294967295
            })
        ));

        let source = solid(1, 1, 0);
        assert!(scale(&source, &policy).is_err());
    }

    #[test]
    fn test_cell_cap_boundary() {
        let policy = ScalingPolicy::Manual {
            width: Some(8192),
            vertical_stretch: 1.0,
        };
        assert_eq!(policy.target_size(1, 1).unwrap(), (8192, 8192));
        let policy = ScalingPolicy::Manual {
            width: Some(8193),
            vertical_stretch: 1.0,
        };
        assert!(policy.target_size(1, 1).is_err());
    }

    #[test]
    fn test_empty_source_is_rejected() {
        let policy = ScalingPolicy::Auto { vertical_stretch: 1.0 };
        assert!(policy.target_size(0, 10).is_err());
        assert!(ScalingPolicy::PixelPerfect.target_size(0, 0).is_err());
    }

    #[test]
    fn test_scale_buffer_size() {
        let source = solid(270, 180, 200);
        let scaled = scale(&source, &ScalingPolicy::Auto { vertical_stretch: 0.5 }).unwrap();
        assert_eq!((scaled.width, scaled.height), (135, 45));
        assert_eq!(scaled.pixels.len(), 135 * 45 * 4);
    }

    #[test]
    fn test_scale_preserves_solid_color() {
        let source = solid(40, 20, 77);
        let scaled = scale(
            &source,
            &ScalingPolicy::Manual {
                width: Some(10),
                vertical_stretch: 1.0,
            },
        )
        .unwrap();
        assert!(scaled.pixels.iter().all(|&b| b == 77));
    }

    #[test]
    fn test_pixel_perfect_copies_pixels() {
        let data: Vec<u8> = (0..24).collect();
        let source = SourceImage::from_rgba(3, 2, data.clone()).unwrap();
        let scaled = scale(&source, &ScalingPolicy::PixelPerfect).unwrap();
        assert_eq!(scaled.pixels, data);
    }

    #[test]
    fn test_scale_is_deterministic() {
        let data: Vec<u8> = (0..(50 * 30 * 4)).map(|i| (i * 7 % 256) as u8).collect();
        let source = SourceImage::from_rgba(50, 30, data).unwrap();
        let policy = ScalingPolicy::Manual {
            width: Some(17),
            vertical_stretch: 0.35,
        };
        assert_eq!(scale(&source, &policy).unwrap(), scale(&source, &policy).unwrap());
    }
}
