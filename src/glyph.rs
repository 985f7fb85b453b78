//! Glyph mapper - turns a scaled RGBA buffer into text.
//!
//! Brightness is the plain average of R, G and B (alpha ignored) and picks
//! `floor(brightness / 256 * N)` from the effective ramp. Every row,
//! including the last, ends with `'\n'`.

use crate::source::rgba_len;
use crate::{PicasciiError, RampConfig, Result};
use serde::Serialize;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

/// Rendered text plus its grid size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResult {
    pub text: String,
    pub width: u32,
    pub height: u32,
    pub char_count: u64,
}

impl RenderResult {
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

/// Average of the colour channels, in `[0, 255]`.
#[inline]
pub fn brightness(rgba: &[u8]) -> f64 {
    (rgba[0] as f64 + rgba[1] as f64 + rgba[2] as f64) / 3.0
}

/// Ramp index for a brightness value on a ramp of `levels` glyphs.
#[inline]
pub fn ramp_index(brightness: f64, levels: usize) -> usize {
    let index = (brightness / 256.0 * levels as f64).floor() as usize;
    index.min(levels - 1)
}

/// Map every pixel of `pixels` to one glyph of `ramp`.
pub fn render(pixels: &[u8], width: u32, height: u32, ramp: &RampConfig) -> Result<RenderResult> {
    let glyphs = ramp.effective();
    if glyphs.is_empty() {
        return Err(PicasciiError::EmptyRamp);
    }

    if width == 0 || height == 0 {
        return Err(PicasciiError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        });
    }
    let expected = rgba_len(width, height).ok_or(PicasciiError::MalformedBuffer {
        expected: usize::MAX,
        actual: pixels.len(),
    })?;
    if pixels.len() != expected {
        return Err(PicasciiError::MalformedBuffer {
            expected,
            actual: pixels.len(),
        });
    }

    let stride = width as usize * 4;
    let rows = map_rows(pixels, stride, &glyphs);

    let mut text = String::with_capacity(rows.iter().map(String::len).sum());
    for row in &rows {
        text.push_str(row);
    }

    let char_count = width as u64 * height as u64;
    log::debug!("rendered {}x{} ({} chars)", width, height, char_count);

    Ok(RenderResult {
        text,
        width,
        height,
        char_count,
    })
}

fn render_row(row: &[u8], glyphs: &[&str]) -> String {
    let mut line = String::with_capacity(row.len() / 4 + 1);
    for rgba in row.chunks_exact(4) {
        line.push_str(glyphs[ramp_index(brightness(rgba), glyphs.len())]);
    }
    line.push('\n');
    line
}

// Rows are independent; collect() keeps them in row-major order.
#[cfg(not(target_arch = "wasm32"))]
fn map_rows(pixels: &[u8], stride: usize, glyphs: &[&str]) -> Vec<String> {
    pixels
        .par_chunks_exact(stride)
        .map(|row| render_row(row, glyphs))
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn map_rows(pixels: &[u8], stride: usize, glyphs: &[&str]) -> Vec<String> {
    pixels
        .chunks_exact(stride)
        .map(|row| render_row(row, glyphs))
        .collect()
}
