//! Glyph ramps: the named preset tables and polarity handling.
//!
//! A ramp is ordered from the emptiest glyph (index 0, drawn for black
//! pixels) to the densest one (drawn for white pixels). The `negative`
//! flag mirrors that order. Both the renderer and the settings preview go
//! through [`RampConfig::effective`], so the two can never disagree.

use crate::{PicasciiError, Result};

/// Built-in ramps, selectable by key.
#[rustfmt::skip]
pub const NAMED_RAMPS: &[(&str, &[&str])] = &[
    ("1", &[" ", "."]),
    ("2", &[" ", ".", "#"]),
    ("4", &[" ", ".", ".", "|", "#"]),
    ("8", &[" ", ".", ":", "-", "=", "+", "*", "#"]),
    ("16", &[" ", ".", ":", "-", "=", "+", "*", "W", "M", "8", "B", "Q", "$", "%", "#", "@"]),
    ("letters", &[" ", "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p"]),
    ("numbers", &[" ", "1", "7", "2", "3", "4", "5", "6", "0", "8", "9"]),
    ("dots", &[" ", "_", ":", ";", "-", ".", "|", "=", "+"]),
    ("blocks", &[" ", "░", "▒", "▓", "█"]),
    ("blocks-alternate", &[" ", "▝", "▅", "▚", "▙", "▉"]),
    ("custom", &[" ", "▢", "▣", "▨", "▩"]),
];

/// Ramp used when a configuration does not name one.
pub const DEFAULT_RAMP: &str = "8";

/// Look up a named ramp.
pub fn named_ramp(key: &str) -> Result<&'static [&'static str]> {
    NAMED_RAMPS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, glyphs)| *glyphs)
        .ok_or_else(|| PicasciiError::UnknownRamp(key.to_string()))
}

/// Keys of all built-in ramps, in table order.
pub fn ramp_keys() -> impl Iterator<Item = &'static str> {
    NAMED_RAMPS.iter().map(|(name, _)| *name)
}

/// Copy `glyphs`, reversing the copy when `negative` is set.
fn apply_polarity<T: Clone>(glyphs: &[T], negative: bool) -> Vec<T> {
    let mut ramp = glyphs.to_vec();
    if negative {
        ramp.reverse();
    }
    ramp
}

/// Effective glyph order for a named ramp.
pub fn effective_ramp(key: &str, negative: bool) -> Result<Vec<&'static str>> {
    Ok(apply_polarity(named_ramp(key)?, negative))
}

/// Effective glyphs of a named ramp joined by single spaces, for display.
pub fn preview_ramp(key: &str, negative: bool) -> Result<String> {
    Ok(effective_ramp(key, negative)?.join(" "))
}

/// Glyph sequence plus polarity for a single render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RampConfig {
    glyphs: Vec<String>,
    negative: bool,
}

impl RampConfig {
    /// Ramp backed by one of the [`NAMED_RAMPS`].
    pub fn named(key: &str, negative: bool) -> Result<Self> {
        let glyphs = named_ramp(key)?;
        log::trace!("ramp '{}' ({} glyphs, negative={})", key, glyphs.len(), negative);
        Ok(Self::from_glyphs(glyphs.iter().copied(), negative))
    }

    /// Ramp from caller-supplied glyphs. May be empty; rendering with an
    /// empty ramp fails with [`PicasciiError::EmptyRamp`].
    pub fn from_glyphs<I, S>(glyphs: I, negative: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            glyphs: glyphs.into_iter().map(Into::into).collect(),
            negative,
        }
    }

    /// Glyphs in canonical (non-negative) order.
    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    pub fn negative(&self) -> bool {
        self.negative
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyphs in the order used for rendering.
    pub fn effective(&self) -> Vec<&str> {
        let glyphs: Vec<&str> = self.glyphs.iter().map(String::as_str).collect();
        apply_polarity(&glyphs, self.negative)
    }

    /// Effective glyphs joined by single spaces.
    pub fn preview(&self) -> String {
        self.effective().join(" ")
    }
}
