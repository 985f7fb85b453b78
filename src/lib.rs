//! Image to ASCII art converter with selectable glyph ramps.

pub mod config;
pub mod glyph;
pub mod ramp;
pub mod scale;
pub mod source;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{ConfigSnapshot, Preset, ScaleMode};
pub use glyph::{render, RenderResult};
pub use ramp::{effective_ramp, preview_ramp, RampConfig};
pub use scale::{scale, ScaledImage, ScalingPolicy};
pub use source::SourceImage;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PicasciiError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },
    #[error("Ramp has no glyphs")]
    EmptyRamp,
    #[error("Malformed pixel buffer: expected {expected} bytes, got {actual}")]
    MalformedBuffer { expected: usize, actual: usize },
    #[error("No image loaded")]
    NoImageLoaded,
    #[error("Unknown ramp: {0}")]
    UnknownRamp(String),
    #[error("Invalid {0}")]
    InvalidValue(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PicasciiError>;

/// Scale `source` and map it to glyphs in one pass.
pub fn convert(source: &SourceImage, config: &ConfigSnapshot) -> Result<RenderResult> {
    let ramp = config.ramp()?;
    let scaled = scale(source, &config.scaling_policy())?;
    render(&scaled.pixels, scaled.width, scaled.height, &ramp)
}

/// Session holding the currently loaded image.
#[derive(Debug, Default)]
pub struct Converter {
    source: Option<SourceImage>,
    config: ConfigSnapshot,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ConfigSnapshot) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ConfigSnapshot {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigSnapshot {
        &mut self.config
    }

    /// Replace the loaded image.
    pub fn load(&mut self, source: SourceImage) {
        log::debug!("image loaded ({}x{})", source.width(), source.height());
        self.source = Some(source);
    }

    pub fn open(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.load(SourceImage::open(path)?);
        Ok(())
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Render the loaded image with the current configuration.
    pub fn render(&self) -> Result<RenderResult> {
        let source = self.source.as_ref().ok_or(PicasciiError::NoImageLoaded)?;
        convert(source, &self.config)
    }

    /// Active ramp joined by spaces. Does not need an image.
    pub fn preview_ramp(&self) -> Result<String> {
        Ok(self.config.ramp()?.preview())
    }
}
