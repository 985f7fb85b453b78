//! Render configuration.
//!
//! A [`ConfigSnapshot`] holds every knob that affects a render. It can be
//! built in code, read from a TOML file, or adjusted by a [`Preset`].

use crate::ramp::{RampConfig, DEFAULT_RAMP};
use crate::scale::ScalingPolicy;
use crate::{PicasciiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Default vertical stretch; glyph cells are roughly twice as tall as wide.
pub const DEFAULT_VERTICAL_STRETCH: f64 = 0.5;

/// Scaling mode as exposed to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleMode {
    PixelPerfect,
    #[default]
    Auto,
    Manual,
}

impl ScaleMode {
    pub fn name(&self) -> &'static str {
        match self {
            ScaleMode::PixelPerfect => "pixel-perfect",
            ScaleMode::Auto => "auto",
            ScaleMode::Manual => "manual",
        }
    }
}

impl FromStr for ScaleMode {
    type Err = PicasciiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pixel-perfect" => Ok(ScaleMode::PixelPerfect),
            "auto" => Ok(ScaleMode::Auto),
            "manual" => Ok(ScaleMode::Manual),
            other => Err(PicasciiError::InvalidValue(format!("scale mode '{other}'"))),
        }
    }
}

/// Parameter bundles matching common paste targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// 135 columns, squashed rows.
    Pastebin,
    /// 87 columns, squashed rows.
    Wykop,
}

impl Preset {
    pub fn width(&self) -> i64 {
        match self {
            Preset::Pastebin => 135,
            Preset::Wykop => 87,
        }
    }

    pub fn vertical_stretch(&self) -> f64 {
        match self {
            Preset::Pastebin | Preset::Wykop => 0.35,
        }
    }
}

impl FromStr for Preset {
    type Err = PicasciiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pastebin" => Ok(Preset::Pastebin),
            "wykop" => Ok(Preset::Wykop),
            other => Err(PicasciiError::InvalidValue(format!("preset '{other}'"))),
        }
    }
}

/// Everything a single render depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConfigSnapshot {
    pub scale_mode: ScaleMode,
    /// Only read in [`ScaleMode::Manual`].
    pub manual_width: Option<i64>,
    pub vertical_stretch: f64,
    pub ramp_key: String,
    pub negative: bool,
    /// Overrides the named ramp when set.
    pub glyphs: Option<Vec<String>>,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            scale_mode: ScaleMode::Auto,
            manual_width: None,
            vertical_stretch: DEFAULT_VERTICAL_STRETCH,
            ramp_key: DEFAULT_RAMP.to_string(),
            negative: false,
            glyphs: None,
        }
    }
}

impl ConfigSnapshot {
    /// Load a snapshot from a TOML file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        log::debug!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.scale_mode = ScaleMode::Manual;
        self.manual_width = Some(preset.width());
        self.vertical_stretch = preset.vertical_stretch();
        self
    }

    /// Set the manual width. Narrower integer types widen losslessly.
    pub fn set_manual_width(&mut self, width: impl Into<i64>) {
        self.manual_width = Some(width.into());
    }

    pub fn scaling_policy(&self) -> ScalingPolicy {
        let vertical_stretch = self.vertical_stretch;
        match self.scale_mode {
            ScaleMode::PixelPerfect => ScalingPolicy::PixelPerfect,
            ScaleMode::Auto => ScalingPolicy::Auto { vertical_stretch },
            ScaleMode::Manual => ScalingPolicy::Manual {
                width: self.manual_width,
                vertical_stretch,
            },
        }
    }

    /// Ramp for this snapshot: custom glyphs if given, else the named ramp.
    pub fn ramp(&self) -> Result<RampConfig> {
        match &self.glyphs {
            Some(glyphs) => Ok(RampConfig::from_glyphs(glyphs.iter().cloned(), self.negative)),
            None => RampConfig::named(&self.ramp_key, self.negative),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ConfigSnapshot::default();
        assert_eq!(config.scale_mode, ScaleMode::Auto);
        assert_eq!(config.ramp_key, "8");
        assert!(!config.negative);
        assert_eq!(
            config.scaling_policy(),
            ScalingPolicy::Auto {
                vertical_stretch: DEFAULT_VERTICAL_STRETCH
            }
        );
    }

    #[test]
    fn test_scale_mode_round_trip_names() {
        for mode in [ScaleMode::PixelPerfect, ScaleMode::Auto, ScaleMode::Manual] {
            assert_eq!(mode.name().parse::<ScaleMode>().unwrap(), mode);
        }
        assert!("stretchy".parse::<ScaleMode>().is_err());
    }

    #[test]
    fn test_presets() {
        let config = ConfigSnapshot::default().with_preset(Preset::Wykop);
        assert_eq!(
            config.scaling_policy(),
            ScalingPolicy::Manual {
                width: Some(87),
                vertical_stretch: 0.35
            }
        );
        let config = config.with_preset("pastebin".parse().unwrap());
        assert_eq!(config.manual_width, Some(135));
        assert!("imgur".parse::<Preset>().is_err());
    }

    #[test]
    fn test_preset_stretch_per_variant() {
        assert_eq!(Preset::Pastebin.vertical_stretch(), 0.35);
        assert_eq!(Preset::Wykop.vertical_stretch(), 0.35);
    }

    #[test]
    fn test_set_manual_width_widens() {
        let mut config = ConfigSnapshot::default();
        config.set_manual_width(i32::MAX);
        assert_eq!(config.manual_width, Some(i32::MAX as i64));
        config.set_manual_width(-5i32);
        assert_eq!(config.manual_width, Some(-5));
        config.set_manual_width(87u32);
        assert_eq!(config.manual_width, Some(87));
    }

    #[test]
    fn test_custom_glyphs_override_named_ramp() {
        let config = ConfigSnapshot {
            glyphs: Some(vec!["o".into(), "O".into()]),
            negative: true,
            ..Default::default()
        };
        assert_eq!(config.ramp().unwrap().effective(), vec!["O", "o"]);
    }

    #[test]
    fn test_unknown_ramp_key() {
        let config = ConfigSnapshot {
            ramp_key: "emoji".into(),
            ..Default::default()
        };
        assert!(matches!(config.ramp(), Err(PicasciiError::UnknownRamp(_))));
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "scale-mode = \"manual\"\nmanual-width = 60\nramp-key = \"blocks\"\nnegative = true"
        )
        .unwrap();

        let config = ConfigSnapshot::load(file.path()).unwrap();
        assert_eq!(config.scale_mode, ScaleMode::Manual);
        assert_eq!(config.manual_width, Some(60));
        assert_eq!(config.vertical_stretch, DEFAULT_VERTICAL_STRETCH);
        assert_eq!(config.ramp().unwrap().preview(), "█ ▓ ▒ ░  ");
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scale-mode = \"sideways\"").unwrap();
        assert!(matches!(
            ConfigSnapshot::load(file.path()),
            Err(PicasciiError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            ConfigSnapshot::load("/definitely/not/here.toml"),
            Err(PicasciiError::Io(_))
        ));
    }
}
