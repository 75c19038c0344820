//! Configuration schema types for `pxm.toml`
//!
//! Every section and key is optional; missing values fall back to the same
//! defaults the library uses.

use serde::{Deserialize, Serialize};

use crate::ascii::{AsciiPalette, DEFAULT_PALETTE, DEFAULT_WIDTH};
use crate::color::{parse_color, ColorError};
use crate::output::{OutputFormat, DEFAULT_JPEG_QUALITY};
use crate::transforms::{
    EffectDefaults, HeatmapGradient, DEFAULT_PIXELATE_BLOCK, DEFAULT_RESIZE_WIDTH,
    DEFAULT_STICKER_EDGE,
};

/// `[ascii]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsciiConfig {
    /// Rendering width in characters
    pub width: u32,
    /// Character gradient, darkest first
    pub palette: String,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, palette: DEFAULT_PALETTE.to_string() }
    }
}

/// `[effects]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Block edge for pixelation
    pub pixelate_block: u32,
    /// Longer-edge limit for stickers
    pub sticker_max_edge: u32,
    /// Target width for plain resizing
    pub resize_width: u32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            pixelate_block: DEFAULT_PIXELATE_BLOCK,
            sticker_max_edge: DEFAULT_STICKER_EDGE,
            resize_width: DEFAULT_RESIZE_WIDTH,
        }
    }
}

/// `[heatmap]` section, CSS color strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub black: String,
    pub mid: String,
    pub white: String,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self { black: "blue".to_string(), mid: "#984f4f".to_string(), white: "red".to_string() }
    }
}

/// `[output]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when the output path has no recognizable extension
    pub format: OutputFormat,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: OutputFormat::Jpeg, jpeg_quality: DEFAULT_JPEG_QUALITY }
    }
}

/// Complete `pxm.toml` configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PxmConfig {
    pub ascii: AsciiConfig,
    pub effects: EffectsConfig,
    pub heatmap: HeatmapConfig,
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "effects.pixelate_block")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pxm.toml: '{}' {}", self.field, self.message)
    }
}

impl PxmConfig {
    /// Validate the configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: &str, message: &str| {
            if !ok {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: message.to_string(),
                });
            }
        };

        check(self.ascii.width > 0, "ascii.width", "must be a positive integer");
        check(
            AsciiPalette::new(&self.ascii.palette).is_ok(),
            "ascii.palette",
            "must contain at least one character",
        );
        check(self.effects.pixelate_block > 0, "effects.pixelate_block", "must be a positive integer");
        check(
            self.effects.sticker_max_edge > 0,
            "effects.sticker_max_edge",
            "must be a positive integer",
        );
        check(self.effects.resize_width > 0, "effects.resize_width", "must be a positive integer");
        check(
            (1..=100).contains(&self.output.jpeg_quality),
            "output.jpeg_quality",
            "must be between 1 and 100",
        );

        for (field, value) in [
            ("heatmap.black", &self.heatmap.black),
            ("heatmap.mid", &self.heatmap.mid),
            ("heatmap.white", &self.heatmap.white),
        ] {
            if let Err(e) = parse_color(value) {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: format!("is not a valid color: {}", e),
                });
            }
        }

        errors
    }

    /// Effect parameters for menu selections and bare effect names.
    pub fn effect_defaults(&self) -> EffectDefaults {
        EffectDefaults {
            pixelate_block: self.effects.pixelate_block,
            ascii_width: self.ascii.width,
            sticker_max_edge: self.effects.sticker_max_edge,
            resize_width: self.effects.resize_width,
        }
    }

    /// Heat-map gradient from the configured stops.
    ///
    /// # Errors
    ///
    /// The first stop that is not a valid color.
    pub fn heatmap_gradient(&self) -> Result<HeatmapGradient, ColorError> {
        HeatmapGradient::from_css(&self.heatmap.black, &self.heatmap.mid, &self.heatmap.white)
    }
}
