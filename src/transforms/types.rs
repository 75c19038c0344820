//! Core effect types and error definitions
//!
//! Contains the `Effect` enum, one variant per entry of the bot's effect menu,
//! and `TransformError` for failures during parsing and application.

/// Errors that can occur during effect parsing or application
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TransformError {
    /// A width, height or target size is zero
    #[error("invalid dimension for {op}: {message}")]
    InvalidDimension { op: String, message: String },

    /// Invalid parameter value, e.g. a block size that collapses the image
    #[error("invalid parameter for {op}: {message}")]
    InvalidParameter { op: String, message: String },

    /// The character palette is empty or unusable
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// Unknown effect name or callback tag
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// Missing required parameter
    #[error("missing required parameter for {op}: {param}")]
    MissingParameter { op: String, param: String },
}

impl TransformError {
    pub(crate) fn dimension(op: &str, message: impl Into<String>) -> Self {
        TransformError::InvalidDimension { op: op.to_string(), message: message.into() }
    }

    pub(crate) fn parameter(op: &str, message: impl Into<String>) -> Self {
        TransformError::InvalidParameter { op: op.to_string(), message: message.into() }
    }
}

/// Default pixel block edge for [`Effect::Pixelate`]
pub const DEFAULT_PIXELATE_BLOCK: u32 = 20;
/// Default longer-edge limit for [`Effect::Sticker`]
pub const DEFAULT_STICKER_EDGE: u32 = 512;
/// Default target width for [`Effect::Resize`]
pub const DEFAULT_RESIZE_WIDTH: u32 = 100;

/// Parameters used when an effect is selected without explicit values,
/// e.g. from a menu button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectDefaults {
    pub pixelate_block: u32,
    pub ascii_width: u32,
    pub sticker_max_edge: u32,
    pub resize_width: u32,
}

impl Default for EffectDefaults {
    fn default() -> Self {
        Self {
            pixelate_block: DEFAULT_PIXELATE_BLOCK,
            ascii_width: crate::ascii::DEFAULT_WIDTH,
            sticker_max_edge: DEFAULT_STICKER_EDGE,
            resize_width: DEFAULT_RESIZE_WIDTH,
        }
    }
}

/// A single effect with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Mosaic: nearest-neighbor downsample then upsample by `block_size`
    Pixelate { block_size: u32 },
    /// Text rendering `width` characters wide
    Ascii { width: u32 },
    /// Photographic negative
    Invert,
    /// Reverse the columns of every row
    MirrorH,
    /// Reverse the order of the rows
    MirrorV,
    /// Blue-to-red gradient over luminance
    Heatmap,
    /// Shrink so the longer edge fits in `max_edge`
    Sticker { max_edge: u32 },
    /// Single-channel luminance
    Grayscale,
    /// Scale to `width`, keeping the aspect ratio
    Resize { width: u32 },
}

/// Callback tags of the effect menu, in display order.
pub const MENU_TAGS: &[&str] = &[
    "pixelate",
    "ascii",
    "invert_colors",
    "flip_left_right",
    "flip_top_bottom",
    "heat_map",
    "stiker",
];

impl Effect {
    /// Resolve a menu callback tag using the given defaults.
    ///
    /// `flip_left_right` always mirrors across the vertical axis (columns
    /// reversed) and `flip_top_bottom` across the horizontal axis (rows
    /// reversed).
    pub fn from_callback(tag: &str, defaults: &EffectDefaults) -> Result<Effect, TransformError> {
        match tag {
            "pixelate" => Ok(Effect::Pixelate { block_size: defaults.pixelate_block }),
            "ascii" => Ok(Effect::Ascii { width: defaults.ascii_width }),
            "invert_colors" => Ok(Effect::Invert),
            "flip_left_right" => Ok(Effect::MirrorH),
            "flip_top_bottom" => Ok(Effect::MirrorV),
            "heat_map" => Ok(Effect::Heatmap),
            "stiker" => Ok(Effect::Sticker { max_edge: defaults.sticker_max_edge }),
            other => Err(TransformError::UnknownEffect(other.to_string())),
        }
    }

    /// The full effect menu with default parameters.
    pub fn menu(defaults: &EffectDefaults) -> Vec<Effect> {
        MENU_TAGS.iter().filter_map(|tag| Effect::from_callback(tag, defaults).ok()).collect()
    }

    /// Short machine name, also used in default output file names.
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Pixelate { .. } => "pixelate",
            Effect::Ascii { .. } => "ascii",
            Effect::Invert => "invert",
            Effect::MirrorH => "mirror-h",
            Effect::MirrorV => "mirror-v",
            Effect::Heatmap => "heatmap",
            Effect::Sticker { .. } => "sticker",
            Effect::Grayscale => "grayscale",
            Effect::Resize { .. } => "resize",
        }
    }

    /// Menu callback tag, if the effect is on the menu.
    pub fn callback_tag(&self) -> Option<&'static str> {
        match self {
            Effect::Pixelate { .. } => Some("pixelate"),
            Effect::Ascii { .. } => Some("ascii"),
            Effect::Invert => Some("invert_colors"),
            Effect::MirrorH => Some("flip_left_right"),
            Effect::MirrorV => Some("flip_top_bottom"),
            Effect::Heatmap => Some("heat_map"),
            Effect::Sticker { .. } => Some("stiker"),
            Effect::Grayscale | Effect::Resize { .. } => None,
        }
    }

    /// Button label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Effect::Pixelate { .. } => "Pixelate",
            Effect::Ascii { .. } => "ASCII Art",
            Effect::Invert => "Negative",
            Effect::MirrorH => "Mirror left-right",
            Effect::MirrorV => "Mirror top-bottom",
            Effect::Heatmap => "Heat map",
            Effect::Sticker { .. } => "Sticker",
            Effect::Grayscale => "Grayscale",
            Effect::Resize { .. } => "Resize",
        }
    }

    /// True if the effect produces text rather than an image.
    pub fn produces_text(&self) -> bool {
        matches!(self, Effect::Ascii { .. })
    }
}

/// Generate a plain-language explanation of an effect
///
/// # Examples
///
/// ```
/// use pixmorph::transforms::{explain_effect, Effect};
///
/// assert_eq!(explain_effect(&Effect::MirrorH), "Flip left ↔ right (columns reversed)");
/// assert_eq!(
///     explain_effect(&Effect::Pixelate { block_size: 20 }),
///     "Pixelate into 20×20 blocks"
/// );
/// ```
pub fn explain_effect(effect: &Effect) -> String {
    match effect {
        Effect::Pixelate { block_size } => {
            format!("Pixelate into {}×{} blocks", block_size, block_size)
        }
        Effect::Ascii { width } => format!("Render as ASCII art, {} characters wide", width),
        Effect::Invert => "Invert every channel (photographic negative)".to_string(),
        Effect::MirrorH => "Flip left ↔ right (columns reversed)".to_string(),
        Effect::MirrorV => "Flip top ↔ bottom (rows reversed)".to_string(),
        Effect::Heatmap => "Color by brightness, blue (dark) to red (bright)".to_string(),
        Effect::Sticker { max_edge } => {
            format!("Shrink so the longer edge is at most {} px", max_edge)
        }
        Effect::Grayscale => "Convert to grayscale".to_string(),
        Effect::Resize { width } => format!("Resize to {} px wide, keeping proportions", width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_callback_flip_mapping() {
        let defaults = EffectDefaults::default();
        assert_eq!(Effect::from_callback("flip_left_right", &defaults), Ok(Effect::MirrorH));
        assert_eq!(Effect::from_callback("flip_top_bottom", &defaults), Ok(Effect::MirrorV));
    }

    #[test]
    fn test_from_callback_uses_defaults() {
        let defaults = EffectDefaults { pixelate_block: 7, ..Default::default() };
        assert_eq!(
            Effect::from_callback("pixelate", &defaults),
            Ok(Effect::Pixelate { block_size: 7 })
        );
        assert_eq!(
            Effect::from_callback("stiker", &defaults),
            Ok(Effect::Sticker { max_edge: 512 })
        );
        assert_eq!(Effect::from_callback("ascii", &defaults), Ok(Effect::Ascii { width: 40 }));
    }

    #[test]
    fn test_from_callback_unknown() {
        let err = Effect::from_callback("joke", &EffectDefaults::default()).unwrap_err();
        assert_eq!(err, TransformError::UnknownEffect("joke".to_string()));
    }

    #[test]
    fn test_menu_round_trips_callback_tags() {
        let menu = Effect::menu(&EffectDefaults::default());
        assert_eq!(menu.len(), MENU_TAGS.len());
        for (effect, tag) in menu.iter().zip(MENU_TAGS) {
            assert_eq!(effect.callback_tag(), Some(*tag));
        }
    }

    #[test]
    fn test_produces_text() {
        assert!(Effect::Ascii { width: 40 }.produces_text());
        assert!(!Effect::Heatmap.produces_text());
    }

    #[test]
    fn test_explain_effect_sticker() {
        assert_eq!(
            explain_effect(&Effect::Sticker { max_edge: 512 }),
            "Shrink so the longer edge is at most 512 px"
        );
    }

    #[test]
    fn test_error_display() {
        let err = TransformError::parameter("pixelate", "block size must be positive");
        assert_eq!(err.to_string(), "invalid parameter for pixelate: block size must be positive");
    }
}
