//! Image effects
//!
//! Pure functions from one [`RasterImage`](crate::raster::RasterImage) to a new
//! one, plus the [`Effect`] selector that binds menu entries to them.
//!
//! # Module Structure
//!
//! - [`types`] - `Effect`, `EffectDefaults` and `TransformError`
//! - [`parsing`] - Effect parsing from `name[:param]` strings and callback tags
//! - [`tone`] - Grayscale and inversion
//! - [`geometry`] - Proportional resize, sticker fitting and mirroring
//! - [`pixelate`] - Nearest-neighbor mosaic
//! - [`heatmap`] - Three-stop heat-map colorization
//! - [`apply`] - Dispatch of an `Effect` to its transform

pub mod apply;
pub mod geometry;
pub mod heatmap;
pub mod parsing;
pub mod pixelate;
pub mod tone;
pub mod types;

// Re-export main types at the module level for convenience
pub use apply::{apply_effect, EffectContext, EffectOutput};
pub use geometry::{mirror_horizontal, mirror_vertical, resize, resize_to_fit};
pub use heatmap::{heatmap_colorize, HeatmapGradient, HEATMAP_MIDPOINT};
pub use parsing::parse_effect_str;
pub use pixelate::pixelate;
pub use tone::{grayify, invert, luma_bt601};
pub use types::{
    explain_effect, Effect, EffectDefaults, TransformError, DEFAULT_PIXELATE_BLOCK,
    DEFAULT_RESIZE_WIDTH, DEFAULT_STICKER_EDGE, MENU_TAGS,
};

/// Result type alias for effect operations.
pub type Result<T> = std::result::Result<T, TransformError>;
