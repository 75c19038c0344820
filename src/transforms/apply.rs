//! Effect dispatch
//!
//! Binds every [`Effect`] variant to exactly one transform function.

use super::geometry::{mirror_horizontal, mirror_vertical, resize, resize_to_fit};
use super::heatmap::HeatmapGradient;
use super::pixelate::pixelate;
use super::tone::{grayify, invert};
use super::types::{Effect, TransformError};
use crate::ascii::{self, AsciiArt, AsciiRenderer};
use crate::raster::RasterImage;

/// Result of applying an effect: a new image, or text for ASCII art.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectOutput {
    Image(RasterImage),
    Text(AsciiArt),
}

impl EffectOutput {
    pub fn into_image(self) -> Option<RasterImage> {
        match self {
            EffectOutput::Image(img) => Some(img),
            EffectOutput::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<AsciiArt> {
        match self {
            EffectOutput::Text(art) => Some(art),
            EffectOutput::Image(_) => None,
        }
    }
}

/// Collaborators an effect may need beyond the image itself
#[derive(Debug, Clone, Copy)]
pub struct EffectContext<'a> {
    /// Renderer (and palette) for [`Effect::Ascii`]
    pub renderer: &'a AsciiRenderer,
    /// Color stops for [`Effect::Heatmap`]
    pub gradient: HeatmapGradient,
}

impl Default for EffectContext<'static> {
    /// Process-wide renderer and the default gradient.
    fn default() -> Self {
        Self { renderer: ascii::global(), gradient: HeatmapGradient::default() }
    }
}

/// Apply a single effect to an image.
///
/// The input is never modified. Failures are returned as-is; nothing is
/// retried and no partial output is produced.
pub fn apply_effect(
    image: &RasterImage,
    effect: &Effect,
    ctx: &EffectContext<'_>,
) -> Result<EffectOutput, TransformError> {
    let output = match *effect {
        Effect::Pixelate { block_size } => pixelate(image, block_size)?,
        Effect::Ascii { width } => return ctx.renderer.render(image, width).map(EffectOutput::Text),
        Effect::Invert => invert(image),
        Effect::MirrorH => mirror_horizontal(image),
        Effect::MirrorV => mirror_vertical(image),
        Effect::Heatmap => ctx.gradient.colorize(image),
        Effect::Sticker { max_edge } => resize_to_fit(image, max_edge)?,
        Effect::Grayscale => grayify(image),
        Effect::Resize { width } => resize(image, width)?,
    };
    Ok(EffectOutput::Image(output))
}
