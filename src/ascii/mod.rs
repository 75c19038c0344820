//! ASCII-art rendering
//!
//! # Module Structure
//!
//! - [`palette`] - Character palettes and deduplication
//! - [`render`] - The renderer, output budget and [`AsciiArt`] text blocks
//!
//! The process-wide renderer returned by [`global`] backs the free functions
//! below: a palette set through [`set_palette`] applies to every later
//! [`render_ascii`] call in the process, from any thread.

pub mod palette;
pub mod render;

use std::sync::OnceLock;

pub use palette::{AsciiPalette, DEFAULT_PALETTE};
pub use render::{
    max_rows, render_with_palette, target_rows, AsciiArt, AsciiRenderer, CELL_ASPECT,
    DEFAULT_WIDTH, MAX_MESSAGE_CHARS,
};

use crate::raster::RasterImage;
use crate::transforms::TransformError;

static GLOBAL: OnceLock<AsciiRenderer> = OnceLock::new();

/// The process-wide renderer, created with the default palette on first use.
pub fn global() -> &'static AsciiRenderer {
    GLOBAL.get_or_init(AsciiRenderer::new)
}

/// Render with the process-wide palette.
pub fn render_ascii(image: &RasterImage, width: u32) -> Result<AsciiArt, TransformError> {
    global().render(image, width)
}

/// Replace the process-wide palette.
pub fn set_palette(text: &str) -> Result<(), TransformError> {
    global().set_palette(text)
}

/// Snapshot of the process-wide palette.
pub fn palette() -> AsciiPalette {
    global().palette()
}

/// Restore the default process-wide palette.
pub fn reset_palette() {
    global().reset_palette()
}
