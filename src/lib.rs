//! Pixmorph - photo effects for chat bots
//!
//! This library provides:
//! - Pure image effects: pixelation, inversion, heat maps, mirroring,
//!   grayscale, proportional and sticker resizing
//! - Grayscale ASCII-art rendering bounded to a single chat message
//! - A process-wide, lock-guarded ASCII palette
//! - Decoding and encoding helpers for the surrounding bot or CLI

pub mod ascii;
pub mod cli;
pub mod color;
pub mod config;
pub mod input;
pub mod output;
pub mod raster;
pub mod transforms;

pub use ascii::{render_ascii, set_palette, AsciiArt, AsciiPalette, AsciiRenderer};
pub use raster::{PixelFormat, RasterImage};
pub use transforms::{apply_effect, Effect, EffectContext, EffectOutput, TransformError};
