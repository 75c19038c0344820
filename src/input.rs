//! Decoding uploaded image bytes into rasters

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::raster::RasterImage;

/// Error type for decode failures
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The file could not be read
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Unknown format or corrupt data
    #[error("cannot decode image: {0}")]
    Image(#[from] image::ImageError),
    /// The image decoded to zero pixels
    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// Decode encoded image bytes (JPEG, PNG, GIF, WebP, ...).
///
/// The format is guessed from the content, not from any file name.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let raster = RasterImage::from_dynamic(image::load_from_memory(bytes)?);
    if raster.is_empty() {
        let (width, height) = raster.dimensions();
        return Err(DecodeError::Empty { width, height });
    }
    Ok(raster)
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> Result<RasterImage, DecodeError> {
    let bytes =
        fs::read(path).map_err(|source| DecodeError::Io { path: path.to_path_buf(), source })?;
    decode_image(&bytes)
}
