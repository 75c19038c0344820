//! Pixelation (mosaic) effect
//!
//! Downsamples with nearest-neighbor sampling at block centers, then blows
//! each sample back up into a `block_size × block_size` square.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Pixel};

use super::types::TransformError;
use crate::raster::{map_buffer, RasterImage};

/// Nearest-neighbor resample to `new_w × new_h`.
///
/// Output pixel `(x, y)` takes the source pixel under the center of its
/// footprint: `floor((2x + 1) * w / (2 * new_w))`. The source must not be
/// empty; [`pixelate`] rejects block sizes that would make it so.
pub(crate) fn sample_nearest<P>(
    src: &ImageBuffer<P, Vec<u8>>,
    new_w: u32,
    new_h: u32,
) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let (w, h) = src.dimensions();
    let center = |i: u32, out: u32, len: u32| -> u32 {
        let pos = (2 * u64::from(i) + 1) * u64::from(len) / (2 * u64::from(out));
        (pos as u32).min(len - 1)
    };
    ImageBuffer::from_fn(new_w, new_h, |x, y| *src.get_pixel(center(x, new_w, w), center(y, new_h, h)))
}

/// Pixelate with square blocks of `block_size` pixels.
///
/// The result measures `(w / k) * k` by `(h / k) * k`, so trailing pixels that
/// do not fill a whole block are cut off.
///
/// # Errors
///
/// `InvalidParameter` if `block_size` is zero or larger than either edge.
pub fn pixelate(image: &RasterImage, block_size: u32) -> Result<RasterImage, TransformError> {
    if block_size == 0 {
        return Err(TransformError::parameter("pixelate", "block size must be positive"));
    }

    let (w, h) = image.dimensions();
    let (small_w, small_h) = (w / block_size, h / block_size);
    if small_w == 0 || small_h == 0 {
        return Err(TransformError::parameter(
            "pixelate",
            format!("block size {} collapses a {}x{} image", block_size, w, h),
        ));
    }

    Ok(map_buffer!(image, |buf| {
        let small = sample_nearest(buf, small_w, small_h);
        imageops::resize(&small, small_w * block_size, small_h * block_size, FilterType::Nearest)
    }))
}
