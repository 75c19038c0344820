//! Geometric transforms: proportional resizing and mirroring
//!
//! Derived dimensions always truncate toward zero and never drop below one
//! pixel.

use image::imageops::{self, FilterType};

use super::types::TransformError;
use crate::raster::{map_buffer, RasterImage};

/// Filter used for proportional resizing (bicubic).
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Scale `edge` by `target / reference`, truncating, at least 1.
pub(crate) fn scale_edge(edge: u32, target: u32, reference: u32) -> u32 {
    let scaled = u64::from(edge) * u64::from(target) / u64::from(reference);
    scaled.clamp(1, u64::from(u32::MAX)) as u32
}

pub(crate) fn ensure_not_empty(image: &RasterImage, op: &str) -> Result<(), TransformError> {
    if image.is_empty() {
        let (w, h) = image.dimensions();
        return Err(TransformError::dimension(op, format!("source image is {}x{}", w, h)));
    }
    Ok(())
}

/// Resize to `new_width`, keeping the aspect ratio.
///
/// `new_height = trunc(new_width * height / width)`, at least 1.
///
/// # Errors
///
/// `InvalidDimension` if `new_width` is zero or the source image is empty.
pub fn resize(image: &RasterImage, new_width: u32) -> Result<RasterImage, TransformError> {
    if new_width == 0 {
        return Err(TransformError::dimension("resize", "width must be positive"));
    }
    ensure_not_empty(image, "resize")?;

    let (w, h) = image.dimensions();
    let new_height = scale_edge(h, new_width, w);
    Ok(map_buffer!(image, |buf| imageops::resize(buf, new_width, new_height, RESIZE_FILTER)))
}

/// Shrink so neither edge exceeds `max_edge` (sticker sizing).
///
/// Images that already fit are returned unchanged. Otherwise the longer edge
/// becomes `max_edge`; square images are scaled by height, which gives the
/// same result.
///
/// # Errors
///
/// `InvalidDimension` if `max_edge` is zero or the source image is empty.
pub fn resize_to_fit(image: &RasterImage, max_edge: u32) -> Result<RasterImage, TransformError> {
    if max_edge == 0 {
        return Err(TransformError::dimension("resize_to_fit", "max edge must be positive"));
    }
    ensure_not_empty(image, "resize_to_fit")?;

    let (w, h) = image.dimensions();
    if w <= max_edge && h <= max_edge {
        return Ok(image.clone());
    }

    let (new_w, new_h) = if w > h {
        (max_edge, scale_edge(h, max_edge, w))
    } else {
        (scale_edge(w, max_edge, h), max_edge)
    };
    Ok(map_buffer!(image, |buf| imageops::resize(buf, new_w, new_h, RESIZE_FILTER)))
}

/// Flip across the vertical axis: columns reversed within each row.
pub fn mirror_horizontal(image: &RasterImage) -> RasterImage {
    map_buffer!(image, |buf| imageops::flip_horizontal(buf))
}

/// Flip across the horizontal axis: row order reversed.
pub fn mirror_vertical(image: &RasterImage) -> RasterImage {
    map_buffer!(image, |buf| imageops::flip_vertical(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn gradient(w: u32, h: u32) -> RasterImage {
        RasterImage::Gray(GrayImage::from_fn(w, h, |x, y| Luma([(x + y * w) as u8])))
    }

    #[test]
    fn test_scale_edge_truncates() {
        assert_eq!(scale_edge(50, 40, 100), 20);
        assert_eq!(scale_edge(33, 10, 100), 3);
        assert_eq!(scale_edge(1, 10, 1000), 1);
    }

    #[test]
    fn test_resize_keeps_aspect() {
        let img = RasterImage::gray_filled(200, 100, 0);
        let out = resize(&img, 100).unwrap();
        assert_eq!(out.dimensions(), (100, 50));
    }

    #[test]
    fn test_resize_truncates_height() {
        let img = RasterImage::rgb_filled(3, 2, [1, 2, 3]);
        let out = resize(&img, 4).unwrap();
        // 4 * 2 / 3 = 2.67 -> 2
        assert_eq!(out.dimensions(), (4, 2));
    }

    #[test]
    fn test_resize_zero_width() {
        let img = RasterImage::gray_filled(10, 10, 0);
        assert!(matches!(resize(&img, 0), Err(TransformError::InvalidDimension { .. })));
    }

    #[test]
    fn test_resize_empty_source() {
        let img = RasterImage::gray_filled(0, 10, 0);
        assert!(matches!(resize(&img, 5), Err(TransformError::InvalidDimension { .. })));
    }

    #[test]
    fn test_resize_to_fit_noop_when_small() {
        let img = gradient(16, 8);
        assert_eq!(resize_to_fit(&img, 512).unwrap(), img);
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let img = RasterImage::rgb_filled(1024, 300, [5, 5, 5]);
        let out = resize_to_fit(&img, 512).unwrap();
        assert_eq!(out.dimensions(), (512, 150));
    }

    #[test]
    fn test_resize_to_fit_portrait_and_square() {
        let portrait = RasterImage::gray_filled(300, 1000, 0);
        assert_eq!(resize_to_fit(&portrait, 512).unwrap().dimensions(), (153, 512));

        let square = RasterImage::gray_filled(600, 600, 0);
        assert_eq!(resize_to_fit(&square, 512).unwrap().dimensions(), (512, 512));
    }

    #[test]
    fn test_resize_to_fit_one_edge_over() {
        let img = RasterImage::gray_filled(513, 10, 0);
        assert_eq!(resize_to_fit(&img, 512).unwrap().dimensions(), (512, 9));
    }

    #[test]
    fn test_mirror_horizontal_reverses_columns() {
        let img = gradient(3, 2);
        let out = mirror_horizontal(&img);
        assert_eq!(out.as_raw(), &[2, 1, 0, 5, 4, 3]);
    }

    #[test]
    fn test_mirror_vertical_reverses_rows() {
        let img = gradient(3, 2);
        let out = mirror_vertical(&img);
        assert_eq!(out.as_raw(), &[3, 4, 5, 0, 1, 2]);
    }
}
