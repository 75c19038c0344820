//! Tonal transforms: luminance and inversion

use image::{GrayImage, Luma};

use crate::raster::{map_buffer, RasterImage};

/// BT.601 luma of an RGB triple, rounded to the nearest integer.
///
/// `L = 0.299 R + 0.587 G + 0.114 B`, computed in integer thousandths.
pub fn luma_bt601(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(u32::from);
    // Weights sum to 1000, so the result never exceeds 255.
    ((299 * r + 587 * g + 114 * b + 500) / 1000) as u8
}

/// Single-channel luminance buffer of any raster.
pub fn to_gray(image: &RasterImage) -> GrayImage {
    match image {
        RasterImage::Gray(buf) => buf.clone(),
        RasterImage::Rgb(buf) => GrayImage::from_fn(buf.width(), buf.height(), |x, y| {
            Luma([luma_bt601(buf.get_pixel(x, y).0)])
        }),
    }
}

/// Convert to grayscale. Grayscale input comes back as an identical copy.
pub fn grayify(image: &RasterImage) -> RasterImage {
    RasterImage::Gray(to_gray(image))
}

/// Replace every channel value `v` with `255 - v`.
pub fn invert(image: &RasterImage) -> RasterImage {
    map_buffer!(image, |buf| {
        let mut out = buf.clone();
        image::imageops::invert(&mut out);
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_luma_bt601_primaries() {
        assert_eq!(luma_bt601([255, 0, 0]), 76);
        assert_eq!(luma_bt601([0, 255, 0]), 150);
        assert_eq!(luma_bt601([0, 0, 255]), 29);
        assert_eq!(luma_bt601([255, 255, 255]), 255);
        assert_eq!(luma_bt601([0, 0, 0]), 0);
    }

    #[test]
    fn test_grayify_rgb() {
        let mut buf = RgbImage::new(2, 1);
        buf.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        buf.put_pixel(1, 0, image::Rgb([128, 128, 128]));

        let gray = grayify(&RasterImage::Rgb(buf));

        assert_eq!(gray.as_raw(), &[76, 128]);
    }

    #[test]
    fn test_grayify_gray_is_identity() {
        let img = RasterImage::gray_filled(3, 3, 99);
        assert_eq!(grayify(&img), img);
    }

    #[test]
    fn test_invert_rgb() {
        let img = RasterImage::rgb_filled(2, 2, [0, 100, 255]);
        let inverted = invert(&img);
        assert_eq!(inverted, RasterImage::rgb_filled(2, 2, [255, 155, 0]));
    }

    #[test]
    fn test_invert_does_not_touch_input() {
        let img = RasterImage::gray_filled(1, 1, 10);
        let _ = invert(&img);
        assert_eq!(img.as_raw(), &[10]);
    }
}
