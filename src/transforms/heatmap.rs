//! Heat-map colorization
//!
//! Luminance is looked up in a 256-entry table built from three color stops:
//! the dark stop at 0, the mid stop at [`HEATMAP_MIDPOINT`], the bright stop
//! at 255. Each half interpolates linearly with floor division, so index 0,
//! the midpoint and index 255 hit their stops exactly.

use image::{Rgb, RgbImage};

use super::tone::to_gray;
use crate::color::{parse_color, ColorError};
use crate::raster::RasterImage;

/// Table index where the mid stop sits.
pub const HEATMAP_MIDPOINT: usize = 127;

/// Three-stop color gradient for [`heatmap_colorize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapGradient {
    /// Color for intensity 0
    pub black: Rgb<u8>,
    /// Color for intensity [`HEATMAP_MIDPOINT`]
    pub mid: Rgb<u8>,
    /// Color for intensity 255
    pub white: Rgb<u8>,
}

impl Default for HeatmapGradient {
    /// Blue through muted red-brown (`#984f4f`) to red.
    fn default() -> Self {
        Self { black: Rgb([0, 0, 255]), mid: Rgb([152, 79, 79]), white: Rgb([255, 0, 0]) }
    }
}

impl HeatmapGradient {
    /// Build a gradient from CSS color strings (`"blue"`, `"#984f4f"`, ...).
    pub fn from_css(black: &str, mid: &str, white: &str) -> Result<Self, ColorError> {
        Ok(Self { black: parse_color(black)?, mid: parse_color(mid)?, white: parse_color(white)? })
    }

    /// The full 256-entry lookup table.
    pub fn lut(&self) -> [Rgb<u8>; 256] {
        let mut lut = [self.white; 256];
        let low_span = HEATMAP_MIDPOINT as i32;
        let high_span = (255 - HEATMAP_MIDPOINT) as i32;

        for i in 0..HEATMAP_MIDPOINT {
            lut[i] = lerp(self.black, self.mid, i as i32, low_span);
        }
        for i in 0..(255 - HEATMAP_MIDPOINT) {
            lut[HEATMAP_MIDPOINT + i] = lerp(self.mid, self.white, i as i32, high_span);
        }
        lut
    }

    /// Colorize `image` through this gradient. Output is always RGB.
    pub fn colorize(&self, image: &RasterImage) -> RasterImage {
        let lut = self.lut();
        let gray = to_gray(image);
        RasterImage::Rgb(RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
            lut[usize::from(gray.get_pixel(x, y)[0])]
        }))
    }
}

fn lerp(from: Rgb<u8>, to: Rgb<u8>, step: i32, span: i32) -> Rgb<u8> {
    let channel = |c: usize| {
        let (a, b) = (i32::from(from[c]), i32::from(to[c]));
        (a + (step * (b - a)).div_euclid(span)).clamp(0, 255) as u8
    };
    Rgb([channel(0), channel(1), channel(2)])
}

/// Colorize with the default blue → red gradient.
pub fn heatmap_colorize(image: &RasterImage) -> RasterImage {
    HeatmapGradient::default().colorize(image)
}
