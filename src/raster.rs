//! In-memory raster images
//!
//! Every effect takes a [`RasterImage`] by reference and returns a freshly
//! allocated one. Two pixel layouts are supported, both 8 bits per channel:
//! single-channel grayscale and three-channel RGB. Alpha is not carried.

use image::{DynamicImage, GrayImage, RgbImage};

/// Pixel layout of a [`RasterImage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// One intensity channel
    Gray,
    /// Red, green and blue channels
    Rgb,
}

impl PixelFormat {
    /// Number of channels per pixel
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Gray => 1,
            PixelFormat::Rgb => 3,
        }
    }
}

/// A 2-D pixel grid, grayscale or RGB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterImage {
    Gray(GrayImage),
    Rgb(RgbImage),
}

impl RasterImage {
    /// Create a grayscale image filled with a single intensity.
    pub fn gray_filled(width: u32, height: u32, value: u8) -> Self {
        RasterImage::Gray(GrayImage::from_pixel(width, height, image::Luma([value])))
    }

    /// Create an RGB image filled with a single color.
    pub fn rgb_filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        RasterImage::Rgb(RgbImage::from_pixel(width, height, image::Rgb(rgb)))
    }

    pub fn width(&self) -> u32 {
        self.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.dimensions().1
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            RasterImage::Gray(buf) => buf.dimensions(),
            RasterImage::Rgb(buf) => buf.dimensions(),
        }
    }

    pub fn format(&self) -> PixelFormat {
        match self {
            RasterImage::Gray(_) => PixelFormat::Gray,
            RasterImage::Rgb(_) => PixelFormat::Rgb,
        }
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        let (w, h) = self.dimensions();
        w == 0 || h == 0
    }

    /// Raw channel data, row-major.
    pub fn as_raw(&self) -> &[u8] {
        match self {
            RasterImage::Gray(buf) => buf.as_raw(),
            RasterImage::Rgb(buf) => buf.as_raw(),
        }
    }

    /// Convert a decoded image into a raster.
    ///
    /// Alpha channels are dropped and deeper bit depths are reduced to 8 bits.
    /// Images without color information become [`RasterImage::Gray`], all
    /// others become [`RasterImage::Rgb`].
    pub fn from_dynamic(image: DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(buf) => RasterImage::Gray(buf),
            DynamicImage::ImageRgb8(buf) => RasterImage::Rgb(buf),
            other if other.color().has_color() => RasterImage::Rgb(other.to_rgb8()),
            other => RasterImage::Gray(other.to_luma8()),
        }
    }

    /// Convert back into an [`image::DynamicImage`] for encoding.
    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            RasterImage::Gray(buf) => DynamicImage::ImageLuma8(buf),
            RasterImage::Rgb(buf) => DynamicImage::ImageRgb8(buf),
        }
    }

    /// Copy into an RGB buffer, replicating the gray channel if needed.
    pub fn to_rgb(&self) -> RgbImage {
        match self {
            RasterImage::Gray(buf) => {
                RgbImage::from_fn(buf.width(), buf.height(), |x, y| {
                    let v = buf.get_pixel(x, y)[0];
                    image::Rgb([v, v, v])
                })
            }
            RasterImage::Rgb(buf) => buf.clone(),
        }
    }
}

impl From<GrayImage> for RasterImage {
    fn from(buf: GrayImage) -> Self {
        RasterImage::Gray(buf)
    }
}

impl From<RgbImage> for RasterImage {
    fn from(buf: RgbImage) -> Self {
        RasterImage::Rgb(buf)
    }
}

/// Run the same buffer-level expression on whichever variant the raster holds,
/// keeping the pixel layout.
macro_rules! map_buffer {
    ($image:expr, |$buf:ident| $body:expr) => {
        match $image {
            $crate::raster::RasterImage::Gray($buf) => $crate::raster::RasterImage::Gray($body),
            $crate::raster::RasterImage::Rgb($buf) => $crate::raster::RasterImage::Rgb($body),
        }
    };
}

pub(crate) use map_buffer;
