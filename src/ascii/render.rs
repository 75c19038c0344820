//! Grayscale ASCII-art rendering with a per-message character budget

use std::fmt;
use std::sync::{PoisonError, RwLock};

use image::imageops;

use super::palette::AsciiPalette;
use crate::raster::RasterImage;
use crate::transforms::geometry::RESIZE_FILTER;
use crate::transforms::tone::to_gray;
use crate::transforms::TransformError;

/// Default rendering width in characters.
pub const DEFAULT_WIDTH: u32 = 40;

/// Hard cap on rendered characters, newlines included.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Height correction for character cells being taller than wide.
pub const CELL_ASPECT: f64 = 0.55;

/// Rendered text block: whole rows of `width` characters, each followed by `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiArt {
    text: String,
    width: u32,
    rows: usize,
}

impl AsciiArt {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Characters per row, excluding the newline.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Length in characters, newlines included.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Wrap in a fenced code block for a MarkdownV2 chat message.
    ///
    /// Inside `pre` blocks MarkdownV2 only requires `` ` `` and `\` to be
    /// escaped.
    pub fn to_markdown_v2(&self) -> String {
        let mut escaped = String::with_capacity(self.text.len() + 8);
        for c in self.text.chars() {
            if c == '`' || c == '\\' {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        format!("```\n{}\n```", escaped)
    }
}

impl fmt::Display for AsciiArt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Number of rows for a `width`-column rendering of a `w × h` image:
/// `trunc((h / w) * width * 0.55)`, at least 1.
pub fn target_rows(w: u32, h: u32, width: u32) -> u32 {
    let aspect = f64::from(h) / f64::from(w);
    ((aspect * f64::from(width) * CELL_ASPECT) as u32).max(1)
}

/// Most rows of `width` characters (plus newline) that fit the budget.
///
/// One row's worth of characters is held back from [`MAX_MESSAGE_CHARS`].
pub fn max_rows(width: u32) -> usize {
    let per_row = width as usize + 1;
    MAX_MESSAGE_CHARS.saturating_sub(per_row) / per_row
}

/// Source rows covered by the first `kept` of `rows` output rows:
/// `ceil(kept * h / rows)`, within `1..=h`.
fn kept_source_rows(h: u32, rows: u32, kept: u32) -> u32 {
    let covered = (u64::from(kept) * u64::from(h)).div_ceil(u64::from(rows));
    covered.clamp(1, u64::from(h)) as u32
}

/// Render `image` with an explicit palette.
///
/// Rows past the budget are dropped whole; a row is never cut short.
///
/// # Errors
///
/// - `InvalidDimension` if `width` is zero or the image is empty
/// - `InvalidPalette` if `palette` has no characters
pub fn render_with_palette(
    image: &RasterImage,
    width: u32,
    palette: &AsciiPalette,
) -> Result<AsciiArt, TransformError> {
    if width == 0 {
        return Err(TransformError::dimension("ascii", "width must be positive"));
    }
    if palette.is_empty() {
        return Err(TransformError::InvalidPalette("palette is empty".to_string()));
    }
    if image.is_empty() {
        let (w, h) = image.dimensions();
        return Err(TransformError::dimension("ascii", format!("source image is {}x{}", w, h)));
    }

    let gray = to_gray(image);
    let (w, h) = gray.dimensions();
    let rows = target_rows(w, h, width);
    let kept = (rows as usize).min(max_rows(width));
    if kept == 0 {
        return Ok(AsciiArt { text: String::new(), width, rows: 0 });
    }

    // Only resample the part of the source that lands in the kept rows
    let small = if kept < rows as usize {
        let source_rows = kept_source_rows(h, rows, kept as u32);
        let top = imageops::crop_imm(&gray, 0, 0, w, source_rows).to_image();
        imageops::resize(&top, width, kept as u32, RESIZE_FILTER)
    } else {
        imageops::resize(&gray, width, rows, RESIZE_FILTER)
    };

    let mut text = String::with_capacity(kept * (width as usize + 1));
    for row in small.rows() {
        text.extend(row.map(|px| palette.char_for(px[0])));
        text.push('\n');
    }

    Ok(AsciiArt { text, width, rows: kept })
}

/// ASCII renderer owning a shared, lock-guarded palette.
///
/// Renders take the read lock; [`AsciiRenderer::set_palette`] takes the write
/// lock, so a palette change is seen by every render that starts after it.
#[derive(Debug, Default)]
pub struct AsciiRenderer {
    palette: RwLock<AsciiPalette>,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(palette: AsciiPalette) -> Self {
        Self { palette: RwLock::new(palette) }
    }

    /// Snapshot of the current palette.
    pub fn palette(&self) -> AsciiPalette {
        self.palette.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replace the palette from free-form text (see [`AsciiPalette::new`]).
    ///
    /// On error the current palette is left untouched.
    pub fn set_palette(&self, text: &str) -> Result<(), TransformError> {
        let palette = AsciiPalette::new(text)?;
        *self.palette.write().unwrap_or_else(PoisonError::into_inner) = palette;
        Ok(())
    }

    /// Restore [`super::DEFAULT_PALETTE`].
    pub fn reset_palette(&self) {
        *self.palette.write().unwrap_or_else(PoisonError::into_inner) = AsciiPalette::default();
    }

    /// Render with the current palette.
    pub fn render(&self, image: &RasterImage, width: u32) -> Result<AsciiArt, TransformError> {
        let palette = self.palette.read().unwrap_or_else(PoisonError::into_inner);
        render_with_palette(image, width, &palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_target_rows_applies_cell_aspect() {
        assert_eq!(target_rows(100, 50, 40), 11);
        assert_eq!(target_rows(100, 100, 40), 22);
        assert_eq!(target_rows(1000, 1, 40), 1);
    }

    #[test]
    fn test_max_rows() {
        assert_eq!(max_rows(40), 96);
        assert_eq!(max_rows(100), 38);
        assert_eq!(max_rows(4000), 0);
    }

    #[test]
    fn test_uniform_gray_image() {
        let img = RasterImage::gray_filled(100, 50, 128);
        let art = render_with_palette(&img, 40, &AsciiPalette::default()).unwrap();

        assert_eq!(art.rows(), 11);
        assert_eq!(art.char_len(), 40 * 11 + 11);
        for line in art.lines() {
            assert_eq!(line, "=".repeat(40));
        }
        assert!(art.as_str().ends_with('\n'));
    }

    #[test]
    fn test_tall_image_is_clipped_to_whole_rows() {
        let img = RasterImage::gray_filled(10, 1000, 0);
        let art = render_with_palette(&img, 40, &AsciiPalette::default()).unwrap();

        assert_eq!(art.rows(), max_rows(40));
        assert!(art.char_len() <= MAX_MESSAGE_CHARS);
        assert!(art.lines().all(|l| l.chars().count() == 40));
    }

    #[test]
    fn test_very_tall_image_only_resamples_kept_rows() {
        // 11 million target rows; only the top of the image is resampled
        let mut buf = GrayImage::from_pixel(1, 200_000, Luma([255]));
        buf.put_pixel(0, 0, Luma([0]));

        let started = std::time::Instant::now();
        let art = render_with_palette(&RasterImage::Gray(buf), 100, &AsciiPalette::default())
            .unwrap();

        assert_eq!(target_rows(1, 200_000, 100), 11_000_000);
        assert_eq!(art.rows(), max_rows(100));
        assert!(art.lines().all(|l| l == "@".repeat(100)));
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_kept_source_rows() {
        assert_eq!(kept_source_rows(1000, 2200, 96), 44);
        assert_eq!(kept_source_rows(200_000, 11_000_000, 38), 1);
        assert_eq!(kept_source_rows(50, 11, 11), 50);
    }

    #[test]
    fn test_width_beyond_budget_renders_nothing() {
        let img = RasterImage::gray_filled(4, 4, 0);
        let art = render_with_palette(&img, 4000, &AsciiPalette::default()).unwrap();
        assert_eq!(art.rows(), 0);
        assert!(art.as_str().is_empty());
    }

    #[test]
    fn test_dark_and_light_halves() {
        let buf = GrayImage::from_fn(20, 20, |x, _| Luma([if x < 10 { 0 } else { 255 }]));
        let art = render_with_palette(&RasterImage::Gray(buf), 20, &AsciiPalette::default())
            .unwrap();
        let first = art.lines().next().unwrap();
        assert!(first.starts_with('@'));
        assert!(first.ends_with(' '));
    }

    #[test]
    fn test_zero_width() {
        let img = RasterImage::gray_filled(4, 4, 0);
        let err = render_with_palette(&img, 0, &AsciiPalette::default()).unwrap_err();
        assert!(matches!(err, TransformError::InvalidDimension { .. }));
    }

    #[test]
    fn test_renderer_palette_swap() {
        let renderer = AsciiRenderer::new();
        renderer.set_palette("xx").unwrap();
        let art = renderer.render(&RasterImage::gray_filled(8, 8, 200), 8).unwrap();
        assert!(art.as_str().chars().all(|c| c == 'x' || c == '\n'));

        renderer.reset_palette();
        assert_eq!(renderer.palette(), AsciiPalette::default());
    }

    #[test]
    fn test_renderer_rejects_empty_palette_and_keeps_old() {
        let renderer = AsciiRenderer::with_palette(AsciiPalette::new("ab").unwrap());
        assert!(renderer.set_palette("").is_err());
        assert_eq!(renderer.palette().to_string(), "ab");
    }

    #[test]
    fn test_markdown_v2_escapes_backticks() {
        // 4x2 at width 2 is a single row
        let img = RasterImage::gray_filled(4, 2, 0);
        let renderer = AsciiRenderer::with_palette(AsciiPalette::new("`").unwrap());
        let art = renderer.render(&img, 2).unwrap();

        assert_eq!(art.as_str(), "``\n");
        assert_eq!(art.to_markdown_v2(), "```\n\\`\\`\n\n```");
    }
}
