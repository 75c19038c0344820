//! Image encoding, saving and output path generation

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

use crate::raster::RasterImage;

/// Default JPEG quality, matching what chat clients re-encode to.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Extension for text results such as ASCII art.
pub const TEXT_EXTENSION: &str = "txt";

/// Error type for output operations
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Encoded output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy JPEG, what the bot sends back
    #[default]
    Jpeg,
    /// Lossless PNG
    Png,
}

impl OutputFormat {
    /// Guess the format from a file extension (`.png`, `.jpg`, `.jpeg`).
    pub fn from_path(path: &Path) -> Option<OutputFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// Encode a raster to bytes.
///
/// `quality` (1-100) only affects JPEG.
pub fn encode_image(
    image: &RasterImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, OutputError> {
    let (w, h) = image.dimensions();
    let color = match image {
        RasterImage::Gray(_) => ColorType::L8,
        RasterImage::Rgb(_) => ColorType::Rgb8,
    };

    let mut bytes = Vec::new();
    match format {
        OutputFormat::Jpeg => {
            JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
                .encode(image.as_raw(), w, h, color)?;
        }
        OutputFormat::Png => {
            PngEncoder::new(&mut bytes).write_image(image.as_raw(), w, h, color)?;
        }
    }
    Ok(bytes)
}

/// Encode a raster and write it to `path`.
///
/// Parent directories are created if they don't exist.
pub fn save_image(
    image: &RasterImage,
    path: &Path,
    format: OutputFormat,
    quality: u8,
) -> Result<(), OutputError> {
    create_parent_dirs(path)?;

    let bytes = encode_image(image, format, quality)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Write rendered text (ASCII art) to `path`, creating parent directories.
pub fn save_text(text: &str, path: &Path) -> Result<(), OutputError> {
    create_parent_dirs(path)?;
    std::fs::write(path, text)?;
    Ok(())
}

fn create_parent_dirs(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

/// Generate the output path for an effect result.
///
/// # Output Naming Rules
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o`, input `cat.png`, effect `heatmap` | `cat_heatmap.jpg` |
/// | `-o out.jpg`, single input | `out.jpg` |
/// | `-o out.jpg`, several inputs | `out_{input_stem}.jpg` |
/// | `-o dir/` | `dir/{input_stem}_{effect}.jpg` |
///
/// # Arguments
///
/// * `input` - The input image path (used for default naming)
/// * `effect_name` - Short effect name, see [`crate::transforms::Effect::name`]
/// * `output_arg` - The `-o` argument value, if provided
/// * `is_single_input` - Whether only one input is being processed
/// * `format` - Output format, supplies the extension for derived names
pub fn generate_output_path(
    input: &Path,
    effect_name: &str,
    output_arg: Option<&Path>,
    is_single_input: bool,
    format: OutputFormat,
) -> PathBuf {
    derive_output_path(input, effect_name, output_arg, is_single_input, format.extension())
}

/// Output path for a text result, following the same naming rules as
/// [`generate_output_path`] with a `.txt` extension.
pub fn text_output_path(
    input: &Path,
    effect_name: &str,
    output_arg: Option<&Path>,
    is_single_input: bool,
) -> PathBuf {
    derive_output_path(input, effect_name, output_arg, is_single_input, TEXT_EXTENSION)
}

fn derive_output_path(
    input: &Path,
    effect_name: &str,
    output_arg: Option<&Path>,
    is_single_input: bool,
    ext: &str,
) -> PathBuf {
    let input_stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("image");

    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();

            if is_dir {
                output.join(format!("{}_{}.{}", input_stem, effect_name, ext))
            } else if is_single_input {
                output.to_path_buf()
            } else {
                let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
                let out_ext = output.extension().and_then(|s| s.to_str()).unwrap_or(ext);
                sibling(output, format!("{}_{}.{}", stem, input_stem, out_ext))
            }
        }
        None => sibling(input, format!("{}_{}.{}", input_stem, effect_name, ext)),
    }
}

/// `name` placed in the same directory as `path`.
fn sibling(path: &Path, name: String) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}
