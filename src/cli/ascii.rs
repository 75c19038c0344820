//! ASCII command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::ascii;
use crate::config::PxmConfig;
use crate::input::load_image;

/// Render an image as ASCII art with the configured palette and width.
///
/// The palette goes through the process-wide setter, exactly like a user
/// changing the character set in a chat.
pub fn run_ascii(
    input: &Path,
    markdown: bool,
    output: Option<&Path>,
    config: &PxmConfig,
) -> ExitCode {
    if let Err(e) = ascii::set_palette(&config.ascii.palette) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let image = match load_image(input) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let art = match ascii::render_ascii(&image, config.ascii.width) {
        Ok(art) => art,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    tracing::info!(rows = art.rows(), chars = art.char_len(), "rendered ascii art");

    let text = if markdown { art.to_markdown_v2() } else { art.into_string() };

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &text) {
                eprintln!("Error: Failed to write '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
            println!("Saved: {}", path.display());
        }
        None => print!("{}", text),
    }

    ExitCode::from(EXIT_SUCCESS)
}
