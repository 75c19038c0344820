//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations. It plays the role the chat bot
//! plays in production: decode an upload, run exactly one effect, encode
//! and deliver the result.

mod apply;
mod ascii;
mod effects;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, PxmConfig};
use crate::output::OutputFormat;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Environment variable holding a tracing filter, e.g. `PXM_LOG=debug`.
pub const LOG_ENV: &str = "PXM_LOG";

/// pxm - Apply photo effects and render ASCII art
#[derive(Parser)]
#[command(name = "pxm")]
#[command(about = "pxm - Apply photo effects (pixelate, heat map, mirror, sticker...) and render ASCII art")]
#[command(version)]
pub struct Cli {
    /// Path to pxm.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply one effect to one or more images
    Apply {
        /// Input images (JPEG, PNG, GIF, WebP, ...)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Effect as name[:param], e.g. pixelate:12, heatmap, mirror-h, sticker:512.
        /// Menu callback tags such as flip_left_right or heat_map are accepted too.
        #[arg(short, long)]
        effect: String,

        /// Output file or directory.
        /// If omitted: {input}_{effect}.jpg
        /// If file (single input): output.jpg
        /// If file (multiple): output_{input}.jpg
        /// If directory (ends with /): dir/{input}_{effect}.jpg
        /// Text effects (ascii) print to stdout unless this is given; derived
        /// names then end in .txt
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format when the output path does not say (jpeg or png)
        #[arg(long, value_parser = parse_format)]
        format: Option<OutputFormat>,

        /// JPEG quality (1-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,

        /// Default pixelation block size when the effect has no parameter
        #[arg(long)]
        block: Option<u32>,

        /// Default sticker edge limit when the effect has no parameter
        #[arg(long)]
        max_edge: Option<u32>,

        /// Number of images processed in parallel (default: all cores)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Render an image as ASCII art
    Ascii {
        /// Input image
        input: PathBuf,

        /// Width in characters
        #[arg(short, long)]
        width: Option<u32>,

        /// Character palette, darkest first. Repeated characters are dropped.
        #[arg(short, long)]
        palette: Option<String>,

        /// Wrap the output in a MarkdownV2 code block, as sent to chats
        #[arg(long)]
        markdown: bool,

        /// Write the text to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the available effects
    Effects {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_ascii_lowercase().as_str() {
        "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
        "png" => Ok(OutputFormat::Png),
        other => Err(format!("unknown format '{}', expected jpeg or png", other)),
    }
}

/// Install the global tracing subscriber.
///
/// `PXM_LOG` wins over `-v`; without either only warnings are shown. Logs go to
/// stderr so stdout stays clean for ASCII output.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (e.g. in tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Load pxm.toml (explicit or discovered) and apply CLI overrides.
fn resolve_config(
    path: Option<&std::path::Path>,
    overrides: &CliOverrides,
) -> Result<PxmConfig, ExitCode> {
    load_config(path)
        .and_then(|config| merge_cli_overrides(config, overrides))
        .map_err(|e| {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_INVALID_ARGS)
        })
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(config = ?cli.config, "starting pxm");

    match cli.command {
        Commands::Apply { inputs, effect, output, format, quality, block, max_edge, jobs } => {
            let overrides = CliOverrides {
                pixelate_block: block,
                sticker_max_edge: max_edge,
                format,
                jpeg_quality: quality,
                ..Default::default()
            };
            let config = match resolve_config(cli.config.as_deref(), &overrides) {
                Ok(c) => c,
                Err(code) => return code,
            };
            apply::run_apply(&inputs, &effect, output.as_deref(), format, jobs, &config)
        }
        Commands::Ascii { input, width, palette, markdown, output } => {
            let overrides = CliOverrides { ascii_width: width, palette, ..Default::default() };
            let config = match resolve_config(cli.config.as_deref(), &overrides) {
                Ok(c) => c,
                Err(code) => return code,
            };
            ascii::run_ascii(&input, markdown, output.as_deref(), &config)
        }
        Commands::Effects { json } => {
            let config = match resolve_config(cli.config.as_deref(), &CliOverrides::default()) {
                Ok(c) => c,
                Err(code) => return code,
            };
            effects::run_effects(json, &config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("JPG"), Ok(OutputFormat::Jpeg));
        assert_eq!(parse_format("png"), Ok(OutputFormat::Png));
        assert!(parse_format("gif").is_err());
    }

    #[test]
    fn test_parse_apply_args() {
        let cli = Cli::try_parse_from([
            "pxm", "-vv", "apply", "a.png", "b.png", "--effect", "pixelate:4", "-o", "out/",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Apply { inputs, effect, output, .. } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(effect, "pixelate:4");
                assert_eq!(output, Some(PathBuf::from("out/")));
            }
            _ => panic!("expected apply"),
        }
    }

    #[test]
    fn test_quality_range_enforced() {
        let result = Cli::try_parse_from(["pxm", "apply", "a.png", "-e", "invert", "--quality", "0"]);
        assert!(result.is_err());
    }
}
