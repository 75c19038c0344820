//! Apply command implementation

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::ascii;
use crate::config::PxmConfig;
use crate::input::load_image;
use crate::output::{
    generate_output_path, save_image, save_text, text_output_path, OutputFormat,
};
use crate::transforms::{apply_effect, parse_effect_str, Effect, EffectContext, EffectOutput};

/// What happened to one input
enum Delivered {
    Saved(PathBuf),
    Printed(String),
}

/// Apply one effect to every input, in parallel.
///
/// Each input is decoded, transformed and written independently; a failure
/// on one input is reported and does not stop the others.
pub fn run_apply(
    inputs: &[PathBuf],
    effect: &str,
    output: Option<&Path>,
    format_arg: Option<OutputFormat>,
    jobs: Option<usize>,
    config: &PxmConfig,
) -> ExitCode {
    let effect = match parse_effect_str(effect, &config.effect_defaults()) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if let Err(e) = ascii::set_palette(&config.ascii.palette) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let gradient = match config.heatmap_gradient() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: heatmap: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    let ctx = EffectContext { renderer: ascii::global(), gradient };
    let is_single = inputs.len() == 1;
    tracing::info!(effect = effect.name(), inputs = inputs.len(), "applying effect");

    let process = || -> Vec<Result<Delivered, String>> {
        inputs
            .par_iter()
            .map(|input| {
                process_one(input, &effect, &ctx, output, format_arg, is_single, config)
                    .map_err(|e| format!("'{}': {}", input.display(), e))
            })
            .collect()
    };

    let results = match jobs {
        Some(n) => match rayon::ThreadPoolBuilder::new().num_threads(n.max(1)).build() {
            Ok(pool) => pool.install(process),
            Err(e) => {
                eprintln!("Error: cannot start worker pool: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
        None => process(),
    };

    let mut failed = 0;
    for result in results {
        match result {
            Ok(Delivered::Saved(path)) => println!("Saved: {}", path.display()),
            Ok(Delivered::Printed(text)) => print!("{}", text),
            Err(message) => {
                failed += 1;
                eprintln!("Error: {}", message);
            }
        }
    }

    if failed > 0 {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

fn process_one(
    input: &Path,
    effect: &Effect,
    ctx: &EffectContext<'_>,
    output: Option<&Path>,
    format_arg: Option<OutputFormat>,
    is_single: bool,
    config: &PxmConfig,
) -> Result<Delivered, Box<dyn std::error::Error + Send + Sync>> {
    let started = Instant::now();
    let image = load_image(input)?;
    let (w, h) = image.dimensions();
    tracing::debug!(input = %input.display(), width = w, height = h, "decoded");

    let delivered = match apply_effect(&image, effect, ctx)? {
        // Text goes to stdout unless -o names a destination
        EffectOutput::Text(art) => match output {
            Some(_) => {
                let path = text_output_path(input, effect.name(), output, is_single);
                save_text(art.as_str(), &path)?;
                Delivered::Saved(path)
            }
            None => Delivered::Printed(art.into_string()),
        },
        EffectOutput::Image(result) => {
            // An explicit file extension beats --format, which beats the config
            let format = output
                .and_then(OutputFormat::from_path)
                .or(format_arg)
                .unwrap_or(config.output.format);
            let path = generate_output_path(input, effect.name(), output, is_single, format);
            save_image(&result, &path, format, config.output.jpeg_quality)?;
            Delivered::Saved(path)
        }
    };

    tracing::debug!(
        input = %input.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "done"
    );
    Ok(delivered)
}
