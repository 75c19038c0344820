//! Effect parsing from strings
//!
//! String syntax is `name[:param]`, e.g. `"pixelate:12"`, `"ascii:60"`,
//! `"mirror-h"`. Menu callback tags (`"heat_map"`, `"stiker"`, ...) are
//! accepted as aliases, so a button press and a typed command resolve the
//! same way.

use super::types::{Effect, EffectDefaults, TransformError};

/// Parse an effect from string syntax.
///
/// Parameters are optional; a missing parameter falls back to `defaults`.
///
/// # Alias Resolution
/// - `flip-h`, `flip_left_right`, `mirrorh` → `MirrorH`
/// - `flip-v`, `flip_top_bottom`, `mirrorv` → `MirrorV`
/// - `negative`, `invert_colors` → `Invert`
/// - `heat_map`, `heat-map` → `Heatmap`
/// - `stiker` → `Sticker`
pub fn parse_effect_str(s: &str, defaults: &EffectDefaults) -> Result<Effect, TransformError> {
    let s = s.trim();

    let (op, params) = match s.split_once(':') {
        Some((op, params)) => (op, Some(params.trim())),
        None => (s, None),
    };

    match op.to_lowercase().as_str() {
        "pixelate" | "pixelize" | "mosaic" => {
            let block_size = parse_positive(params, "pixelate", defaults.pixelate_block)?;
            Ok(Effect::Pixelate { block_size })
        }
        "ascii" | "ascii-art" => {
            let width = parse_positive(params, "ascii", defaults.ascii_width)?;
            Ok(Effect::Ascii { width })
        }
        "invert" | "invert_colors" | "negative" => no_params(params, "invert", Effect::Invert),
        "mirror-h" | "flip-h" | "flip_left_right" | "mirrorh" => {
            no_params(params, "mirror-h", Effect::MirrorH)
        }
        "mirror-v" | "flip-v" | "flip_top_bottom" | "mirrorv" => {
            no_params(params, "mirror-v", Effect::MirrorV)
        }
        "heatmap" | "heat_map" | "heat-map" => no_params(params, "heatmap", Effect::Heatmap),
        "sticker" | "stiker" => {
            let max_edge = parse_positive(params, "sticker", defaults.sticker_max_edge)?;
            Ok(Effect::Sticker { max_edge })
        }
        "grayscale" | "greyscale" | "gray" | "grey" => {
            no_params(params, "grayscale", Effect::Grayscale)
        }
        "resize" => {
            let width = parse_positive(params, "resize", defaults.resize_width)?;
            Ok(Effect::Resize { width })
        }
        _ => Err(TransformError::UnknownEffect(op.to_string())),
    }
}

/// Parse an optional positive integer parameter, or fall back to `default`.
fn parse_positive(params: Option<&str>, op: &str, default: u32) -> Result<u32, TransformError> {
    let Some(raw) = params else {
        return Ok(default);
    };
    if raw.is_empty() {
        return Err(TransformError::MissingParameter {
            op: op.to_string(),
            param: "value after ':'".to_string(),
        });
    }
    let value = raw
        .parse::<u32>()
        .map_err(|_| TransformError::parameter(op, format!("cannot parse '{}' as a number", raw)))?;
    if value == 0 {
        return Err(match op {
            "pixelate" => TransformError::parameter(op, "block size must be positive"),
            _ => TransformError::dimension(op, "size must be positive"),
        });
    }
    Ok(value)
}

fn no_params(params: Option<&str>, op: &str, effect: Effect) -> Result<Effect, TransformError> {
    match params {
        Some(p) if !p.is_empty() => {
            Err(TransformError::parameter(op, format!("takes no parameter, got '{}'", p)))
        }
        _ => Ok(effect),
    }
}
