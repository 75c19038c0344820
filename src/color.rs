//! Color parsing for configurable gradient stops
//!
//! Supports the following formats:
//! - Hex: `#RGB`, `#RRGGBB`
//! - Named: `blue`, `red`, `rebeccapurple`, ...
//! - Functional: `rgb()`, `hsl()`, `hwb()`, `oklch()`
//!
//! Rasters carry no alpha, so any alpha component is ignored.

use image::Rgb;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Hex color with a length other than 3 or 6 digits
    #[error("invalid hex color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Parse a color string into an RGB triple.
///
/// # Examples
///
/// ```
/// use pixmorph::color::parse_color;
///
/// assert_eq!(parse_color("#984f4f").unwrap(), image::Rgb([152, 79, 79]));
/// assert_eq!(parse_color("#00f").unwrap(), image::Rgb([0, 0, 255]));
/// assert_eq!(parse_color("red").unwrap(), image::Rgb([255, 0, 0]));
/// ```
pub fn parse_color(s: &str) -> Result<Rgb<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    match s.strip_prefix('#') {
        Some(hex) => parse_hex(hex),
        None => parse_css(s),
    }
}

fn parse_hex(hex: &str) -> Result<Rgb<u8>, ColorError> {
    if let Some(bad) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(bad));
    }

    let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map_err(|_| ColorError::InvalidHex('?'));
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError::InvalidHex('?'));

    match hex.len() {
        // #RGB doubles each digit
        3 => Ok(Rgb([digit(0)? * 17, digit(1)? * 17, digit(2)? * 17])),
        6 => Ok(Rgb([pair(0)?, pair(2)?, pair(4)?])),
        len => Err(ColorError::InvalidLength(len)),
    }
}

fn parse_css(s: &str) -> Result<Rgb<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    let rgb = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse(format!("cannot convert '{}' to RGB", s)))?;

    match rgb {
        CssColor::RGBA(rgba) => Ok(Rgb([rgba.red, rgba.green, rgba.blue])),
        CssColor::Float(float) => match float.as_ref() {
            FloatColor::RGB(c) => {
                let to_u8 = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
                Ok(Rgb([to_u8(c.r), to_u8(c.g), to_u8(c.b)]))
            }
            _ => Err(ColorError::CssParse(format!("unexpected float color for '{}'", s))),
        },
        _ => Err(ColorError::CssParse(format!("'{}' did not produce an RGB color", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_short_and_long() {
        assert_eq!(parse_color("#F00"), Ok(Rgb([255, 0, 0])));
        assert_eq!(parse_color("#0000ff"), Ok(Rgb([0, 0, 255])));
    }

    #[test]
    fn test_hex_errors() {
        assert_eq!(parse_color("#12345"), Err(ColorError::InvalidLength(5)));
        assert_eq!(parse_color("#GG0000"), Err(ColorError::InvalidHex('G')));
        assert_eq!(parse_color("  "), Err(ColorError::Empty));
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("blue"), Ok(Rgb([0, 0, 255])));
        assert_eq!(parse_color("red"), Ok(Rgb([255, 0, 0])));
    }

    #[test]
    fn test_functional_rgb() {
        assert_eq!(parse_color("rgb(152, 79, 79)"), Ok(Rgb([152, 79, 79])));
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(parse_color("heat"), Err(ColorError::CssParse(_))));
    }
}
