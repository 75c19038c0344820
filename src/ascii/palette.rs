//! Character palettes for ASCII rendering

use std::fmt;

use crate::transforms::TransformError;

/// Default gradient, darkest to lightest.
pub const DEFAULT_PALETTE: &str = "@%#*+=-:. ";

/// Ordered, non-empty set of distinct characters.
///
/// Index 0 renders the darkest intensities, the last index the lightest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiPalette {
    chars: Vec<char>,
}

impl AsciiPalette {
    /// Build a palette from free-form text.
    ///
    /// Repeated characters are dropped, keeping the first occurrence, so
    /// `"aabbcc"` becomes `"abc"`. Line breaks are discarded because they
    /// would split rows.
    ///
    /// # Errors
    ///
    /// `InvalidPalette` if nothing usable is left.
    pub fn new(text: &str) -> Result<Self, TransformError> {
        let mut chars: Vec<char> = Vec::new();
        for c in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }

        if chars.is_empty() {
            return Err(TransformError::InvalidPalette(
                "palette needs at least one character".to_string(),
            ));
        }
        Ok(Self { chars })
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character for an intensity: index `floor(p * len / 256)`.
    pub fn char_for(&self, intensity: u8) -> char {
        let idx = usize::from(intensity) * self.chars.len() / 256;
        self.chars[idx.min(self.chars.len() - 1)]
    }
}

impl Default for AsciiPalette {
    fn default() -> Self {
        Self { chars: DEFAULT_PALETTE.chars().collect() }
    }
}

impl fmt::Display for AsciiPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{}", c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = AsciiPalette::default();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.to_string(), DEFAULT_PALETTE);
    }

    #[test]
    fn test_new_dedups_in_first_occurrence_order() {
        let palette = AsciiPalette::new("aabbcc").unwrap();
        assert_eq!(palette.chars(), &['a', 'b', 'c']);

        let palette = AsciiPalette::new("cabbac").unwrap();
        assert_eq!(palette.chars(), &['c', 'a', 'b']);
    }

    #[test]
    fn test_new_drops_line_breaks() {
        let palette = AsciiPalette::new("#.\r\n").unwrap();
        assert_eq!(palette.to_string(), "#.");
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(AsciiPalette::new(""), Err(TransformError::InvalidPalette(_))));
        assert!(matches!(AsciiPalette::new("\n\n"), Err(TransformError::InvalidPalette(_))));
    }

    #[test]
    fn test_new_keeps_spaces_and_unicode() {
        let palette = AsciiPalette::new("█▓ ").unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.char_for(255), ' ');
    }

    #[test]
    fn test_char_for_buckets() {
        let palette = AsciiPalette::default();
        assert_eq!(palette.char_for(0), '@');
        assert_eq!(palette.char_for(25), '@');
        assert_eq!(palette.char_for(26), '%');
        assert_eq!(palette.char_for(128), '=');
        assert_eq!(palette.char_for(255), ' ');
    }

    #[test]
    fn test_char_for_single_char_palette() {
        let palette = AsciiPalette::new("x").unwrap();
        assert_eq!(palette.char_for(0), 'x');
        assert_eq!(palette.char_for(255), 'x');
    }
}
