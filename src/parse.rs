//! Parsing palettes from text.
//!
//! A palette is written as a list of `#rrggbb` hex codes separated by any mix of
//! commas, spaces, and line breaks, for example `"#0f380f, #306230, #8bac0f, #9bbc0f"`.

use crate::Palette;
use palette::Srgb;
use std::{
    error::Error,
    fmt::{self, Display},
};

/// Error type for parsing hex colors and palettes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// A color was not exactly 7 characters long (`#` followed by 6 hex digits).
    ///
    /// The inner value is the offending text.
    InvalidLength(String),
    /// A color did not start with `#`.
    MissingHash(String),
    /// A color contained a character that is not a hex digit.
    ///
    /// The inner value is the offending text.
    InvalidHex(String),
    /// The text did not contain any colors.
    Empty,
}

impl Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength(text) => {
                write!(f, "invalid hex color '{text}' (expected the form #rrggbb)")
            }
            ParseColorError::MissingHash(text) => {
                write!(f, "hex color '{text}' must start with '#'")
            }
            ParseColorError::InvalidHex(text) => {
                write!(f, "hex color '{text}' contains a non-hex character")
            }
            ParseColorError::Empty => write!(f, "palette must contain at least one color"),
        }
    }
}

impl Error for ParseColorError {}

/// Returns whether `c` separates colors in a palette.
fn is_separator(c: char) -> bool {
    matches!(c, ',' | ' ' | '\n' | '\r')
}

/// Parses a single `#rrggbb` color.
///
/// # Examples
/// ```
/// # use palettefy::parse::parse_color;
/// # use palette::Srgb;
/// assert_eq!(parse_color("#8bac0f"), Ok(Srgb::new(0x8b, 0xac, 0x0f)));
/// assert!(parse_color("#fff").is_err());
/// ```
pub fn parse_color(text: &str) -> Result<Srgb<u8>, ParseColorError> {
    if text.len() != 7 {
        return Err(ParseColorError::InvalidLength(text.to_owned()));
    }

    let Some(hex) = text.strip_prefix('#') else {
        return Err(ParseColorError::MissingHash(text.to_owned()));
    };

    let invalid_hex = || ParseColorError::InvalidHex(text.to_owned());

    // from_str_radix also accepts a leading '+'
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid_hex());
    }

    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
            .ok_or_else(invalid_hex)
    };

    Ok(Srgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Parses a palette of `#rrggbb` colors separated by commas, spaces, or line breaks.
///
/// Empty entries (e.g., from repeated separators) are skipped,
/// and the order of the colors is preserved.
///
/// # Examples
/// ```
/// # use palettefy::parse::{parse_palette, ParseColorError};
/// # fn main() -> Result<(), ParseColorError> {
/// let palette = parse_palette("#000000 #ffffff")?;
/// assert_eq!(palette.len(), 2);
///
/// let gameboy = parse_palette("#0f380f,\n#306230, #8bac0f,#9bbc0f\r\n")?;
/// assert_eq!(gameboy.len(), 4);
///
/// assert_eq!(parse_palette(" , \n"), Err(ParseColorError::Empty));
/// # Ok(())
/// # }
/// ```
pub fn parse_palette(text: &str) -> Result<Palette, ParseColorError> {
    let colors = text
        .split(is_separator)
        .filter(|s| !s.is_empty())
        .map(parse_color)
        .collect::<Result<Vec<_>, _>>()?;

    Palette::new(colors).map_err(|_| ParseColorError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_colors() {
        assert_eq!(parse_color("#000000"), Ok(Srgb::new(0, 0, 0)));
        assert_eq!(parse_color("#FFfFff"), Ok(Srgb::new(255, 255, 255)));
        assert_eq!(parse_color("#0f380f"), Ok(Srgb::new(0x0f, 0x38, 0x0f)));
    }

    #[test]
    fn bad_lengths() {
        for text in ["", "#", "#fff", "#00000", "#0000000", "000000"] {
            assert_eq!(
                parse_color(text),
                Err(ParseColorError::InvalidLength(text.to_owned())),
                "{text}"
            );
        }
    }

    #[test]
    fn missing_hash() {
        assert_eq!(
            parse_color("x000000"),
            Err(ParseColorError::MissingHash("x000000".to_owned()))
        );
    }

    #[test]
    fn bad_hex() {
        for text in ["#00gg00", "#+10000", "#0000é", "# 00000"] {
            assert_eq!(
                parse_color(text),
                Err(ParseColorError::InvalidHex(text.to_owned())),
                "{text}"
            );
        }
    }

    #[test]
    fn palettes_preserve_order() {
        let palette = parse_palette("#0f380f, #306230,#8bac0f\n\n#9bbc0f\r\n").unwrap();
        assert_eq!(
            palette.as_slice(),
            &[
                Srgb::new(0x0f, 0x38, 0x0f),
                Srgb::new(0x30, 0x62, 0x30),
                Srgb::new(0x8b, 0xac, 0x0f),
                Srgb::new(0x9b, 0xbc, 0x0f),
            ]
        );
    }

    #[test]
    fn duplicate_colors_are_kept() {
        let palette = parse_palette("#123456 #123456").unwrap();
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn empty_palettes() {
        assert_eq!(parse_palette(""), Err(ParseColorError::Empty));
        assert_eq!(parse_palette(",,\r\n  "), Err(ParseColorError::Empty));
    }

    #[test]
    fn first_error_is_reported() {
        assert_eq!(
            parse_palette("#000000 #fff #ffffff"),
            Err(ParseColorError::InvalidLength("#fff".to_owned()))
        );
    }
}
