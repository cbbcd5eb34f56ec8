//! Canvas colors and color string parsing
//!
//! Pixels are plain RGBA values compared by exact equality. Configuration and
//! scene files name colors as strings:
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - Functional: `rgb()`, `rgba()`, `hsl()`, `hsla()`, `hwb()`, `oklch()`
//! - Named: `red`, `blue`, `transparent`, etc.

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

/// A single canvas pixel value (red, green, blue, alpha).
pub type Color = Rgba<u8>;

pub const BLACK: Color = Rgba([0, 0, 0, 255]);
pub const WHITE: Color = Rgba([255, 255, 255, 255]);
pub const RED: Color = Rgba([255, 0, 0, 255]);
pub const BLUE: Color = Rgba([0, 0, 255, 255]);
pub const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Parse a color string into an RGBA color.
///
/// Hex strings take a fast path; everything else is handed to lightningcss
/// and converted to sRGB.
///
/// # Examples
///
/// ```
/// use pxfill::color::{parse_color, BLACK};
///
/// assert_eq!(parse_color("#000").unwrap(), BLACK);
/// assert_eq!(parse_color("blue").unwrap(), image::Rgba([0, 0, 255, 255]));
/// assert_eq!(parse_color("rgb(255, 0, 0)").unwrap(), image::Rgba([255, 0, 0, 255]));
/// ```
pub fn parse_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    parse_css_color(s)
}

/// Format a color as `#RRGGBBAA`.
pub fn format_hex(color: Color) -> String {
    let Rgba([r, g, b, a]) = color;
    format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
}

/// Parse the digits of a hex color (without the leading '#')
fn parse_hex_color(hex: &str) -> Result<Color, ColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    // All characters are ASCII hex digits from here on, so byte indexing is safe
    let digits: Vec<u8> = hex.bytes().map(hex_value).collect();

    match digits.len() {
        3 => Ok(Rgba([digits[0] * 17, digits[1] * 17, digits[2] * 17, 255])),
        4 => Ok(Rgba([digits[0] * 17, digits[1] * 17, digits[2] * 17, digits[3] * 17])),
        6 => Ok(Rgba([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
            255,
        ])),
        8 => Ok(Rgba([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
            digits[6] * 16 + digits[7],
        ])),
        len => Err(ColorError::InvalidLength(len)),
    }
}

fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Color, ColorError> {
    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    css_color_to_rgba(css_color)
}

/// Convert a lightningcss CssColor to RGBA
fn css_color_to_rgba(color: CssColor) -> Result<Color, ColorError> {
    use lightningcss::values::color::FloatColor;

    let rgb_color = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => {
                let r = (rgb.r * 255.0).round() as u8;
                let g = (rgb.g * 255.0).round() as u8;
                let b = (rgb.b * 255.0).round() as u8;
                let a = (rgb.alpha * 255.0).round() as u8;
                Ok(Rgba([r, g, b, a]))
            }
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}
