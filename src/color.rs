//! Color parsing for appearance slot colors
//!
//! Slot colors accept:
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - Functional and named CSS colors: `rgb()`, `hsl()`, `red`, ...
//! - The sentinels `transparent`, `none` and the empty string, which all mean
//!   "draw nothing for this slot"

use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

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

/// A straight-alpha RGBA color as it appears in the render tree.
///
/// Serializes as `#RRGGBBAA` so render tree dumps stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Paint(pub [u8; 4]);

impl Paint {
    pub const TRANSPARENT: Paint = Paint([0, 0, 0, 0]);
    pub const BLACK: Paint = Paint([0, 0, 0, 255]);
    pub const WHITE: Paint = Paint([255, 255, 255, 255]);
    pub const MAGENTA: Paint = Paint([255, 0, 255, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Paint([r, g, b, 255])
    }

    pub fn alpha(self) -> u8 {
        self.0[3]
    }

    pub fn is_transparent(self) -> bool {
        self.0[3] == 0
    }

    /// Multiply the alpha channel by `factor` (clamped to 0..=1).
    pub fn with_opacity(self, factor: f32) -> Self {
        let [r, g, b, a] = self.0;
        let a = (a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Paint([r, g, b, a])
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

impl Serialize for Paint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Returns true for the color values that mean "no paint".
pub fn is_transparent_sentinel(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s.eq_ignore_ascii_case("transparent") || s.eq_ignore_ascii_case("none")
}

/// Resolve a slot color string into paint.
///
/// Sentinels resolve to [`Paint::TRANSPARENT`]. Anything unparseable degrades
/// to magenta so that a broken color is visible but never fatal.
pub fn resolve_slot_color(s: &str) -> Paint {
    if is_transparent_sentinel(s) {
        return Paint::TRANSPARENT;
    }
    match parse_color(s.trim()) {
        Ok(paint) => paint,
        Err(e) => {
            tracing::debug!(color = s, error = %e, "unparseable slot color, using magenta");
            Paint::MAGENTA
        }
    }
}

/// Parse a CSS color string into RGBA paint.
///
/// # Examples
///
/// ```
/// use toonkit::color::{parse_color, Paint};
///
/// assert_eq!(parse_color("#F00").unwrap(), Paint([255, 0, 0, 255]));
/// assert_eq!(parse_color("#FF450080").unwrap(), Paint([255, 69, 0, 128]));
/// assert_eq!(parse_color("rgb(0, 255, 0)").unwrap(), Paint([0, 255, 0, 255]));
/// assert_eq!(parse_color("blue").unwrap(), Paint([0, 0, 255, 255]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Paint, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    // Fast path for hex colors
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    parse_css_color(s)
}

/// Parse the digits of a hex color (without the leading '#')
fn parse_hex_color(hex: &str) -> Result<Paint, ColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    // All characters are ASCII hex digits past this point, so byte slicing is safe.
    let digits: Vec<u8> = hex.bytes().map(hex_value).collect();
    match digits.len() {
        3 => Ok(Paint([digits[0] * 17, digits[1] * 17, digits[2] * 17, 255])),
        4 => Ok(Paint([digits[0] * 17, digits[1] * 17, digits[2] * 17, digits[3] * 17])),
        6 => Ok(Paint([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
            255,
        ])),
        8 => Ok(Paint([
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
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Paint, ColorError> {
    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    css_color_to_paint(css_color)
}

/// Convert a lightningcss CssColor to paint
fn css_color_to_paint(color: CssColor) -> Result<Paint, ColorError> {
    use lightningcss::values::color::FloatColor;

    let rgb_color = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Paint([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => {
                let r = (rgb.r * 255.0).round() as u8;
                let g = (rgb.g * 255.0).round() as u8;
                let b = (rgb.b * 255.0).round() as u8;
                let a = (rgb.alpha * 255.0).round() as u8;
                Ok(Paint([r, g, b, a]))
            }
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}
