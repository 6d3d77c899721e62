//! Color value parsing.
//!
//! Supports:
//!
//! - Named colors: `red`, `green`, `blue`, etc. (8 ANSI colors)
//! - Bright variants: `bright_red`, `bright_green`, etc., and `gray`/`grey`
//! - 256-color palette: `0` through `255`
//! - RGB hex: `"#ff6b35"` or `"#fff"` (3 or 6 digit)
//!
//! # Example
//!
//! ```rust
//! use termage_render::style::ColorDef;
//!
//! let red = ColorDef::parse_string("red").unwrap();
//! assert_eq!(red.fg_params(), "31");
//! assert_eq!(red.bg_params(), "41");
//!
//! let gray = ColorDef::parse_string("gray").unwrap();
//! assert_eq!(gray.bg_params(), "100");
//!
//! let orange = ColorDef::parse_string("#ff6b35").unwrap();
//! assert_eq!(orange.fg_params(), "38;2;255;107;53");
//! ```

use console::Color;

/// Error returned when a color value cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("unknown color name: {0}")]
    UnknownName(String),

    #[error("invalid hex color: #{0} (must be 3 or 6 hex digits)")]
    InvalidHex(String),

    #[error("color palette index {0} out of range (0-255)")]
    OutOfRange(u64),

    #[error("invalid color value: {0}")]
    InvalidValue(String),
}

/// Parsed color definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorDef {
    /// One of the 8 base ANSI colors.
    Named(Color),
    /// Bright variant of a base color.
    Bright(Color),
    /// 256-color palette index.
    Color256(u8),
    /// True color RGB.
    Rgb(u8, u8, u8),
}

impl ColorDef {
    /// Parses a color from a string value.
    pub fn parse_string(s: &str) -> Result<Self, ColorError> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            let index = s
                .parse::<u64>()
                .map_err(|_| ColorError::InvalidValue(s.to_string()))?;
            return Self::palette(index);
        }

        Self::parse_named(s)
    }

    fn palette(index: u64) -> Result<Self, ColorError> {
        u8::try_from(index)
            .map(ColorDef::Color256)
            .map_err(|_| ColorError::OutOfRange(index))
    }

    /// Parses a hex color code (without the # prefix).
    fn parse_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());
        if !hex.is_ascii() {
            return Err(invalid());
        }
        match hex.len() {
            // #rgb -> #rrggbb
            3 => {
                let digit = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(ColorDef::Rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
                Ok(ColorDef::Rgb(pair(0)?, pair(2)?, pair(4)?))
            }
            _ => Err(invalid()),
        }
    }

    /// Parses a named color (including bright variants).
    fn parse_named(name: &str) -> Result<Self, ColorError> {
        let name_lower = name.to_lowercase();

        if let Some(base) = name_lower.strip_prefix("bright_") {
            return base_color(base)
                .map(ColorDef::Bright)
                .ok_or_else(|| ColorError::UnknownName(name.to_string()));
        }

        match name_lower.as_str() {
            "gray" | "grey" => Ok(ColorDef::Bright(Color::Black)),
            other => base_color(other)
                .map(ColorDef::Named)
                .ok_or_else(|| ColorError::UnknownName(name.to_string())),
        }
    }

    /// SGR parameters selecting this color as the foreground.
    pub fn fg_params(&self) -> String {
        self.params(30, 90, 38)
    }

    /// SGR parameters selecting this color as the background.
    pub fn bg_params(&self) -> String {
        self.params(40, 100, 48)
    }

    fn params(&self, base: u8, bright: u8, extended: u8) -> String {
        match self {
            ColorDef::Named(c) => (base + ansi_index(*c)).to_string(),
            ColorDef::Bright(c) => (bright + ansi_index(*c)).to_string(),
            ColorDef::Color256(n) => format!("{};5;{}", extended, n),
            ColorDef::Rgb(r, g, b) => format!("{};2;{};{};{}", extended, r, g, b),
        }
    }
}

fn base_color(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        _ => return None,
    };
    Some(color)
}

fn ansi_index(color: Color) -> u8 {
    match color {
        Color::Black => 0,
        Color::Red => 1,
        Color::Green => 2,
        Color::Yellow => 3,
        Color::Blue => 4,
        Color::Magenta => 5,
        Color::Cyan => 6,
        Color::White => 7,
        // only the 8 base colors are ever stored in Named/Bright
        _ => 7,
    }
}
