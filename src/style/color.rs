//! Concrete RGB colors and the device's named palette.

use std::fmt;
use std::str::FromStr;

/// A concrete 24-bit color as understood by the rendering primitives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREY: Color = Color::rgb(122, 122, 122);
    pub const RED: Color = Color::rgb(248, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const PURPLE: Color = Color::rgb(0, 255, 255);
    pub const BLUE: Color = Color::rgb(39, 230, 228);
    pub const DARK_BLUE: Color = Color::rgb(0, 153, 152);
    pub const WHITE_BLUE: Color = Color::rgb(200, 255, 255);
    pub const LIGHT_BROWN: Color = Color::rgb(255, 132, 61);
    pub const DARK_BROWN: Color = Color::rgb(89, 37, 6);

    /// Create a color from its channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Look up one of the named device colors.
    pub fn named(name: &str) -> Option<Color> {
        let color = match name {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "grey" | "gray" => Self::GREY,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "yellow" => Self::YELLOW,
            "purple" => Self::PURPLE,
            "blue" => Self::BLUE,
            "dark_blue" => Self::DARK_BLUE,
            "white_blue" => Self::WHITE_BLUE,
            "light_brown" => Self::LIGHT_BROWN,
            "dark_brown" => Self::DARK_BROWN,
            "background" => Color::rgb(255, 200, 140),
            "oob" => Color::rgb(255, 180, 0),
            "worm" => Color::rgb(155, 0, 155),
            _ => return None,
        };
        Some(color)
    }

    /// Parse `rrggbb` or `rgb` hex digits (no leading `#`).
    pub fn from_hex(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        match digits.len() {
            6 => {
                let r = u8::from_str_radix(digits.get(0..2)?, 16).ok()?;
                let g = u8::from_str_radix(digits.get(2..4)?, 16).ok()?;
                let b = u8::from_str_radix(digits.get(4..6)?, 16).ok()?;
                Some(Color::rgb(r, g, b))
            }
            3 => {
                // Short form: each digit is doubled.
                let mut channels = [0u8; 3];
                for (slot, ch) in channels.iter_mut().zip(digits.chars()) {
                    let v = ch.to_digit(16)? as u8;
                    *slot = v * 16 + v;
                }
                Some(Color::rgb(channels[0], channels[1], channels[2]))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned when a string is neither a hex code nor a named color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color `{0}`")]
pub struct InvalidColor(pub String);

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if s.starts_with('#') {
            Color::from_hex(s)
        } else {
            Color::named(s)
        };
        parsed.ok_or_else(|| InvalidColor(s.to_owned()))
    }
}
