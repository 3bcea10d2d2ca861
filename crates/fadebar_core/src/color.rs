//! RGBA colors for the track and thumb overrides.
//!
//! Colors are stored as normalized floats and travel through configuration
//! files as CSS hex strings (`#rgb`, `#rrggbb` or `#rrggbbaa`).

use serde::{Deserialize, Serialize};

use crate::error::IndicatorError;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Translucent track used when the configuration has no override.
    pub const DEFAULT_TRACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.13,
    };

    /// Thumb used when the configuration has no override.
    pub const DEFAULT_THUMB: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.53,
    };

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS hex color.
    pub fn from_hex(hex: &str) -> Result<Self, IndicatorError> {
        let invalid = || IndicatorError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map(|v| v as f32 / 255.0);
        let short = |i: usize| {
            let c = &digits[i..i + 1];
            u8::from_str_radix(c, 16).map(|v| (v * 17) as f32 / 255.0)
        };

        let parsed = match digits.len() {
            3 => (short(0), short(1), short(2), Ok(1.0)),
            6 => (
                channel(&digits[0..2]),
                channel(&digits[2..4]),
                channel(&digits[4..6]),
                Ok(1.0),
            ),
            8 => (
                channel(&digits[0..2]),
                channel(&digits[2..4]),
                channel(&digits[4..6]),
                channel(&digits[6..8]),
            ),
            _ => return Err(invalid()),
        };

        match parsed {
            (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Self { r, g, b, a }),
            _ => Err(invalid()),
        }
    }

    /// Format as `#rrggbbaa`.
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            byte(self.a)
        )
    }

    /// Format as a CSS `rgba()` value for inline styles.
    pub fn to_css(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}

impl TryFrom<String> for Color {
    type Error = IndicatorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_six_digits() {
        let c = Color::from_hex("#ff8000").unwrap();
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.502).abs() < 0.01);
        assert!(c.b.abs() < 0.01);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_from_hex_short_and_alpha() {
        let c = Color::from_hex("#fff").unwrap();
        assert_eq!(c, Color::WHITE);

        let c = Color::from_hex("#00000080").unwrap();
        assert!((c.a - 0.502).abs() < 0.01);
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Color::from_hex("ff0000").is_err());
        assert!(Color::from_hex("#ff00").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_to_css() {
        assert_eq!(Color::rgb(1.0, 0.0, 0.0).to_css(), "rgba(255, 0, 0, 1)");
        assert_eq!(Color::rgba(0.0, 0.0, 0.0, 0.5).to_css(), "rgba(0, 0, 0, 0.5)");
    }

    #[test]
    fn test_hex_serde() {
        let json = serde_json::to_string(&Color::rgb(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(json, "\"#00ff00ff\"");
        let back: Color = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(back, Color::rgb(0.0, 1.0, 0.0));
    }
}
