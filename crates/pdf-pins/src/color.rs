//! Colour parsing for user supplied colour strings

use crate::types::{PinError, Result, RgbColor};
use printpdf::{Color, Rgb};

/// Parse `#rgb`, `#rrggbb` (leading `#` optional) or a CSS colour name.
pub fn parse_color(value: &str) -> Result<RgbColor> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PinError::Config("Empty colour".to_string()));
    }

    if let Some(color) = parse_hex(trimmed) {
        return Ok(color);
    }

    palette::named::from_str(&trimmed.to_ascii_lowercase())
        .map(|c| RgbColor::new(c.red, c.green, c.blue))
        .ok_or_else(|| PinError::Config(format!("Unknown colour: {trimmed}")))
}

/// Parse an optional colour where an empty string means "not set".
pub fn parse_optional_color(value: &str) -> Result<Option<RgbColor>> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_color(value).map(Some)
    }
}

fn parse_hex(value: &str) -> Option<RgbColor> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(RgbColor::new(r, g, b))
        }
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some(RgbColor::new(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

impl RgbColor {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_pdf(self) -> Color {
        let (r, g, b) = self.to_unit();
        Color::Rgb(Rgb::new(r, g, b, None))
    }
}

impl std::str::FromStr for RgbColor {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self> {
        parse_color(s)
    }
}

impl std::fmt::Display for RgbColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    // Colours travel as strings so config files stay hand-editable
    impl Serialize for RgbColor {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for RgbColor {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            parse_color(&s).map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(parse_color("#ff8000").unwrap(), RgbColor::new(255, 128, 0));
        assert_eq!(parse_color("00FF00").unwrap(), RgbColor::new(0, 255, 0));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(parse_color("#fff").unwrap(), RgbColor::WHITE);
        assert_eq!(parse_color("#f00").unwrap(), RgbColor::new(255, 0, 0));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_color("white").unwrap(), RgbColor::WHITE);
        assert_eq!(parse_color("Black").unwrap(), RgbColor::BLACK);
        assert_eq!(parse_color(" red ").unwrap(), RgbColor::new(255, 0, 0));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_color("").is_err());
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("not-a-colour").is_err());
    }

    #[test]
    fn test_optional_empty_is_none() {
        assert_eq!(parse_optional_color("").unwrap(), None);
        assert_eq!(
            parse_optional_color("#000000").unwrap(),
            Some(RgbColor::BLACK)
        );
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(RgbColor::new(18, 52, 86).to_string(), "#123456");
    }
}
