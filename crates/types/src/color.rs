//! Accent colours carried on cards. Layout never looks at them; they ride along
//! so the renderer can repaint a face (filler backs, continuation backs) in the
//! card's own colour.
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::gray(0x40)
    }
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Self {
            r: value,
            g: value,
            b: value,
        }
    }

    /// Parse `#RGB` or `#RRGGBB`.
    pub fn parse_hex(s: &str) -> Result<Color, String> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| format!("Color must start with #, got: {}", s))?;

        if !hex.is_ascii() {
            return Err(format!("Invalid hex color: {}", s));
        }

        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|e| format!("Invalid channel '{}': {}", digits, e))
        };

        match hex.len() {
            3 => Ok(Color {
                r: channel(&hex[0..1].repeat(2))?,
                g: channel(&hex[1..2].repeat(2))?,
                b: channel(&hex[2..3].repeat(2))?,
            }),
            6 => Ok(Color {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            n => Err(format!("Invalid hex color length: expected 3 or 6, got {}", n)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_long_hex() {
        assert_eq!(Color::parse_hex("#f80").unwrap(), Color::rgb(0xff, 0x88, 0x00));
        assert_eq!(Color::parse_hex("#1a2B3c").unwrap(), Color::rgb(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Color::parse_hex("red").is_err());
        assert!(Color::parse_hex("#12345").is_err());
        assert!(Color::parse_hex("#gg0000").is_err());
    }

    #[test]
    fn test_parse_rejects_multibyte_digits() {
        // three bytes long, but not three digits
        assert!(Color::parse_hex("#é1").is_err());
        assert!(Color::parse_hex("#12345é").is_err());
        assert!(serde_json::from_str::<Color>("\"#ab€\"").is_err());
    }

    #[test]
    fn test_display_round_trips_through_serde() {
        let c = Color::rgb(0x12, 0xab, 0xef);
        assert_eq!(c.to_string(), "#12abef");
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(serde_json::from_str::<Color>(&json).unwrap(), c);
    }
}
