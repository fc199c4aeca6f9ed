//! RGB colors for the radial gradient.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// An RGB color with components in `[0, 1]`.
///
/// Serialized as a `#rrggbb` hex string so parameter files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ParamError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ParamError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ParamError::InvalidColor(hex.to_string()))
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }

    /// Component-wise `self * (1 - t) + other * t`.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color::from(Vec3::from(self) * (1.0 - t) + Vec3::from(other) * t)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<Color> for Vec3 {
    fn from(c: Color) -> Self {
        Vec3::new(c.r, c.g, c.b)
    }
}

impl From<Vec3> for Color {
    fn from(v: Vec3) -> Self {
        Color::rgb(v.x, v.y, v.z)
    }
}

impl From<[f32; 3]> for Color {
    fn from(a: [f32; 3]) -> Self {
        Color::rgb(a[0], a[1], a[2])
    }
}

impl TryFrom<String> for Color {
    type Error = ParamError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse() {
        let c = Color::from_hex("#ff8000").unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);

        assert_eq!(Color::from_hex("ffffff").unwrap(), Color::WHITE);
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#ff00ff00").is_err());
    }

    #[test]
    fn test_hex_output() {
        assert_eq!(Color::rgb(1.0, 0.0, 0.5).to_hex(), "#ff0080");
        assert_eq!(Color::rgb(2.0, -1.0, 0.0).to_hex(), "#ff0000");
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::rgb(1.0, 0.4, 0.2);
        let b = Color::rgb(0.1, 0.2, 1.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);

        let mid = Color::BLACK.lerp(Color::WHITE, 0.25);
        assert!((mid.r - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_serde_as_hex() {
        let json = serde_json::to_string(&Color::rgb(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(json, "\"#00ff00\"");
        let back: Color = serde_json::from_str("\"#0000ff\"").unwrap();
        assert_eq!(back, Color::rgb(0.0, 0.0, 1.0));
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }
}
