//! RGBA colors shared by the draw list, the texture generator and the scene data.

use serde::{Deserialize, Serialize};

use crate::renderer::pixels::Rgba8;

/// RGBA color with components in 0.0 - 1.0.
///
/// Scene data spells colors as `#RRGGBB` strings; they deserialize straight
/// into this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from RGB u8 values (0-255) with full opacity.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#RRGGBB` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `#RRGGBB`, alpha dropped.
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba8().to_array();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// CSS `rgba(...)` string for canvas fill/stroke styles.
    pub fn to_css(self) -> String {
        let [r, g, b, _] = self.to_rgba8().to_array();
        format!("rgba({r}, {g}, {b}, {:.3})", self.a.clamp(0.0, 1.0))
    }

    /// Create a color with the given alpha value.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear blend toward `other` by `t` (0 = self, 1 = other). Alpha included.
    pub fn mix(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Multiply RGB by `factor`, keeping alpha.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
            a: self.a,
        }
    }

    pub fn to_rgba8(self) -> Rgba8 {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba8::new(q(self.r), q(self.g), q(self.b), q(self.a))
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Page background behind every canvas (#0f172a).
    pub const BACKGROUND: Self = Self::rgb(15.0 / 255.0, 23.0 / 255.0, 42.0 / 255.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color '{value}', expected #RRGGBB"))
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
    fn parses_hex_with_and_without_hash() {
        let zan = Color::from_hex("#6A0DAD").unwrap();
        assert_eq!(zan.to_rgba8().to_array(), [0x6A, 0x0D, 0xAD, 255]);
        assert_eq!(Color::from_hex("ff4500"), Some(Color::rgb8(255, 69, 0)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GG0000").is_none());
        assert!(Color::from_hex("#ÿÿÿ").is_none());
    }

    #[test]
    fn hex_survives_serde() {
        let json = serde_json::to_string(&Color::rgb8(0x3A, 0x86, 0xFF)).unwrap();
        assert_eq!(json, "\"#3A86FF\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb8(0x3A, 0x86, 0xFF));
    }

    #[test]
    fn css_string_carries_alpha() {
        assert_eq!(Color::WHITE.with_alpha(0.25).to_css(), "rgba(255, 255, 255, 0.250)");
    }
}
