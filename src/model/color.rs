//! Exact RGB color used as a legend key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An RGB triple. Equality is exact on all three channels.
///
/// Serializes as a `[r, g, b]` array, the shape inference services emit
/// in their legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Read the RGB channels of an RGBA pixel, ignoring alpha.
    ///
    /// `pixel` must hold at least three samples.
    #[inline]
    pub fn from_rgba(pixel: &[u8]) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2])
    }

    /// Channels as an array.
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_ignores_alpha() {
        assert_eq!(Color::from_rgba(&[1, 2, 3, 0]), Color::new(1, 2, 3));
        assert_eq!(Color::from_rgba(&[1, 2, 3, 255]), Color::new(1, 2, 3));
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_string(&Color::new(0, 128, 0)).unwrap();
        assert_eq!(json, "[0,128,0]");

        let color: Color = serde_json::from_str("[128, 0, 0]").unwrap();
        assert_eq!(color, Color::new(128, 0, 0));
    }

    #[test]
    fn test_out_of_range_channel_rejected() {
        assert!(serde_json::from_str::<Color>("[256, 0, 0]").is_err());
        assert!(serde_json::from_str::<Color>("[-1, 0, 0]").is_err());
        assert!(serde_json::from_str::<Color>("[1, 2]").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::new(10, 20, 30).to_string(), "(10, 20, 30)");
    }
}
