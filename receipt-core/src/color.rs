//! RGBA colors for receipt content.

use serde::{Deserialize, Serialize};

use crate::{ReceiptError, ReceiptResult};

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Opaque white - the canvas default background.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque black - the default text color.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create an opaque color from RGB channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from RGBA channels.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#rrggbb` or `#rrggbbaa`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color.
    pub fn from_hex(hex: &str) -> ReceiptResult<Self> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ReceiptError::InvalidColor(hex.to_string()))?;

        let parse = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ReceiptError::InvalidColor(hex.to_string()))
        };

        match digits.len() {
            6 => Ok(Self::rgb(
                parse(&digits[0..2])?,
                parse(&digits[2..4])?,
                parse(&digits[4..6])?,
            )),
            8 => Ok(Self::rgba(
                parse(&digits[0..2])?,
                parse(&digits[2..4])?,
                parse(&digits[4..6])?,
                parse(&digits[6..8])?,
            )),
            _ => Err(ReceiptError::InvalidColor(hex.to_string())),
        }
    }

    /// Whether the color is fully opaque.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}
