//! Style state captured into receipt items.

use serde::{Deserialize, Serialize};

use crate::Color;

/// Horizontal alignment of an item within the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Anchor at the left margin.
    #[default]
    Left,
    /// Anchor at the horizontal center of the canvas.
    Center,
    /// Anchor at the right margin.
    Right,
}

/// Margins around the receipt content, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    /// Space above the first item.
    pub top: u32,
    /// Space below the last item.
    pub bottom: u32,
    /// Space left of the content.
    pub left: u32,
    /// Space right of the content.
    pub right: u32,
}

impl Margins {
    /// The same margin on all four sides.
    #[must_use]
    pub const fn uniform(margin: u32) -> Self {
        Self {
            top: margin,
            bottom: margin,
            left: margin,
            right: margin,
        }
    }

    /// Vertical and horizontal margin pairs.
    #[must_use]
    pub const fn symmetric(top_bottom: u32, left_right: u32) -> Self {
        Self {
            top: top_bottom,
            bottom: top_bottom,
            left: left_right,
            right: left_right,
        }
    }

    /// Combined horizontal margin.
    #[must_use]
    pub const fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    /// Combined vertical margin.
    #[must_use]
    pub const fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

/// Opaque handle to a font registered with the renderer's font store.
///
/// `None` in a style means the built-in printer font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontId(usize);

impl FontId {
    /// Create a handle from a store index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The store index behind this handle.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for FontId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "font#{}", self.0)
    }
}

/// The mutable style scratch a [`crate::Receipt`] carries between appends.
///
/// Every append operation copies the current value into the created item, so
/// later changes never reach items already in the sequence. The one designed
/// exception is margin resolution for text, controlled by
/// [`crate::Receipt::with_live_margins`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Text size in pixels. Zero is accepted and renders degenerate output.
    pub text_size: f32,
    /// Foreground color for text and rules.
    pub color: Color,
    /// Background color. White is the canvas default and paints no band.
    pub background: Color,
    /// Font handle; `None` selects the built-in printer font.
    pub font: Option<FontId>,
    /// Horizontal alignment for appended items.
    pub align: Align,
    /// Content margins.
    pub margins: Margins,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            text_size: 0.0,
            color: Color::BLACK,
            background: Color::WHITE,
            font: None,
            align: Align::Left,
            margins: Margins::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_constructors() {
        let m = Margins::uniform(12);
        assert_eq!(m.top, 12);
        assert_eq!(m.right, 12);
        assert_eq!(m.horizontal(), 24);

        let m = Margins::symmetric(4, 16);
        assert_eq!(m.top, 4);
        assert_eq!(m.bottom, 4);
        assert_eq!(m.left, 16);
        assert_eq!(m.vertical(), 8);
    }

    #[test]
    fn test_style_defaults() {
        let s = Style::default();
        assert_eq!(s.text_size, 0.0);
        assert_eq!(s.color, Color::BLACK);
        assert_eq!(s.background, Color::WHITE);
        assert_eq!(s.align, Align::Left);
        assert!(s.font.is_none());
        assert_eq!(s.margins, Margins::default());
    }

    #[test]
    fn test_font_id_round_trip() {
        let id = FontId::new(3);
        assert_eq!(id.index(), 3);
        assert_eq!(id.to_string(), "font#3");
    }
}
