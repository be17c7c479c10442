//! Receipt items - the paintable units of the vertical sequence.
//!
//! Each variant is a standalone struct holding the style snapshot taken at
//! append time; [`ReceiptItem`] wraps the closed set. The measure/paint
//! contract over these variants lives in the renderer crate, which keeps
//! this crate free of rasterization concerns.

use serde::{Deserialize, Serialize};

use crate::{Align, Bitmap, Color, FontId, Margins};

/// A single run of text with its captured style.
///
/// A run appended with `new_line = false` reserves no vertical space of its
/// own: it paints into the band of the next height-bearing item. This is the
/// mechanism for composing multiple styled runs on one visual line (for
/// example a left-aligned label and a right-aligned price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    /// The text content.
    pub content: String,
    /// Text size in pixels at append time.
    pub size: f32,
    /// Foreground color at append time.
    pub color: Color,
    /// Background color at append time. Non-white paints a band behind the
    /// text spanning the content surface; pure black forces white glyphs.
    pub background: Color,
    /// Font handle at append time; `None` is the built-in printer font.
    pub font: Option<FontId>,
    /// Horizontal alignment at append time.
    pub align: Align,
    /// Margins at append time. Used for positioning only when the receipt's
    /// live-margins flag is off.
    pub margins: Margins,
    /// Canvas width minus horizontal margins at append time. Reserved for
    /// line wrapping; not used for positioning.
    pub content_width: u32,
    /// Whether this run reserves its own vertical band.
    pub new_line: bool,
}

/// An image blitted at its natural size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    /// The RGBA pixel buffer.
    pub bitmap: Bitmap,
    /// Horizontal alignment at append time.
    pub align: Align,
}

/// A spacer that reserves vertical space and paints nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankSpaceItem {
    /// Reserved height in pixels.
    pub height: u32,
}

/// A horizontal separator line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleItem {
    /// Line length in pixels.
    pub length: u32,
    /// Line color at append time.
    pub color: Color,
    /// Horizontal alignment at append time.
    pub align: Align,
}

/// One paintable unit in the receipt's vertical sequence.
///
/// The set of variants is closed: the renderer dispatches over exactly
/// these four.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ReceiptItem {
    /// A text run.
    Text(TextItem),
    /// An image.
    Image(ImageItem),
    /// A blank spacer.
    BlankSpace(BlankSpaceItem),
    /// A separator rule.
    Rule(RuleItem),
}

impl ReceiptItem {
    /// A short name for logging.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::BlankSpace(_) => "blank_space",
            Self::Rule(_) => "rule",
        }
    }
}
