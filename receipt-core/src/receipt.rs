//! The receipt document and its fluent builder surface.

use serde::{Deserialize, Serialize};

use crate::{
    Align, Bitmap, BlankSpaceItem, Color, FontId, ImageItem, Margins, ReceiptItem, ReceiptResult,
    RuleItem, Style, TextItem,
};

/// A receipt document: a fixed canvas width, a mutable style scratch and an
/// append-only sequence of items. Insertion order is paint order.
///
/// Configuration calls mutate the style scratch and return the receipt for
/// chaining; append calls snapshot the current style into the created item.
/// No validation happens here - degenerate configurations (zero text size,
/// margins wider than the canvas) surface when the document is rendered.
///
/// ```
/// use receipt_core::{Align, Receipt};
///
/// let receipt = Receipt::new(384)
///     .with_text_size(24.0)
///     .with_align(Align::Center)
///     .add_text("BANDROLL CAFE")
///     .with_text_size(18.0)
///     .with_align(Align::Left)
///     .add_text("espresso")
///     .add_rule();
/// assert_eq!(receipt.item_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    width: u32,
    style: Style,
    items: Vec<ReceiptItem>,
    live_margins: bool,
}

impl Receipt {
    /// Create an empty receipt for a canvas of the given width.
    ///
    /// The width is fixed for the document's lifetime; height is computed
    /// from content at render time.
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self {
            width,
            style: Style::default(),
            items: Vec::new(),
            live_margins: true,
        }
    }

    // ======================================================================
    // Style configuration
    // ======================================================================

    /// Set the text size for subsequent text appends.
    #[must_use]
    pub fn with_text_size(mut self, size: f32) -> Self {
        self.style.text_size = size;
        self
    }

    /// Set the foreground color for subsequent text and rule appends.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    /// Set the background color for subsequent text appends.
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.style.background = color;
        self
    }

    /// Select a registered font for subsequent text appends.
    #[must_use]
    pub fn with_font(mut self, font: FontId) -> Self {
        self.style.font = Some(font);
        self
    }

    /// Revert subsequent text appends to the built-in printer font.
    #[must_use]
    pub fn with_default_font(mut self) -> Self {
        self.style.font = None;
        self
    }

    /// Set the horizontal alignment for subsequent appends.
    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.style.align = align;
        self
    }

    /// Set the same margin on all four sides.
    #[must_use]
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.style.margins = Margins::uniform(margin);
        self
    }

    /// Set vertical and horizontal margin pairs.
    #[must_use]
    pub fn with_margins(mut self, top_bottom: u32, left_right: u32) -> Self {
        self.style.margins = Margins::symmetric(top_bottom, left_right);
        self
    }

    /// Set the top margin.
    #[must_use]
    pub fn with_margin_top(mut self, margin: u32) -> Self {
        self.style.margins.top = margin;
        self
    }

    /// Set the bottom margin.
    #[must_use]
    pub fn with_margin_bottom(mut self, margin: u32) -> Self {
        self.style.margins.bottom = margin;
        self
    }

    /// Set the left margin.
    #[must_use]
    pub fn with_margin_left(mut self, margin: u32) -> Self {
        self.style.margins.left = margin;
        self
    }

    /// Set the right margin.
    #[must_use]
    pub fn with_margin_right(mut self, margin: u32) -> Self {
        self.style.margins.right = margin;
        self
    }

    /// Choose how text items resolve margins at paint time.
    ///
    /// When `true` (the default), left/right text positioning and the text
    /// background band read the receipt's margins as they are at render
    /// time, so a margin change after an append moves text appended
    /// earlier. When `false`, each text item positions against the margins
    /// captured when it was appended.
    ///
    /// The live behavior matches the historical layout engine this crate
    /// descends from, where margins were shared mutable state between the
    /// builder and every item.
    #[must_use]
    pub fn with_live_margins(mut self, live: bool) -> Self {
        self.live_margins = live;
        self
    }

    // ======================================================================
    // Item appends
    // ======================================================================

    /// Append a text line under the current style.
    #[must_use]
    pub fn add_text(self, text: impl Into<String>) -> Self {
        self.push_text(text.into(), true)
    }

    /// Append a zero-height text run under the current style.
    ///
    /// The run reserves no vertical space: it paints into the band of the
    /// next height-bearing item, overlaying it. Use this to stack runs with
    /// different alignment or color on one visual line, then finish the
    /// line with [`Receipt::add_text`].
    #[must_use]
    pub fn add_inline_text(self, text: impl Into<String>) -> Self {
        self.push_text(text.into(), false)
    }

    fn push_text(self, content: String, new_line: bool) -> Self {
        let content_width = self.width.saturating_sub(self.style.margins.horizontal());
        let item = TextItem {
            content,
            size: self.style.text_size,
            color: self.style.color,
            background: self.style.background,
            font: self.style.font,
            align: self.style.align,
            margins: self.style.margins,
            content_width,
            new_line,
        };
        self.push(ReceiptItem::Text(item))
    }

    /// Append an image, aligned under the current alignment.
    #[must_use]
    pub fn add_image(self, bitmap: Bitmap) -> Self {
        let align = self.style.align;
        self.push(ReceiptItem::Image(ImageItem { bitmap, align }))
    }

    /// Append a blank spacer of the given height.
    #[must_use]
    pub fn add_blank_space(self, height: u32) -> Self {
        self.push(ReceiptItem::BlankSpace(BlankSpaceItem { height }))
    }

    /// Append a blank spacer one text line tall (the current text size).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn add_paragraph(self) -> Self {
        let height = self.style.text_size.max(0.0) as u32;
        self.add_blank_space(height)
    }

    /// Append a separator rule spanning the content width.
    #[must_use]
    pub fn add_rule(self) -> Self {
        let length = self.width.saturating_sub(self.style.margins.horizontal());
        self.add_rule_with_length(length)
    }

    /// Append a separator rule of an explicit length.
    #[must_use]
    pub fn add_rule_with_length(self, length: u32) -> Self {
        let item = RuleItem {
            length,
            color: self.style.color,
            align: self.style.align,
        };
        self.push(ReceiptItem::Rule(item))
    }

    fn push(mut self, item: ReceiptItem) -> Self {
        tracing::trace!("append {} as item {}", item.kind_name(), self.items.len());
        self.items.push(item);
        self
    }

    // ======================================================================
    // Accessors
    // ======================================================================

    /// The fixed canvas width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// The current style scratch.
    #[must_use]
    pub const fn style(&self) -> &Style {
        &self.style
    }

    /// The item sequence, in paint order.
    #[must_use]
    pub fn items(&self) -> &[ReceiptItem] {
        &self.items
    }

    /// Number of appended items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether any items have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether text items resolve margins at render time.
    #[must_use]
    pub const fn live_margins(&self) -> bool {
        self.live_margins
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ReceiptResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> ReceiptResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_preserve_order() {
        let receipt = Receipt::new(384)
            .add_text("first")
            .add_blank_space(8)
            .add_rule();

        assert_eq!(receipt.item_count(), 3);
        assert_eq!(receipt.items()[0].kind_name(), "text");
        assert_eq!(receipt.items()[1].kind_name(), "blank_space");
        assert_eq!(receipt.items()[2].kind_name(), "rule");
    }

    #[test]
    fn test_append_snapshots_style() {
        let receipt = Receipt::new(384)
            .with_text_size(20.0)
            .with_color(Color::rgb(200, 0, 0))
            .add_text("red")
            .with_color(Color::BLACK)
            .with_text_size(12.0)
            .add_text("black");

        let ReceiptItem::Text(first) = &receipt.items()[0] else {
            panic!("expected text item");
        };
        let ReceiptItem::Text(second) = &receipt.items()[1] else {
            panic!("expected text item");
        };

        // Later style mutations never reach the earlier snapshot.
        assert_eq!(first.color, Color::rgb(200, 0, 0));
        assert_eq!(first.size, 20.0);
        assert_eq!(second.color, Color::BLACK);
        assert_eq!(second.size, 12.0);
    }

    #[test]
    fn test_content_width_captured_at_append() {
        let receipt = Receipt::new(384)
            .with_margin_left(10)
            .with_margin_right(14)
            .add_text("narrow")
            .with_margin(0)
            .add_text("wide");

        let ReceiptItem::Text(narrow) = &receipt.items()[0] else {
            panic!("expected text item");
        };
        let ReceiptItem::Text(wide) = &receipt.items()[1] else {
            panic!("expected text item");
        };
        assert_eq!(narrow.content_width, 360);
        assert_eq!(wide.content_width, 384);
    }

    #[test]
    fn test_inline_text_flag() {
        let receipt = Receipt::new(200)
            .add_inline_text("left half")
            .add_text("right half");

        let ReceiptItem::Text(inline) = &receipt.items()[0] else {
            panic!("expected text item");
        };
        let ReceiptItem::Text(line) = &receipt.items()[1] else {
            panic!("expected text item");
        };
        assert!(!inline.new_line);
        assert!(line.new_line);
    }

    #[test]
    fn test_paragraph_uses_current_text_size() {
        let receipt = Receipt::new(200).with_text_size(18.5).add_paragraph();
        let ReceiptItem::BlankSpace(space) = &receipt.items()[0] else {
            panic!("expected blank space");
        };
        assert_eq!(space.height, 18);
    }

    #[test]
    fn test_rule_defaults_to_content_width() {
        let receipt = Receipt::new(300).with_margins(0, 25).add_rule();
        let ReceiptItem::Rule(rule) = &receipt.items()[0] else {
            panic!("expected rule");
        };
        assert_eq!(rule.length, 250);
    }

    #[test]
    fn test_json_round_trip() {
        let receipt = Receipt::new(384)
            .with_text_size(24.0)
            .with_align(Align::Center)
            .add_text("TOTAL")
            .with_margin(10)
            .add_rule()
            .with_live_margins(false);

        let json = receipt.to_json().expect("serialize");
        let back = Receipt::from_json(&json).expect("deserialize");
        assert_eq!(back, receipt);
        assert!(!back.live_margins());
    }

    #[test]
    fn test_defaults() {
        let receipt = Receipt::new(100);
        assert!(receipt.is_empty());
        assert!(receipt.live_margins());
        assert_eq!(receipt.width(), 100);
        assert_eq!(receipt.style().align, Align::Left);
    }
}
