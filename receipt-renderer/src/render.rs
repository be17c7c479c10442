//! The two-pass layout engine: measure, then paint.

use receipt_core::Receipt;

use crate::draw::{Band, Drawable, RenderContext};
use crate::error::RenderResult;
use crate::font::FontStore;
use crate::pixmap::Pixmap;

/// Fixed padding added to every canvas above all margins and items.
pub const CANVAS_PADDING: u32 = 5;

/// Rasterizes receipt documents into pixel buffers.
///
/// The rasterizer owns the font store; register faces through
/// [`Rasterizer::fonts_mut`] before building documents that reference
/// them. Rendering never mutates the document, so the same receipt can be
/// rendered repeatedly with identical output.
#[derive(Debug, Default)]
pub struct Rasterizer {
    fonts: FontStore,
}

impl Rasterizer {
    /// Create a rasterizer with an empty font store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rasterizer around an existing font store.
    #[must_use]
    pub fn with_fonts(fonts: FontStore) -> Self {
        Self { fonts }
    }

    /// The font store.
    #[must_use]
    pub fn fonts(&self) -> &FontStore {
        &self.fonts
    }

    /// Mutable access to the font store, for registering faces.
    pub fn fonts_mut(&mut self) -> &mut FontStore {
        &mut self.fonts
    }

    /// Render a receipt into an RGBA surface.
    ///
    /// Pass one measures every item under its captured style and sums the
    /// total canvas height; pass two paints items top to bottom at an
    /// accumulating cursor. Items paint into a content surface that spans
    /// the canvas minus horizontal margins, which is then composited onto
    /// the full-width canvas.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::Config`] for geometry or style values
    /// that cannot produce a canvas, and
    /// [`crate::RenderError::FontNotFound`] for unregistered font handles.
    #[allow(clippy::cast_possible_wrap)]
    pub fn render(&self, receipt: &Receipt) -> RenderResult<Pixmap> {
        let ctx = RenderContext::new(&self.fonts, receipt)?;

        // Pass one: measure.
        let heights: Vec<u32> = receipt
            .items()
            .iter()
            .map(|item| item.band_height(&ctx))
            .collect();
        let content_height: u32 = heights.iter().sum();
        let margins = receipt.style().margins;
        let total_height = CANVAS_PADDING + margins.vertical() + content_height;

        let background = receipt.style().background;
        let canvas_width = receipt.width();
        let content_width = canvas_width - margins.horizontal();

        tracing::debug!(
            "render {} items onto {canvas_width}x{total_height}",
            receipt.item_count()
        );

        // Pass two: paint into the content surface, then composite.
        let mut canvas = Pixmap::new(canvas_width, total_height, background);
        let mut content = Pixmap::with_origin(
            content_width,
            total_height,
            background,
            margins.left as i32,
        );

        let mut cursor = margins.top;
        for (index, (item, &height)) in receipt.items().iter().zip(&heights).enumerate() {
            // A zero-height run paints into the band of the next measured
            // item so stacked runs share a baseline.
            let band_height = if height == 0 {
                heights[index + 1..]
                    .iter()
                    .copied()
                    .find(|&h| h > 0)
                    .unwrap_or(0)
            } else {
                height
            };
            tracing::trace!(
                "paint {} at y={cursor} band={band_height}",
                item.kind_name()
            );
            item.paint(
                &mut content,
                &ctx,
                Band {
                    y: cursor,
                    height: band_height,
                },
            )?;
            cursor += height;
        }

        canvas.composite(&content, margins.left, 0);
        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use receipt_core::{Align, Bitmap, Color, Receipt};

    use super::*;

    #[test]
    fn test_empty_receipt_is_padding_only() {
        let rasterizer = Rasterizer::new();
        let canvas = rasterizer.render(&Receipt::new(200)).expect("render");
        assert_eq!(canvas.width(), 200);
        assert_eq!(canvas.height(), CANVAS_PADDING);
    }

    #[test]
    fn test_total_height_sums_items_and_margins() {
        let receipt = Receipt::new(384)
            .with_margins(10, 0)
            .with_text_size(24.0)
            .add_text("a")
            .add_blank_space(7)
            .add_rule();
        let rasterizer = Rasterizer::new();
        let canvas = rasterizer.render(&receipt).expect("render");
        // 5 + top 10 + bottom 10 + text (24+16) + blank 7 + rule 10
        assert_eq!(canvas.height(), 5 + 20 + 40 + 7 + 10);
    }

    #[test]
    fn test_render_is_idempotent() {
        let receipt = Receipt::new(128).with_text_size(16.0).add_text("same");
        let rasterizer = Rasterizer::new();
        let first = rasterizer.render(&receipt).expect("render");
        let second = rasterizer.render(&receipt).expect("render");
        assert_eq!(first.image().as_raw(), second.image().as_raw());
    }

    #[test]
    fn test_background_fills_canvas() {
        let receipt = Receipt::new(50)
            .with_background(Color::rgb(250, 240, 230))
            .add_blank_space(10);
        let canvas = Rasterizer::new().render(&receipt).expect("render");
        assert_eq!(canvas.pixel(0, 0), Some(Color::rgb(250, 240, 230)));
        assert_eq!(canvas.pixel(49, 14), Some(Color::rgb(250, 240, 230)));
    }

    #[test]
    fn test_image_band_advances_cursor() {
        let receipt = Receipt::new(64)
            .add_image(Bitmap::new(10, 22, Color::BLACK))
            .add_blank_space(3);
        let canvas = Rasterizer::new().render(&receipt).expect("render");
        assert_eq!(canvas.height(), 5 + 22 + 3);
        // Left-aligned image with no margin starts at canvas x = 0, y = 0.
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.pixel(9, 21), Some(Color::BLACK));
        assert_eq!(canvas.pixel(10, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_center_aligned_rule_centers_on_canvas() {
        let receipt = Receipt::new(100)
            .with_align(Align::Center)
            .add_rule_with_length(40);
        let canvas = Rasterizer::new().render(&receipt).expect("render");
        // Band is 10 tall; the 2px line is centered at y = 4..6.
        assert_eq!(canvas.pixel(30, 4), Some(Color::BLACK));
        assert_eq!(canvas.pixel(69, 5), Some(Color::BLACK));
        assert_eq!(canvas.pixel(29, 4), Some(Color::WHITE));
        assert_eq!(canvas.pixel(70, 4), Some(Color::WHITE));
    }
}
