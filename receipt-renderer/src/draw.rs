//! The measure/paint contract over receipt items.
//!
//! Every item answers two questions: how much vertical space it reserves
//! ([`Drawable::band_height`]) and how it paints into its band
//! ([`Drawable::paint`]). The engine measures the whole sequence first,
//! then paints top to bottom, so `band_height` must be pure and stable
//! across both passes.
//!
//! Items compute horizontal positions in canvas coordinates; the content
//! surface they paint into carries the left-margin translation and clips
//! anything outside the content region.

use receipt_core::{
    Align, BlankSpaceItem, Color, ImageItem, Margins, Receipt, ReceiptItem, RuleItem, TextItem,
};

use crate::error::{RenderError, RenderResult};
use crate::font::FontStore;
use crate::pixmap::Pixmap;

/// Extra vertical padding added to every measured text band.
pub const TEXT_BAND_PADDING: u32 = 16;

/// Thickness of a separator rule line.
pub const RULE_THICKNESS: u32 = 2;

/// Vertical padding around a separator rule line.
pub const RULE_BAND_PADDING: u32 = 8;

/// The vertical band an item paints into.
///
/// For height-bearing items this is exactly `[y, y + band_height)`. For a
/// zero-height text run the engine passes the band of the next measured
/// item, so stacked runs center on a shared baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Top of the band in canvas coordinates.
    pub y: u32,
    /// Band height in pixels.
    pub height: u32,
}

/// Shared state for a single render: the font store and the receipt-wide
/// layout facts items need while measuring and painting.
///
/// Construction validates the configuration the builder deliberately never
/// checked: canvas geometry, text sizes and font handles.
#[derive(Debug)]
pub struct RenderContext<'a> {
    fonts: &'a FontStore,
    canvas_width: u32,
    margins: Margins,
    live_margins: bool,
}

impl<'a> RenderContext<'a> {
    /// Validate a receipt against a font store and capture the layout
    /// facts for this render.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Config`] for a zero-width canvas, margins
    /// that consume the whole width, or a negative/NaN text size, and
    /// [`RenderError::FontNotFound`] for a font handle the store never
    /// issued.
    pub fn new(fonts: &'a FontStore, receipt: &Receipt) -> RenderResult<Self> {
        let width = receipt.width();
        if width == 0 {
            return Err(RenderError::Config(
                "canvas width must be positive".to_string(),
            ));
        }
        let margins = receipt.style().margins;
        if margins.horizontal() >= width {
            return Err(RenderError::Config(format!(
                "horizontal margins ({}) leave no content width on a {width}px canvas",
                margins.horizontal()
            )));
        }
        for item in receipt.items() {
            if let ReceiptItem::Text(text) = item {
                if text.size.is_nan() || text.size < 0.0 {
                    return Err(RenderError::Config(format!(
                        "text size {} is not renderable",
                        text.size
                    )));
                }
                if let Some(id) = text.font {
                    if !fonts.contains(id) {
                        return Err(RenderError::FontNotFound(id.to_string()));
                    }
                }
            }
        }
        Ok(Self {
            fonts,
            canvas_width: width,
            margins,
            live_margins: receipt.live_margins(),
        })
    }

    /// The font store for this render.
    #[must_use]
    pub const fn fonts(&self) -> &'a FontStore {
        self.fonts
    }

    /// The fixed canvas width.
    #[must_use]
    pub const fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    /// The receipt's margins as of render time.
    #[must_use]
    pub const fn margins(&self) -> Margins {
        self.margins
    }

    /// The margins a text item positions against: the receipt's current
    /// margins when live margins are on, the item's captured margins
    /// otherwise.
    #[must_use]
    pub const fn text_margins(&self, item: &TextItem) -> Margins {
        if self.live_margins {
            self.margins
        } else {
            item.margins
        }
    }
}

/// The measure/paint capability every item variant implements.
pub trait Drawable {
    /// Vertical space this item reserves, in pixels.
    ///
    /// Pure: the engine calls it during height accumulation and again
    /// while advancing the paint cursor, and both calls must agree.
    fn band_height(&self, ctx: &RenderContext<'_>) -> u32;

    /// Paint into the given band.
    ///
    /// Must not draw outside `[band.y, band.y + band.height)` vertically;
    /// horizontal overflow is clipped by the surface.
    ///
    /// # Errors
    ///
    /// Returns an error if painting fails.
    fn paint(&self, surface: &mut Pixmap, ctx: &RenderContext<'_>, band: Band) -> RenderResult<()>;
}

impl Drawable for TextItem {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn band_height(&self, ctx: &RenderContext<'_>) -> u32 {
        if !self.new_line {
            return 0;
        }
        let metrics = ctx.fonts().metrics(self.font, self.size);
        metrics.line_height().ceil() as u32 + TEXT_BAND_PADDING
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    fn paint(&self, surface: &mut Pixmap, ctx: &RenderContext<'_>, band: Band) -> RenderResult<()> {
        let margins = ctx.text_margins(self);

        // The band behind the text spans the whole canvas, not just the
        // item's content width, so adjacent bands read as one stripe.
        if self.background != Color::WHITE {
            surface.fill_rect(
                0,
                band.y as i32,
                ctx.canvas_width(),
                band.height,
                self.background,
            );
        }

        // On a pure black band the configured color is unreadable; force
        // white. Any other background keeps the configured color.
        let color = if self.background == Color::BLACK {
            Color::WHITE
        } else {
            self.color
        };

        let metrics = ctx.fonts().metrics(self.font, self.size);
        let center_y = band.y as f32 + band.height as f32 / 2.0;
        let baseline = center_y + (metrics.ascent - metrics.descent) / 2.0;

        let x = match self.align {
            Align::Left => margins.left as f32,
            Align::Center => ctx.canvas_width() as f32 / 2.0,
            Align::Right => ctx.canvas_width().saturating_sub(margins.right) as f32,
        };

        ctx.fonts().draw_text(
            surface,
            &self.content,
            x,
            baseline,
            self.size,
            color,
            self.font,
            self.align,
        );
        Ok(())
    }
}

impl Drawable for ImageItem {
    fn band_height(&self, _ctx: &RenderContext<'_>) -> u32 {
        self.bitmap.height()
    }

    #[allow(clippy::cast_possible_wrap)]
    fn paint(&self, surface: &mut Pixmap, ctx: &RenderContext<'_>, band: Band) -> RenderResult<()> {
        let width = self.bitmap.width() as i32;
        let canvas = ctx.canvas_width() as i32;
        let margins = ctx.margins();
        let x = match self.align {
            Align::Left => margins.left as i32,
            Align::Center => (canvas - width) / 2,
            Align::Right => canvas - margins.right as i32 - width,
        };
        surface.blit(&self.bitmap, x, band.y as i32);
        Ok(())
    }
}

impl Drawable for BlankSpaceItem {
    fn band_height(&self, _ctx: &RenderContext<'_>) -> u32 {
        self.height
    }

    fn paint(
        &self,
        _surface: &mut Pixmap,
        _ctx: &RenderContext<'_>,
        _band: Band,
    ) -> RenderResult<()> {
        // Reserves space only.
        Ok(())
    }
}

impl Drawable for RuleItem {
    fn band_height(&self, _ctx: &RenderContext<'_>) -> u32 {
        RULE_THICKNESS + RULE_BAND_PADDING
    }

    #[allow(clippy::cast_possible_wrap)]
    fn paint(&self, surface: &mut Pixmap, ctx: &RenderContext<'_>, band: Band) -> RenderResult<()> {
        let length = self.length as i32;
        let canvas = ctx.canvas_width() as i32;
        let margins = ctx.margins();
        let x = match self.align {
            Align::Left => margins.left as i32,
            Align::Center => (canvas - length) / 2,
            Align::Right => canvas - margins.right as i32 - length,
        };
        let y = band.y + band.height.saturating_sub(RULE_THICKNESS) / 2;
        surface.draw_hline(x, y as i32, self.length, RULE_THICKNESS, self.color);
        Ok(())
    }
}

impl Drawable for ReceiptItem {
    fn band_height(&self, ctx: &RenderContext<'_>) -> u32 {
        match self {
            Self::Text(item) => item.band_height(ctx),
            Self::Image(item) => item.band_height(ctx),
            Self::BlankSpace(item) => item.band_height(ctx),
            Self::Rule(item) => item.band_height(ctx),
        }
    }

    fn paint(&self, surface: &mut Pixmap, ctx: &RenderContext<'_>, band: Band) -> RenderResult<()> {
        match self {
            Self::Text(item) => item.paint(surface, ctx, band),
            Self::Image(item) => item.paint(surface, ctx, band),
            Self::BlankSpace(item) => item.paint(surface, ctx, band),
            Self::Rule(item) => item.paint(surface, ctx, band),
        }
    }
}
