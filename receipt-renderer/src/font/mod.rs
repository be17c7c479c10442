//! Font store: TTF/OTF faces plus the built-in printer font.
//!
//! The store is the font provider the layout engine collaborates with. It
//! owns every registered face for its lifetime, hands out [`FontId`]
//! handles, and answers the three questions layout needs: vertical metrics
//! at a size, the advance width of a string, and glyph painting.

pub mod builtin;

use std::path::Path;

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use receipt_core::{Align, Color, FontId};

use crate::error::{RenderError, RenderResult};
use crate::pixmap::Pixmap;

/// Vertical font metrics at a given size, in pixels.
///
/// Both values are non-negative: `ascent` extends above the baseline,
/// `descent` below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Pixels above the baseline.
    pub ascent: f32,
    /// Pixels below the baseline.
    pub descent: f32,
}

impl Metrics {
    /// Total line height.
    #[must_use]
    pub fn line_height(self) -> f32 {
        self.ascent + self.descent
    }
}

/// Registry of fonts available to the rasterizer.
///
/// A fresh store knows only the built-in printer font (selected by styles
/// whose font is `None`). Registered faces are never evicted, so a
/// [`FontId`] stays valid as long as the store lives. Handles the store
/// has never issued resolve to the built-in font; the rasterizer rejects
/// them up front with [`RenderError::FontNotFound`].
#[derive(Debug, Default)]
pub struct FontStore {
    fonts: Vec<FontArc>,
}

impl FontStore {
    /// Create a store with only the built-in printer font.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font from raw TTF/OTF bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a parseable font.
    pub fn load_font_bytes(&mut self, bytes: Vec<u8>) -> RenderResult<FontId> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| RenderError::FontLoad(format!("invalid font data: {e}")))?;
        let id = FontId::new(self.fonts.len());
        self.fonts.push(font);
        tracing::debug!("registered font {id}");
        Ok(id)
    }

    /// Register a font from a file on disk.
    ///
    /// Missing or unreadable assets are fatal to this call, mirroring a
    /// printer host that cannot continue without its configured face.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> RenderResult<FontId> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| RenderError::FontLoad(format!("{}: {e}", path.display())))?;
        self.load_font_bytes(bytes)
    }

    /// Whether a handle was issued by this store.
    #[must_use]
    pub fn contains(&self, id: FontId) -> bool {
        id.index() < self.fonts.len()
    }

    /// Number of registered faces (the built-in font not included).
    #[must_use]
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Vertical metrics for a font at a size.
    #[must_use]
    pub fn metrics(&self, font: Option<FontId>, size: f32) -> Metrics {
        if size <= 0.0 {
            return Metrics {
                ascent: 0.0,
                descent: 0.0,
            };
        }
        match self.resolve(font) {
            Some(face) => {
                let scaled = face.as_scaled(PxScale::from(size));
                Metrics {
                    ascent: scaled.ascent().max(0.0),
                    descent: (-scaled.descent()).max(0.0),
                }
            }
            None => builtin_metrics(size),
        }
    }

    /// Advance width of a string at a size, including kerning.
    #[must_use]
    pub fn text_width(&self, font: Option<FontId>, size: f32, text: &str) -> f32 {
        if size <= 0.0 || text.is_empty() {
            return 0.0;
        }
        match self.resolve(font) {
            Some(face) => {
                let scaled = face.as_scaled(PxScale::from(size));
                let mut width = 0.0;
                let mut prev: Option<GlyphId> = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(p) = prev {
                        width += scaled.kern(p, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                width
            }
            None => builtin_text_width(size, text),
        }
    }

    /// Paint a string with the given anchor semantics.
    ///
    /// `x` is interpreted per `anchor`: the left edge for [`Align::Left`],
    /// the center for [`Align::Center`], the right edge for
    /// [`Align::Right`]. `baseline` is the glyph baseline in canvas
    /// coordinates.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &self,
        surface: &mut Pixmap,
        text: &str,
        x: f32,
        baseline: f32,
        size: f32,
        color: Color,
        font: Option<FontId>,
        anchor: Align,
    ) {
        if size <= 0.0 || text.is_empty() {
            return;
        }
        let width = self.text_width(font, size, text);
        let start = match anchor {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        match self.resolve(font) {
            Some(face) => draw_outline_text(surface, face, text, start, baseline, size, color),
            None => draw_builtin_text(surface, text, start, baseline, size, color),
        };
    }

    fn resolve(&self, font: Option<FontId>) -> Option<&FontArc> {
        font.and_then(|id| self.fonts.get(id.index()))
    }
}

#[allow(clippy::cast_precision_loss)]
fn builtin_metrics(size: f32) -> Metrics {
    let unit = size / builtin::EM as f32;
    Metrics {
        ascent: unit * builtin::ROWS as f32,
        descent: unit * (builtin::EM - builtin::ROWS) as f32,
    }
}

#[allow(clippy::cast_precision_loss)]
fn builtin_text_width(size: f32, text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let unit = size / builtin::EM as f32;
    let count = text.chars().count() as f32;
    // Advance per glyph minus the trailing spacing column.
    unit * (count * builtin::ADVANCE as f32 - 1.0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn draw_builtin_text(
    surface: &mut Pixmap,
    text: &str,
    start: f32,
    baseline: f32,
    size: f32,
    color: Color,
) {
    let unit = size / builtin::EM as f32;
    let top = baseline - unit * builtin::ROWS as f32;
    let mut caret = start;
    for ch in text.chars() {
        let columns = builtin::glyph(ch);
        for (c, bits) in columns.iter().enumerate() {
            for r in 0..builtin::ROWS {
                if (bits >> r) & 1 == 1 {
                    let x0 = (caret + c as f32 * unit).round() as i32;
                    let x1 = (caret + (c + 1) as f32 * unit).round() as i32;
                    let y0 = (top + r as f32 * unit).round() as i32;
                    let y1 = (top + (r + 1) as f32 * unit).round() as i32;
                    let w = (x1 - x0).max(1);
                    let h = (y1 - y0).max(1);
                    #[allow(clippy::cast_sign_loss)]
                    surface.fill_rect(x0, y0, w as u32, h as u32, color);
                }
            }
        }
        caret += unit * builtin::ADVANCE as f32;
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn draw_outline_text(
    surface: &mut Pixmap,
    face: &FontArc,
    text: &str,
    start: f32,
    baseline: f32,
    size: f32,
    color: Color,
) {
    let scale = PxScale::from(size);
    let scaled = face.as_scaled(scale);
    let mut caret = start;
    let mut prev: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(p) = prev {
            caret += scaled.kern(p, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        caret += scaled.h_advance(id);
        prev = Some(id);
        if let Some(outlined) = scaled.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                surface.blend_pixel(px, py, color, coverage);
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_metrics_scale_with_size() {
        let store = FontStore::new();
        let m = store.metrics(None, 24.0);
        assert_eq!(m.ascent, 21.0);
        assert_eq!(m.descent, 3.0);
        assert_eq!(m.line_height(), 24.0);
    }

    #[test]
    fn test_zero_size_is_degenerate() {
        let store = FontStore::new();
        let m = store.metrics(None, 0.0);
        assert_eq!(m.line_height(), 0.0);
        assert_eq!(store.text_width(None, 0.0, "abc"), 0.0);
    }

    #[test]
    fn test_builtin_width_is_monospace() {
        let store = FontStore::new();
        let one = store.text_width(None, 16.0, "A");
        let three = store.text_width(None, 16.0, "AAA");
        // Each extra glyph adds a full advance.
        assert!((three - one - 2.0 * 16.0 / 8.0 * 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_handle_resolves_to_builtin() {
        let store = FontStore::new();
        let stray = FontId::new(7);
        assert!(!store.contains(stray));
        let m = store.metrics(Some(stray), 16.0);
        assert_eq!(m, store.metrics(None, 16.0));
    }

    #[test]
    fn test_bad_font_bytes_rejected() {
        let mut store = FontStore::new();
        let err = store.load_font_bytes(vec![0, 1, 2, 3]);
        assert!(matches!(err, Err(RenderError::FontLoad(_))));
        assert_eq!(store.font_count(), 0);
    }

    #[test]
    fn test_missing_font_file_is_fatal() {
        let mut store = FontStore::new();
        let err = store.load_font_file("/nonexistent/receipt-font.ttf");
        assert!(matches!(err, Err(RenderError::FontLoad(_))));
    }

    #[test]
    fn test_draw_builtin_marks_pixels() {
        let store = FontStore::new();
        let mut surface = Pixmap::new(40, 40, Color::WHITE);
        store.draw_text(
            &mut surface,
            "H",
            4.0,
            30.0,
            16.0,
            Color::BLACK,
            None,
            Align::Left,
        );
        let mut black = 0;
        for y in 0..40 {
            for x in 0..40 {
                if surface.pixel(x, y) == Some(Color::BLACK) {
                    black += 1;
                }
            }
        }
        assert!(black > 0, "expected glyph pixels");
    }

    #[test]
    fn test_center_anchor_is_symmetric() {
        let store = FontStore::new();
        let mut surface = Pixmap::new(80, 40, Color::WHITE);
        store.draw_text(
            &mut surface,
            "H",
            40.0,
            30.0,
            16.0,
            Color::BLACK,
            None,
            Align::Center,
        );
        let (mut min_x, mut max_x) = (i32::MAX, i32::MIN);
        for y in 0..40 {
            for x in 0..80 {
                if surface.pixel(x, y) == Some(Color::BLACK) {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                }
            }
        }
        let left_gap = min_x;
        let right_gap = 79 - max_x;
        assert!(
            (left_gap - right_gap).abs() <= 2,
            "glyph not centered: {min_x}..{max_x}"
        );
    }
}
