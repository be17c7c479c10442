//! CPU pixel surface and raster primitives.
//!
//! [`Pixmap`] wraps an RGBA image buffer and provides the drawing
//! operations the layout engine orchestrates: rectangle fill, alpha-over
//! blits, coverage blending for glyphs and buffer-to-buffer composites.
//!
//! A pixmap can carry a horizontal origin so that the content surface of a
//! receipt accepts canvas coordinates directly: drawing at canvas x lands
//! at local `x - origin_x`, and the surface clips whatever falls outside.

use image::{Rgba, RgbaImage};
use receipt_core::{Bitmap, Color};

fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// An RGBA pixel surface.
#[derive(Debug, Clone)]
pub struct Pixmap {
    img: RgbaImage,
    origin_x: i32,
}

impl Pixmap {
    /// Create a surface filled with a solid color.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            img: RgbaImage::from_pixel(width, height, to_rgba(fill)),
            origin_x: 0,
        }
    }

    /// Create a filled surface whose local x = 0 sits at canvas
    /// x = `origin_x`.
    #[must_use]
    pub fn with_origin(width: u32, height: u32, fill: Color, origin_x: i32) -> Self {
        Self {
            img: RgbaImage::from_pixel(width, height, to_rgba(fill)),
            origin_x,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.img.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.img.height()
    }

    /// The canvas x coordinate of this surface's left edge.
    #[must_use]
    pub const fn origin_x(&self) -> i32 {
        self.origin_x
    }

    /// Read a pixel at canvas coordinates, or `None` outside the surface.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let lx = x - self.origin_x;
        if lx < 0 || y < 0 || lx as u32 >= self.width() || y as u32 >= self.height() {
            return None;
        }
        let p = self.img.get_pixel(lx as u32, y as u32);
        Some(Color::rgba(p.0[0], p.0[1], p.0[2], p.0[3]))
    }

    /// Write a pixel at canvas coordinates, replacing the destination.
    /// Out-of-bounds writes are clipped.
    #[allow(clippy::cast_sign_loss)]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        let lx = x - self.origin_x;
        if lx < 0 || y < 0 || lx as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        self.img.put_pixel(lx as u32, y as u32, to_rgba(color));
    }

    /// Source-over blend a color at the given coverage (0.0..=1.0) into a
    /// pixel at canvas coordinates. Used for anti-aliased glyph edges.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        let lx = x - self.origin_x;
        if lx < 0 || y < 0 || lx as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        let a = (f32::from(color.a) / 255.0) * coverage.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let dst = self.img.get_pixel_mut(lx as u32, y as u32);
        let inv = 1.0 - a;
        let blend = |src: u8, d: u8| f32::from(src).mul_add(a, f32::from(d) * inv) as u8;
        let da = f32::from(dst.0[3]) / 255.0;
        dst.0 = [
            blend(color.r, dst.0[0]),
            blend(color.g, dst.0[1]),
            blend(color.b, dst.0[2]),
            (a.mul_add(255.0, da * inv * 255.0)) as u8,
        ];
    }

    /// Fill a rectangle at canvas coordinates, clipped to the surface.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let rgba = to_rgba(color);
        let (x0, x1) = self.clip_span(x - self.origin_x, width, self.width());
        let (y0, y1) = self.clip_span(y, height, self.height());
        for py in y0..y1 {
            for px in x0..x1 {
                self.img.put_pixel(px, py, rgba);
            }
        }
    }

    /// Draw a horizontal line with its top-left corner at canvas
    /// coordinates, clipped to the surface.
    pub fn draw_hline(&mut self, x: i32, y: i32, length: u32, thickness: u32, color: Color) {
        self.fill_rect(x, y, length, thickness, color);
    }

    /// Alpha-over blit a bitmap with its top-left corner at canvas
    /// coordinates, clipped to the surface.
    pub fn blit(&mut self, bitmap: &Bitmap, x: i32, y: i32) {
        for by in 0..bitmap.height() {
            for bx in 0..bitmap.width() {
                let Some(src) = bitmap.pixel(bx, by) else {
                    continue;
                };
                #[allow(clippy::cast_possible_wrap)]
                self.blend_pixel(
                    x + bx as i32,
                    y + by as i32,
                    Color::rgb(src.r, src.g, src.b),
                    f32::from(src.a) / 255.0,
                );
            }
        }
    }

    /// Alpha-over composite another surface with its top-left corner at
    /// local (x, y) of this surface. Origins are ignored; this is a raw
    /// buffer-to-buffer operation.
    #[allow(clippy::cast_possible_wrap)]
    pub fn composite(&mut self, other: &Self, x: u32, y: u32) {
        for oy in 0..other.height() {
            for ox in 0..other.width() {
                let p = other.img.get_pixel(ox, oy);
                let dx = self.origin_x + (x + ox) as i32;
                self.blend_pixel(
                    dx,
                    (y + oy) as i32,
                    Color::rgb(p.0[0], p.0[1], p.0[2]),
                    f32::from(p.0[3]) / 255.0,
                );
            }
        }
    }

    /// Copy the surface into an owned [`Bitmap`].
    #[must_use]
    pub fn to_bitmap(&self) -> Bitmap {
        Bitmap::from_raw(self.width(), self.height(), self.img.as_raw().clone())
            .unwrap_or_else(|_| Bitmap::new(0, 0, Color::WHITE))
    }

    /// Borrow the underlying RGBA image.
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    /// Consume the surface and return the underlying RGBA image.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    #[allow(
        clippy::unused_self,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    fn clip_span(&self, start: i32, len: u32, bound: u32) -> (u32, u32) {
        let end = i64::from(start) + i64::from(len);
        let s = start.max(0) as u32;
        let e = end.clamp(0, i64::from(bound)) as u32;
        (s.min(bound), e)
    }
}
