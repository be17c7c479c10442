//! Canvas export to image formats and thermal printer rasters.
//!
//! A rendered [`Pixmap`] leaves this crate one of two ways: as an encoded
//! PNG/JPEG for previews and archival, or as packed 1-bit raster rows
//! ready for a thermal print head (one bit per dot, MSB first, 1 = black).

use std::io::Cursor;

use image::ImageEncoder;
use receipt_core::Color;

use crate::error::{RenderError, RenderResult};
use crate::pixmap::Pixmap;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// JPEG image (alpha flattened against the configured background).
    Jpeg,
}

/// Configuration for canvas export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// JPEG quality 1-100 (default: 85).
    pub jpeg_quality: u8,
    /// Background for flattening alpha in formats without it.
    pub background: Color,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 85,
            background: Color::WHITE,
        }
    }
}

/// Encodes rendered canvases into transportable formats.
pub struct PixmapExporter {
    config: ExportConfig,
}

impl PixmapExporter {
    /// Create an exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Encode a canvas to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn export(&self, canvas: &Pixmap, format: ExportFormat) -> RenderResult<Vec<u8>> {
        match format {
            ExportFormat::Png => self.encode_png(canvas),
            ExportFormat::Jpeg => self.encode_jpeg(canvas),
        }
    }

    /// Encode a canvas to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    #[allow(clippy::unused_self)]
    pub fn encode_png(&self, canvas: &Pixmap) -> RenderResult<Vec<u8>> {
        let mut bytes = Vec::new();
        canvas
            .image()
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))?;
        Ok(bytes)
    }

    /// Encode a canvas to JPEG bytes, flattening alpha against the
    /// configured background.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn encode_jpeg(&self, canvas: &Pixmap) -> RenderResult<Vec<u8>> {
        let (width, height) = (canvas.width(), canvas.height());
        let bg = &self.config.background;
        let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
        for pixel in canvas.image().as_raw().chunks_exact(4) {
            let alpha = f32::from(pixel[3]) / 255.0;
            let inv = 1.0 - alpha;
            rgb_data.push((f32::from(pixel[0]).mul_add(alpha, f32::from(bg.r) * inv)) as u8);
            rgb_data.push((f32::from(pixel[1]).mul_add(alpha, f32::from(bg.g) * inv)) as u8);
            rgb_data.push((f32::from(pixel[2]).mul_add(alpha, f32::from(bg.b) * inv)) as u8);
        }

        let mut buf = Cursor::new(Vec::new());
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, self.config.jpeg_quality);
        encoder
            .write_image(&rgb_data, width, height, image::ColorType::Rgb8.into())
            .map_err(|e| RenderError::Export(format!("JPEG encoding failed: {e}")))?;

        Ok(buf.into_inner())
    }
}

/// How grayscale maps to the 1-bit dot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherMode {
    /// Hard threshold at mid-gray. Crisp for text and rules.
    Threshold,
    /// Bayer 8x8 ordered dithering. Preserves tone in photographic areas.
    Bayer,
}

/// Packed 1-bit raster rows for a thermal print head.
///
/// Each row is `width_bytes()` bytes; within a byte the most significant
/// bit is the leftmost dot, and a set bit fires (prints black).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThermalRaster {
    /// Width in dots.
    pub width: u32,
    /// Height in rows.
    pub height: u32,
    /// Packed rows, `width_bytes() * height` bytes.
    pub data: Vec<u8>,
}

impl ThermalRaster {
    /// Bytes per packed row.
    #[must_use]
    pub const fn width_bytes(&self) -> usize {
        self.width.div_ceil(8) as usize
    }

    /// Whether the dot at (x, y) fires.
    #[must_use]
    pub fn dot(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = (y as usize) * self.width_bytes() + (x / 8) as usize;
        let bit = 7 - (x % 8);
        (self.data[byte] >> bit) & 1 == 1
    }

    /// Expand the packed rows back into a black-and-white surface, for
    /// previews and tests.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn to_pixmap(&self) -> Pixmap {
        let mut canvas = Pixmap::new(self.width, self.height, Color::WHITE);
        for y in 0..self.height {
            for x in 0..self.width {
                if self.dot(x, y) {
                    canvas.put_pixel(x as i32, y as i32, Color::BLACK);
                }
            }
        }
        canvas
    }
}

/// Bayer 8x8 ordered dithering matrix, values 0..=63.
const BAYER_8X8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Convert a rendered canvas into packed 1-bit thermal raster rows.
///
/// Pixels are flattened against white, converted to luminance, then
/// binarized per the dithering mode.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_thermal_raster(canvas: &Pixmap, mode: DitherMode) -> ThermalRaster {
    let width = canvas.width();
    let height = canvas.height();
    let width_bytes = width.div_ceil(8) as usize;
    let mut data = vec![0u8; width_bytes * height as usize];

    for y in 0..height {
        for x in 0..width {
            let p = canvas.image().get_pixel(x, y);
            let alpha = f32::from(p.0[3]) / 255.0;
            let flatten = |c: u8| f32::from(c).mul_add(alpha, 255.0 * (1.0 - alpha));
            let luminance = 0.114f32.mul_add(
                flatten(p.0[2]),
                0.299f32.mul_add(flatten(p.0[0]), 0.587 * flatten(p.0[1])),
            );

            let cutoff = match mode {
                DitherMode::Threshold => 128.0,
                DitherMode::Bayer => {
                    let cell = BAYER_8X8[(y % 8) as usize][(x % 8) as usize];
                    (f32::from(cell) + 0.5) / 64.0 * 255.0
                }
            };

            if luminance < cutoff {
                let byte = (y as usize) * width_bytes + (x / 8) as usize;
                data[byte] |= 1 << (7 - (x % 8));
            }
        }
    }

    ThermalRaster {
        width,
        height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A half-black, half-white surface.
    fn split_canvas() -> Pixmap {
        let mut canvas = Pixmap::new(16, 4, Color::WHITE);
        canvas.fill_rect(0, 0, 8, 4, Color::BLACK);
        canvas
    }

    #[test]
    fn test_png_export_produces_valid_bytes() {
        let exporter = PixmapExporter::with_defaults();
        let png = exporter
            .export(&split_canvas(), ExportFormat::Png)
            .expect("png export");
        // PNG magic bytes: \x89PNG
        assert!(png.len() > 8);
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_jpeg_export_produces_valid_bytes() {
        let exporter = PixmapExporter::with_defaults();
        let jpeg = exporter
            .export(&split_canvas(), ExportFormat::Jpeg)
            .expect("jpeg export");
        // JPEG magic bytes: FFD8
        assert!(jpeg.len() > 2);
        assert_eq!(jpeg[0], 0xFF);
        assert_eq!(jpeg[1], 0xD8);
    }

    #[test]
    fn test_thermal_packing_is_msb_first() {
        let raster = to_thermal_raster(&split_canvas(), DitherMode::Threshold);
        assert_eq!(raster.width_bytes(), 2);
        // Left 8 dots black, right 8 dots white.
        assert_eq!(raster.data[0], 0xFF);
        assert_eq!(raster.data[1], 0x00);
        assert!(raster.dot(0, 0));
        assert!(!raster.dot(8, 0));
    }

    #[test]
    fn test_thermal_width_rounds_up() {
        let canvas = Pixmap::new(10, 1, Color::BLACK);
        let raster = to_thermal_raster(&canvas, DitherMode::Threshold);
        assert_eq!(raster.width_bytes(), 2);
        // Ten black dots: 0b1111_1111, 0b1100_0000.
        assert_eq!(raster.data[0], 0xFF);
        assert_eq!(raster.data[1], 0xC0);
    }

    #[test]
    fn test_threshold_and_bayer_differ_on_mid_gray() {
        let canvas = Pixmap::new(16, 16, Color::rgb(128, 128, 128));
        let hard = to_thermal_raster(&canvas, DitherMode::Threshold);
        let dithered = to_thermal_raster(&canvas, DitherMode::Bayer);
        assert_ne!(hard, dithered);

        // Bayer on uniform mid-gray fires roughly half the dots.
        let fired = (0..16u32)
            .flat_map(|y| (0..16u32).map(move |x| (x, y)))
            .filter(|&(x, y)| dithered.dot(x, y))
            .count();
        assert!((96..=160).contains(&fired), "fired {fired} of 256");
    }

    #[test]
    fn test_thermal_round_trip_via_pixmap() {
        let raster = to_thermal_raster(&split_canvas(), DitherMode::Threshold);
        let preview = raster.to_pixmap();
        assert_eq!(preview.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(preview.pixel(15, 0), Some(Color::WHITE));
        // Re-rasterizing the preview reproduces the packed rows.
        let again = to_thermal_raster(&preview, DitherMode::Threshold);
        assert_eq!(again, raster);
    }
}
