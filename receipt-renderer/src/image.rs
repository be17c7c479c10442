//! Bitmap loading utilities.
//!
//! Receipt images (logos, QR codes) arrive as encoded files or as
//! base64 data URIs embedded in JSON documents; both decode into the
//! document model's RGBA [`Bitmap`].

use receipt_core::Bitmap;

use crate::error::{RenderError, RenderResult};

/// Decode an encoded image (PNG, JPEG, ...) into a bitmap.
///
/// # Errors
///
/// Returns an error if the bytes cannot be decoded.
pub fn bitmap_from_bytes(data: &[u8]) -> RenderResult<Bitmap> {
    let img = image::load_from_memory(data)
        .map_err(|e| RenderError::Image(format!("failed to decode image: {e}")))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Bitmap::from_raw(width, height, rgba.into_raw())
        .map_err(|e| RenderError::Image(e.to_string()))
}

/// Decode an image from a base64 data URI.
///
/// Supports the form `data:image/png;base64,iVBORw0KGgo...`.
///
/// # Errors
///
/// Returns an error if the URI is malformed or the payload cannot be
/// decoded.
pub fn bitmap_from_data_uri(uri: &str) -> RenderResult<Bitmap> {
    let Some(uri_data) = uri.strip_prefix("data:") else {
        return Err(RenderError::Image("not a data URI".to_string()));
    };

    let comma = uri_data
        .find(',')
        .ok_or_else(|| RenderError::Image("invalid data URI: missing comma".to_string()))?;
    let metadata = &uri_data[..comma];
    let encoded = &uri_data[comma + 1..];

    if !metadata.contains(";base64") {
        return Err(RenderError::Image(
            "data URI payload must be base64".to_string(),
        ));
    }

    use base64::Engine;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| RenderError::Image(format!("failed to decode base64: {e}")))?;

    bitmap_from_bytes(&bytes)
}

/// Scale a bitmap down to fit a paper width, preserving aspect ratio.
///
/// Returns `None` if the bitmap already fits.
#[must_use]
pub fn resize_to_width(bitmap: &Bitmap, max_width: u32) -> Option<Bitmap> {
    if bitmap.width() <= max_width || max_width == 0 {
        return None;
    }

    let scale = f64::from(max_width) / f64::from(bitmap.width());
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let new_height = (f64::from(bitmap.height()) * scale).round().max(1.0) as u32;

    let img = image::RgbaImage::from_raw(bitmap.width(), bitmap.height(), bitmap.data().to_vec())?;
    let resized = image::imageops::resize(
        &img,
        max_width,
        new_height,
        image::imageops::FilterType::Lanczos3,
    );

    Bitmap::from_raw(max_width, new_height, resized.into_raw()).ok()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use receipt_core::Color;

    use super::*;

    /// Encode a solid 4x2 PNG in memory.
    fn sample_png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([12, 34, 56, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn test_decode_png_bytes() {
        let bitmap = bitmap_from_bytes(&sample_png()).expect("decode");
        assert_eq!(bitmap.width(), 4);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.pixel(3, 1), Some(Color::rgb(12, 34, 56)));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            bitmap_from_bytes(&[1, 2, 3]),
            Err(RenderError::Image(_))
        ));
    }

    #[test]
    fn test_data_uri_round_trip() {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD.encode(sample_png());
        let uri = format!("data:image/png;base64,{encoded}");
        let bitmap = bitmap_from_data_uri(&uri).expect("decode");
        assert_eq!(bitmap.width(), 4);
    }

    #[test]
    fn test_data_uri_requires_scheme_and_base64() {
        assert!(bitmap_from_data_uri("http://x/y.png").is_err());
        assert!(bitmap_from_data_uri("data:image/png,plain").is_err());
        assert!(bitmap_from_data_uri("data:image/png;base64").is_err());
    }

    #[test]
    fn test_resize_to_width() {
        let bitmap = Bitmap::new(100, 40, Color::BLACK);
        let resized = resize_to_width(&bitmap, 50).expect("resized");
        assert_eq!(resized.width(), 50);
        assert_eq!(resized.height(), 20);
        // Already narrow enough: no work.
        assert!(resize_to_width(&bitmap, 100).is_none());
    }
}
