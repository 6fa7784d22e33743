use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::core::error::{AppError, Result};

/// Render `data` as a PNG-encoded QR code.
///
/// Error correction level M, at least `width` pixels on each side, with the
/// standard quiet zone around the modules. The encoded payload is exactly
/// `data`, nothing derived from it.
pub fn render_png(data: &str, width: u32) -> Result<Vec<u8>> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)
        .map_err(|e| AppError::Internal(format!("QR encoding failed: {}", e)))?;

    let image = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .min_dimensions(width, width)
        .build();

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(image)
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| AppError::Internal(format!("PNG encoding failed: {}", e)))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_produces_decodable_png() {
        let png = render_png("http://localhost:4000/validate/abc", 600).unwrap();

        let decoded = image::load_from_memory(&png).unwrap();
        assert!(decoded.width() >= 600);
        assert!(decoded.height() >= 600);
    }

    #[test]
    fn test_render_distinct_payloads_differ() {
        let a = render_png("http://localhost:4000/validate/a", 600).unwrap();
        let b = render_png("http://localhost:4000/validate/b", 600).unwrap();
        assert_ne!(a, b);
    }
}
