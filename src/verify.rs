//! Scannability verification using rqrr
//!
//! Styled dots and logo overlays can push a symbol past what scanners
//! recover; this module re-decodes rendered output so callers can verify
//! a round trip before shipping an image.

use crate::error::{Error, Result};
use image::{DynamicImage, GrayImage, RgbaImage};

/// Decode the payload text from a rendered QR image
pub fn decode(img: &RgbaImage) -> Result<String> {
    let gray = DynamicImage::ImageRgba8(img.clone()).to_luma8();
    decode_gray(&gray)
}

/// Decode the payload text from a grayscale image
pub fn decode_gray(img: &GrayImage) -> Result<String> {
    let mut prepared = rqrr::PreparedImage::prepare(img.clone());

    let grids = prepared.detect_grids();
    if grids.is_empty() {
        return Err(Error::NoQrCodeFound);
    }

    // Take the first detected QR code
    match grids[0].decode() {
        Ok((meta, content)) => {
            tracing::debug!(
                version = ?meta.version,
                ecc_level = meta.ecc_level,
                length = content.len(),
                "Decoded QR for verification"
            );
            Ok(content)
        }
        Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
    }
}

/// Check that a rendered image decodes back to the expected payload
pub fn round_trip(img: &RgbaImage, expected: &str) -> Result<()> {
    let decoded = decode(img)?;
    if decoded == expected {
        Ok(())
    } else {
        tracing::warn!(
            expected_len = expected.len(),
            decoded_len = decoded.len(),
            "Round-trip payload mismatch"
        );
        Err(Error::VerifyMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{QrRenderer, RenderOptions};
    use image::Rgba;

    #[test]
    fn test_blank_image_has_no_qr() {
        let img = RgbaImage::from_pixel(200, 200, Rgba([255, 255, 255, 255]));
        assert!(matches!(decode(&img), Err(Error::NoQrCodeFound)));
    }

    #[test]
    fn test_round_trip_plain_render() {
        let renderer = QrRenderer::new();
        let options = RenderOptions::default();
        let img = renderer.render("verify me", &options).unwrap();
        round_trip(&img, "verify me").unwrap();
    }

    #[test]
    fn test_round_trip_mismatch() {
        let renderer = QrRenderer::new();
        let img = renderer.render("one", &RenderOptions::default()).unwrap();
        assert!(matches!(
            round_trip(&img, "two"),
            Err(Error::VerifyMismatch)
        ));
    }
}
