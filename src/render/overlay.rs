//! Centered logo overlay for rendered QR images

use crate::error::Result;
use image::imageops::FilterType;
use image::{DynamicImage, Pixel, Rgba, RgbaImage, imageops};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Shape of the backing patch cleared behind the logo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoShape {
    /// Circular patch
    #[default]
    Circle,
    /// Square patch
    Square,
    /// No patch; the logo is blended straight onto the modules
    None,
}

impl FromStr for LogoShape {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "circle" => Ok(Self::Circle),
            "square" => Ok(Self::Square),
            "none" => Ok(Self::None),
            other => Err(format!(
                "Unknown logo shape '{other}'. Use circle, square, or none"
            )),
        }
    }
}

impl fmt::Display for LogoShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle => write!(f, "circle"),
            Self::Square => write!(f, "square"),
            Self::None => write!(f, "none"),
        }
    }
}

/// A decoded logo image plus its overlay parameters
#[derive(Debug, Clone)]
pub struct LogoOptions {
    /// Decoded logo image
    pub image: DynamicImage,
    /// Padding in pixels between the logo and the edge of the patch
    pub margin: u32,
    /// Logo width as a fraction of the output width, clamped to 0.4
    pub scale: f32,
    /// Shape of the cleared patch behind the logo
    pub shape: LogoShape,
    /// Clear the modules under the patch before blending the logo
    pub mask_dots: bool,
}

impl LogoOptions {
    /// Default relative logo size (fraction of output width)
    pub const DEFAULT_SCALE: f32 = 0.2;
    /// Largest relative size that leaves the symbol decodable at EcLevel::H
    pub const MAX_SCALE: f32 = 0.4;
    /// Default patch padding in pixels
    pub const DEFAULT_MARGIN: u32 = 5;

    /// Wrap a decoded image with default overlay parameters
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            margin: Self::DEFAULT_MARGIN,
            scale: Self::DEFAULT_SCALE,
            shape: LogoShape::default(),
            mask_dots: true,
        }
    }

    /// Load and decode a logo from a file
    ///
    /// This is the only asynchronous step in the pipeline; a later load
    /// simply replaces the previous logo when it resolves.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        tracing::debug!(
            path = %path.as_ref().display(),
            bytes = bytes.len(),
            "Loaded logo file"
        );
        let image = image::load_from_memory(&bytes)?;
        Ok(Self::new(image))
    }

    /// Set the relative size, clamping to the decodable range
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale.clamp(0.05, Self::MAX_SCALE);
        self
    }

    /// Set the patch padding in pixels
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the patch shape
    pub fn with_shape(mut self, shape: LogoShape) -> Self {
        self.shape = shape;
        self
    }

    /// Keep the modules under the patch instead of clearing them
    pub fn keep_dots(mut self) -> Self {
        self.mask_dots = false;
        self
    }
}

/// Composite the logo onto the center of a rendered QR image
///
/// The patch is cleared to `background` per the configured shape, then the
/// logo is alpha-blended on top.
pub(crate) fn apply(canvas: &mut RgbaImage, logo: &LogoOptions, background: Rgba<u8>) {
    let width = canvas.width();
    let target = ((width as f32) * logo.scale.clamp(0.05, LogoOptions::MAX_SCALE)) as u32;
    if target == 0 {
        return;
    }

    let scaled = scale_to_fit(&logo.image, target);
    let patch = target + 2 * logo.margin;
    let center = width / 2;

    if logo.mask_dots && logo.shape != LogoShape::None {
        clear_patch(canvas, center, patch, logo.shape, background);
    }

    let left = center.saturating_sub(scaled.width() / 2);
    let top = center.saturating_sub(scaled.height() / 2);
    blend_onto(canvas, &scaled, left, top);
}

/// Resize preserving aspect ratio so the longer side equals `target`
fn scale_to_fit(logo: &DynamicImage, target: u32) -> RgbaImage {
    let (w, h) = (logo.width().max(1), logo.height().max(1));
    let (out_w, out_h) = if w >= h {
        (target, (target as u64 * h as u64 / w as u64).max(1) as u32)
    } else {
        ((target as u64 * w as u64 / h as u64).max(1) as u32, target)
    };
    imageops::resize(&logo.to_rgba8(), out_w, out_h, FilterType::Lanczos3)
}

fn clear_patch(canvas: &mut RgbaImage, center: u32, patch: u32, shape: LogoShape, fill: Rgba<u8>) {
    let width = canvas.width();
    let half = (patch / 2).min(center);
    let (x0, y0) = (center - half, center - half);
    let (x1, y1) = ((center + half).min(width), (center + half).min(width));

    let radius = half as f32;
    let c = center as f32;

    for y in y0..y1 {
        for x in x0..x1 {
            let covered = match shape {
                LogoShape::Square => true,
                LogoShape::Circle => {
                    let (dx, dy) = (x as f32 + 0.5 - c, y as f32 + 0.5 - c);
                    dx * dx + dy * dy <= radius * radius
                }
                LogoShape::None => false,
            };
            if covered {
                canvas.put_pixel(x, y, fill);
            }
        }
    }
}

fn blend_onto(canvas: &mut RgbaImage, logo: &RgbaImage, left: u32, top: u32) {
    for (x, y, pixel) in logo.enumerate_pixels() {
        let (cx, cy) = (left + x, top + y);
        if cx < canvas.width() && cy < canvas.height() {
            canvas.get_pixel_mut(cx, cy).blend(pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_logo(w: u32, h: u32, color: Rgba<u8>) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, color))
    }

    #[test]
    fn test_scale_is_clamped() {
        let logo = LogoOptions::new(solid_logo(10, 10, Rgba([255, 0, 0, 255]))).with_scale(0.9);
        assert_eq!(logo.scale, LogoOptions::MAX_SCALE);
    }

    #[test]
    fn test_apply_clears_square_patch() {
        let black = Rgba([0, 0, 0, 255]);
        let white = Rgba([255, 255, 255, 255]);
        let red = Rgba([255, 0, 0, 255]);

        let mut canvas = RgbaImage::from_pixel(200, 200, black);
        let logo = LogoOptions::new(solid_logo(20, 20, red))
            .with_scale(0.1)
            .with_margin(10)
            .with_shape(LogoShape::Square);
        apply(&mut canvas, &logo, white);

        // Center holds the logo, the margin ring holds the background fill
        assert_eq!(*canvas.get_pixel(100, 100), red);
        assert_eq!(*canvas.get_pixel(100, 100 - 14), white);
        // Far corner untouched
        assert_eq!(*canvas.get_pixel(2, 2), black);
    }

    #[test]
    fn test_shape_none_keeps_dots() {
        let black = Rgba([0, 0, 0, 255]);
        let mut canvas = RgbaImage::from_pixel(200, 200, black);
        let logo = LogoOptions::new(solid_logo(20, 20, Rgba([255, 0, 0, 255])))
            .with_scale(0.1)
            .with_shape(LogoShape::None);
        apply(&mut canvas, &logo, Rgba([255, 255, 255, 255]));

        // Logo drawn, but the surrounding margin was not cleared
        assert_eq!(*canvas.get_pixel(100, 100), Rgba([255, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(100, 100 - 14), black);
    }

    #[test]
    fn test_transparent_logo_blends() {
        let black = Rgba([0, 0, 0, 255]);
        let mut canvas = RgbaImage::from_pixel(200, 200, black);
        let logo = LogoOptions::new(solid_logo(20, 20, Rgba([255, 0, 0, 0])))
            .with_scale(0.1)
            .keep_dots()
            .with_shape(LogoShape::None);
        apply(&mut canvas, &logo, Rgba([255, 255, 255, 255]));

        // Fully transparent pixels leave the modules untouched
        assert_eq!(*canvas.get_pixel(100, 100), black);
    }

    #[tokio::test]
    async fn test_load_missing_file_errors() {
        let result = LogoOptions::load("/nonexistent/logo.png").await;
        assert!(result.is_err());
    }
}
