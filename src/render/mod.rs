//! Styled QR code rasterization
//!
//! Symbol encoding and error correction are delegated to the `qrcode`
//! crate; this module only decides how the resulting module matrix is
//! drawn: output size, colors, dot style, and the optional logo overlay.

pub mod color;
mod overlay;
mod style;

pub use overlay::{LogoOptions, LogoShape};
pub use style::DotStyle;

use crate::error::Result;
use image::{Rgba, RgbaImage};
use qrcode::render::unicode;
use qrcode::{Color, EcLevel, QrCode};

/// Smallest supported output width/height in pixels
pub const SIZE_MIN: u32 = 100;
/// Largest supported output width/height in pixels
pub const SIZE_MAX: u32 = 500;

/// Quiet zone width in modules on every side of the symbol
const QUIET_ZONE: u32 = 4;

/// Visual configuration for a rendered QR code
///
/// Independent of the payload; the two meet only in
/// [`QrRenderer::render`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Output width and height in pixels (always equal), 100-500
    pub size: u32,
    /// Module color
    pub foreground: Rgba<u8>,
    /// Canvas and quiet zone color
    pub background: Rgba<u8>,
    /// How modules are drawn
    pub dot_style: DotStyle,
    /// Optional centered logo overlay
    pub logo: Option<LogoOptions>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 300,
            foreground: Rgba([0, 0, 0, 255]),
            background: Rgba([255, 255, 255, 255]),
            dot_style: DotStyle::default(),
            logo: None,
        }
    }
}

impl RenderOptions {
    /// Set the output size, clamped to the 100-500 px range
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size.clamp(SIZE_MIN, SIZE_MAX);
        self
    }

    /// Set the module color
    pub fn with_foreground(mut self, color: Rgba<u8>) -> Self {
        self.foreground = color;
        self
    }

    /// Set the canvas color
    pub fn with_background(mut self, color: Rgba<u8>) -> Self {
        self.background = color;
        self
    }

    /// Set the dot style
    pub fn with_dot_style(mut self, style: DotStyle) -> Self {
        self.dot_style = style;
        self
    }

    /// Attach a logo overlay
    pub fn with_logo(mut self, logo: LogoOptions) -> Self {
        self.logo = Some(logo);
        self
    }
}

/// Styled QR renderer
pub struct QrRenderer {
    /// Error correction level
    ecc_level: EcLevel,
}

impl QrRenderer {
    /// Create a renderer with default settings (Medium ECC)
    pub fn new() -> Self {
        Self {
            ecc_level: EcLevel::M,
        }
    }

    /// Create a renderer with a specific error correction level
    pub fn with_ecc_level(ecc_level: EcLevel) -> Self {
        Self { ecc_level }
    }

    /// Pick the error correction level the options call for
    ///
    /// A logo overlay obscures modules, so High ECC is required to keep
    /// the symbol decodable; otherwise Medium matches plain rendering.
    pub fn for_options(options: &RenderOptions) -> Self {
        if options.logo.is_some() {
            Self::with_ecc_level(EcLevel::H)
        } else {
            Self::new()
        }
    }

    /// Render a payload into a styled RGBA image
    ///
    /// The output is exactly `options.size` pixels square whenever the
    /// symbol plus quiet zone fits; oversized payloads grow the canvas to
    /// one pixel per module instead of becoming unscannable.
    pub fn render(&self, payload: &str, options: &RenderOptions) -> Result<RgbaImage> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.ecc_level)?;
        let modules = code.width() as u32;

        let size = options.size.clamp(SIZE_MIN, SIZE_MAX);
        let total = modules + 2 * QUIET_ZONE;
        let scale = (size / total).max(1);
        let drawn = scale * total;

        let side = size.max(drawn);
        if side > size {
            tracing::warn!(
                requested = size,
                actual = side,
                modules,
                "Payload too dense for requested size; growing output"
            );
        }

        let mut canvas = RgbaImage::from_pixel(side, side, options.background);

        // Center the symbol, then skip past the quiet zone
        let origin = (side - drawn) / 2 + QUIET_ZONE * scale;

        for y in 0..modules {
            for x in 0..modules {
                if code[(x as usize, y as usize)] != Color::Dark {
                    continue;
                }
                // Styled finder corners are the main cause of undetectable
                // symbols, so the three finder patterns stay square.
                let dot_style = if in_finder_pattern(x, y, modules) {
                    DotStyle::Square
                } else {
                    options.dot_style
                };
                style::draw_module(
                    &mut canvas,
                    origin + x * scale,
                    origin + y * scale,
                    scale,
                    dot_style,
                    options.foreground,
                );
            }
        }

        if let Some(logo) = &options.logo {
            overlay::apply(&mut canvas, logo, options.background);
        }

        tracing::debug!(
            modules,
            scale,
            side,
            ecc = ?self.ecc_level,
            style = %options.dot_style,
            logo = options.logo.is_some(),
            "Rendered QR code"
        );

        Ok(canvas)
    }

    /// Render a payload as a unicode block string for terminal preview
    pub fn render_terminal(&self, payload: &str) -> Result<String> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.ecc_level)?;
        Ok(code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build())
    }
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// True if module `(x, y)` lies within one of the three finder patterns
fn in_finder_pattern(x: u32, y: u32, modules: u32) -> bool {
    let near = |v: u32| v < 7;
    let far = |v: u32| v >= modules.saturating_sub(7);
    (near(x) && near(y)) || (far(x) && near(y)) || (near(x) && far(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_exact_size() {
        let renderer = QrRenderer::new();
        let options = RenderOptions::default().with_size(300);
        let img = renderer.render("https://example.com", &options).unwrap();
        assert_eq!(img.width(), 300);
        assert_eq!(img.height(), 300);
    }

    #[test]
    fn test_size_clamping() {
        let options = RenderOptions::default().with_size(50);
        assert_eq!(options.size, SIZE_MIN);
        let options = RenderOptions::default().with_size(5000);
        assert_eq!(options.size, SIZE_MAX);
    }

    #[test]
    fn test_render_uses_background() {
        let renderer = QrRenderer::new();
        let bg = Rgba([10, 20, 30, 255]);
        let options = RenderOptions::default().with_size(200).with_background(bg);
        let img = renderer.render("hello", &options).unwrap();
        // Corner pixel is always quiet zone
        assert_eq!(*img.get_pixel(0, 0), bg);
    }

    #[test]
    fn test_render_all_styles() {
        let renderer = QrRenderer::new();
        for style in DotStyle::ALL {
            let options = RenderOptions::default().with_dot_style(style);
            assert!(renderer.render("style test", &options).is_ok());
        }
    }

    #[test]
    fn test_dense_payload_grows_canvas() {
        let renderer = QrRenderer::new();
        let payload = "a".repeat(800);
        let options = RenderOptions::default().with_size(100);

        let img = renderer.render(&payload, &options).unwrap();
        // Too many modules for 100px: output grows to one pixel per module
        assert!(img.width() > 100);
        assert_eq!(img.width(), img.height());

        // One pixel per module is below what detectors sample reliably,
        // so magnify losslessly before checking the symbol is intact.
        let magnified = image::imageops::resize(
            &img,
            img.width() * 4,
            img.height() * 4,
            image::imageops::FilterType::Nearest,
        );
        assert_eq!(crate::verify::decode(&magnified).unwrap(), payload);
    }

    #[test]
    fn test_finder_pattern_regions() {
        assert!(in_finder_pattern(0, 0, 21));
        assert!(in_finder_pattern(20, 3, 21));
        assert!(in_finder_pattern(2, 18, 21));
        assert!(!in_finder_pattern(10, 10, 21));
        assert!(!in_finder_pattern(20, 20, 21));
    }

    #[test]
    fn test_logo_bumps_ecc() {
        let img = image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            8,
            8,
            Rgba([255, 0, 0, 255]),
        ));
        let options = RenderOptions::default().with_logo(LogoOptions::new(img));
        let renderer = QrRenderer::for_options(&options);
        assert!(renderer.render("with logo", &options).is_ok());
    }

    #[test]
    fn test_terminal_preview() {
        let renderer = QrRenderer::new();
        let preview = renderer.render_terminal("hello").unwrap();
        assert!(!preview.is_empty());
    }
}
