//! PNG output and render summaries

use crate::error::Result;
use crate::payload::PayloadSource;
use crate::render::{RenderOptions, color};
use image::{ImageFormat, RgbaImage};
use serde_json::{Map, Value, json};
use std::io::Cursor;
use std::path::Path;

/// Write a rendered image to a PNG file
pub fn write_png(img: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    img.save_with_format(path.as_ref(), ImageFormat::Png)?;
    tracing::info!(path = %path.as_ref().display(), "Wrote QR code PNG");
    Ok(())
}

/// Encode a rendered image as in-memory PNG bytes
pub fn png_bytes(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Combined structured and human-readable description of a completed render
#[derive(Debug, Clone)]
pub struct RenderedSummary {
    /// Structured JSON representation suitable for downstream consumers
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Describe a completed render in both JSON and human-readable forms.
pub fn render_summary(
    source: &PayloadSource,
    options: &RenderOptions,
    output: Option<&Path>,
) -> RenderedSummary {
    let payload = source.payload();

    let mut root = Map::new();
    root.insert("mode".to_string(), Value::String(source.mode.to_string()));
    root.insert("payload".to_string(), Value::String(payload.clone()));
    root.insert("payload_bytes".to_string(), Value::from(payload.len()));
    root.insert(
        "options".to_string(),
        json!({
            "size": options.size,
            "foreground": color::to_hex(options.foreground),
            "background": color::to_hex(options.background),
            "dot_style": options.dot_style.to_string(),
            "logo": options.logo.as_ref().map(|logo| json!({
                "margin": logo.margin,
                "scale": logo.scale,
                "shape": logo.shape.to_string(),
                "mask_dots": logo.mask_dots,
            })),
        }),
    );
    if let Some(path) = output {
        root.insert(
            "output".to_string(),
            Value::String(path.display().to_string()),
        );
    }

    let mut human = Vec::new();
    human.push(format!("QR code rendered ({} mode)", source.mode));
    human.push(format!("  Payload: {} bytes", payload.len()));
    human.push(format!(
        "  Size: {}x{} px, {} dots, {} on {}",
        options.size,
        options.size,
        options.dot_style,
        color::to_hex(options.foreground),
        color::to_hex(options.background),
    ));
    if let Some(logo) = &options.logo {
        human.push(format!(
            "  Logo: scale {:.2}, margin {} px, {} patch{}",
            logo.scale,
            logo.margin,
            logo.shape,
            if logo.mask_dots { "" } else { ", dots kept" },
        ));
    }
    if let Some(path) = output {
        human.push(format!("  Output: {}", path.display()));
    }

    RenderedSummary {
        json: Value::Object(root),
        human,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{ContactRecord, PayloadSource};
    use image::Rgba;

    #[test]
    fn test_png_bytes_magic() {
        let img = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        let bytes = png_bytes(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_summary_reports_mode_and_options() {
        let source = PayloadSource::contact(ContactRecord {
            name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            ..Default::default()
        });
        let options = RenderOptions::default();
        let summary = render_summary(&source, &options, None);

        assert_eq!(summary.json["mode"], "contact");
        assert_eq!(summary.json["options"]["size"], 300);
        assert_eq!(summary.json["options"]["logo"], Value::Null);
        assert!(summary.human[0].contains("contact"));
    }

    #[test]
    fn test_summary_payload_matches_projection() {
        let source = PayloadSource::plain_text("https://example.com");
        let summary = render_summary(&source, &RenderOptions::default(), None);
        assert_eq!(summary.json["payload"], "https://example.com");
    }
}
