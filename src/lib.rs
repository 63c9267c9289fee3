//! qrforge - styled QR code generation with contact-card payloads
//!
//! This library turns a text payload - a raw URL/string or a contact
//! record serialized as a vCard 3.0 block - into a styled QR code PNG:
//! configurable size, colors, dot styles, and an optional centered logo
//! overlay.
//!
//! # Features
//!
//! - **Payload encoding**: deterministic vCard serialization with proper
//!   field escaping, derived on demand so user input is never overwritten
//! - **Styled rendering**: exact-size output, four dot styles, hex colors
//! - **Logo overlays**: margin, relative size, patch shape, dot masking
//! - **Verification**: rendered output is re-decoded to prove it scans
//!
//! # Example
//!
//! ```no_run
//! use qrforge::{ContactRecord, QrForge};
//!
//! #[tokio::main]
//! async fn main() -> qrforge::Result<()> {
//!     let mut forge = QrForge::for_contact(ContactRecord {
//!         name: "Ana".to_string(),
//!         last_name: "Ruiz".to_string(),
//!         ..Default::default()
//!     });
//!
//!     forge.load_logo("logo.png").await?;
//!     forge.save_png("contact-qr.png")?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod payload;
pub mod render;
pub mod verify;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{LogRotation, LoggingOptions, QrforgeConfig, RenderDefaults};
pub use payload::{ContactRecord, ContentMode, PayloadSource};
pub use render::{DotStyle, LogoOptions, LogoShape, QrRenderer, RenderOptions};

use image::RgbaImage;
use std::path::Path;

/// High-level interface combining payload source + render options
///
/// The embedded payload is derived from the source on every render, so
/// edits through the mutators can never leave a stale payload behind.
#[derive(Debug, Clone, Default)]
pub struct QrForge {
    /// Current content state (mode, raw text, contact record)
    pub source: PayloadSource,
    /// Current visual options
    pub options: RenderOptions,
}

impl QrForge {
    /// Create a generator for a raw text/URL payload
    pub fn for_text(text: impl Into<String>) -> Self {
        Self {
            source: PayloadSource::plain_text(text),
            options: RenderOptions::default(),
        }
    }

    /// Create a generator for a contact-card payload
    pub fn for_contact(record: ContactRecord) -> Self {
        Self {
            source: PayloadSource::contact(record),
            options: RenderOptions::default(),
        }
    }

    /// Switch the active content mode without touching either source
    pub fn set_mode(&mut self, mode: ContentMode) {
        self.source.mode = mode;
    }

    /// Replace the raw text source
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.source.text = text.into();
    }

    /// Update the contact source field-by-field
    pub fn contact_mut(&mut self) -> &mut ContactRecord {
        &mut self.source.contact
    }

    /// Load a logo from a file and attach it to the render options
    ///
    /// A later call simply replaces the previous logo.
    pub async fn load_logo(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let logo = LogoOptions::load(path).await?;
        self.options.logo = Some(logo);
        Ok(())
    }

    /// Remove any attached logo
    pub fn remove_logo(&mut self) {
        self.options.logo = None;
    }

    /// Derive the payload for the current mode
    pub fn payload(&self) -> String {
        self.source.payload()
    }

    /// Render the current payload with the current options
    pub fn render(&self) -> Result<RgbaImage> {
        let renderer = QrRenderer::for_options(&self.options);
        renderer.render(&self.payload(), &self.options)
    }

    /// Render and write a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let image = self.render()?;
        output::write_png(&image, path)
    }

    /// Render, then decode the result and check it matches the payload
    pub fn verify(&self) -> Result<()> {
        let image = self.render()?;
        verify::round_trip(&image, &self.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tracks_contact_edits() {
        let mut forge = QrForge::for_contact(ContactRecord::default());
        let before = forge.payload();

        forge.contact_mut().name = "Ana".to_string();
        let after = forge.payload();

        assert_ne!(before, after);
        assert!(after.contains("FN:Ana "));
    }

    #[test]
    fn test_mode_switch_preserves_sources() {
        let mut forge = QrForge::for_text("https://example.com");
        forge.contact_mut().name = "Ana".to_string();

        forge.set_mode(ContentMode::Contact);
        assert!(forge.payload().starts_with("BEGIN:VCARD"));

        forge.set_mode(ContentMode::PlainText);
        assert_eq!(forge.payload(), "https://example.com");
        assert_eq!(forge.source.contact.name, "Ana");
    }

    #[test]
    fn test_render_and_verify() {
        let forge = QrForge::for_text("https://example.com");
        forge.verify().unwrap();
    }
}
