//! Payload sources for QR generation
//!
//! A payload is always derived on demand from the active content source:
//! either a raw text/URL string or a structured contact record serialized
//! as a vCard 3.0 block. The derived string is never stored, so edits to
//! one source can never leak into the other.

mod vcard;

pub use vcard::vcard_payload;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selector for which content source feeds the QR payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentMode {
    /// Embed the raw text field as-is (URLs, arbitrary strings)
    #[default]
    PlainText,
    /// Embed the contact record serialized as a vCard
    Contact,
}

impl FromStr for ContentMode {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "plain-text" | "text" | "url" => Ok(Self::PlainText),
            "contact" | "vcard" => Ok(Self::Contact),
            other => Err(format!(
                "Unknown content mode '{other}', expected 'plain-text' or 'contact'"
            )),
        }
    }
}

impl fmt::Display for ContentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlainText => write!(f, "plain-text"),
            Self::Contact => write!(f, "contact"),
        }
    }
}

/// Structured contact fields collected from the user
///
/// All fields are free-form text and may be empty; there are no
/// cross-field invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRecord {
    /// Given name
    pub name: String,
    /// Family name
    pub last_name: String,
    /// Organization
    pub org: String,
    /// Job title
    pub title: String,
    /// Phone number (emitted as TEL;TYPE=cell)
    pub phone: String,
    /// Email address
    pub email: String,
}

/// The content state behind a QR code: both sources plus the active mode
///
/// The embedded payload is a pure projection of this state, computed by
/// [`PayloadSource::payload`]. Switching modes mutates neither source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadSource {
    /// Which source is currently embedded
    pub mode: ContentMode,
    /// Raw text/URL source
    pub text: String,
    /// Structured contact source
    pub contact: ContactRecord,
}

impl PayloadSource {
    /// Create a plain-text source from a raw string
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self {
            mode: ContentMode::PlainText,
            text: text.into(),
            contact: ContactRecord::default(),
        }
    }

    /// Create a contact source from a record
    pub fn contact(record: ContactRecord) -> Self {
        Self {
            mode: ContentMode::Contact,
            text: String::new(),
            contact: record,
        }
    }

    /// Derive the payload text for the current mode
    ///
    /// Deterministic and total: every combination of mode and field values
    /// produces a payload, empty fields included.
    pub fn payload(&self) -> String {
        match self.mode {
            ContentMode::PlainText => self.text.clone(),
            ContentMode::Contact => vcard_payload(&self.contact),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passthrough() {
        let mut source = PayloadSource::plain_text("https://example.com");
        source.contact.name = "Ana".to_string();
        // Contact contents never leak into plain-text payloads
        assert_eq!(source.payload(), "https://example.com");
    }

    #[test]
    fn test_contact_mode_ignores_text() {
        let mut source = PayloadSource::contact(ContactRecord::default());
        source.text = "leftover input".to_string();
        assert!(source.payload().starts_with("BEGIN:VCARD"));
        assert!(!source.payload().contains("leftover"));
    }

    #[test]
    fn test_mode_toggle_is_lossless() {
        let mut source = PayloadSource::contact(ContactRecord {
            name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            ..Default::default()
        });
        source.text = "https://example.com".to_string();

        let before = source.payload();
        source.mode = ContentMode::PlainText;
        assert_eq!(source.payload(), "https://example.com");
        source.mode = ContentMode::Contact;
        assert_eq!(source.payload(), before);
    }

    #[test]
    fn test_payload_is_idempotent() {
        let source = PayloadSource::contact(ContactRecord {
            name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            org: "ACME".to_string(),
            title: "Engineer".to_string(),
            phone: "+34 600 000 000".to_string(),
            email: "ana@example.com".to_string(),
        });
        assert_eq!(source.payload(), source.payload());
    }

    #[test]
    fn test_content_mode_parsing() {
        assert_eq!("contact".parse::<ContentMode>(), Ok(ContentMode::Contact));
        assert_eq!("vcard".parse::<ContentMode>(), Ok(ContentMode::Contact));
        assert_eq!("text".parse::<ContentMode>(), Ok(ContentMode::PlainText));
        assert!("qr".parse::<ContentMode>().is_err());
    }
}
