//! Error types for qrforge operations

use thiserror::Error;

/// Result type alias using qrforge's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrforge operations
#[derive(Error, Debug)]
pub enum Error {
    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed during verification
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in a rendered image during verification
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Rendered payload did not survive the decode round trip
    #[error("Verification mismatch: decoded payload differs from input")]
    VerifyMismatch,

    /// Invalid color specification
    #[error("Invalid color '{0}': expected #rrggbb or #rgb hex")]
    Color(String),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

// Implement From conversions for common error types

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::QrEncode(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}
