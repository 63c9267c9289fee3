//! Hex color parsing for foreground/background options

use crate::error::{Error, Result};
use image::Rgba;

/// Parse a `#rrggbb` or `#rgb` hex color into an opaque RGBA pixel
///
/// The leading `#` is optional; parsing is case-insensitive.
pub fn parse_hex(value: &str) -> Result<Rgba<u8>> {
    let digits = value.strip_prefix('#').unwrap_or(value);

    // Byte-offset slicing below requires single-byte chars
    if !digits.is_ascii() {
        return Err(Error::Color(value.to_string()));
    }

    let channels = match digits.len() {
        6 => [
            channel(value, &digits[0..2])?,
            channel(value, &digits[2..4])?,
            channel(value, &digits[4..6])?,
        ],
        3 => {
            // #rgb shorthand expands each digit: #f0a -> #ff00aa
            let mut out = [0u8; 3];
            for (i, slot) in out.iter_mut().enumerate() {
                let nibble = channel(value, &digits[i..i + 1])?;
                *slot = nibble << 4 | nibble;
            }
            out
        }
        _ => return Err(Error::Color(value.to_string())),
    };

    Ok(Rgba([channels[0], channels[1], channels[2], 0xFF]))
}

fn channel(input: &str, digits: &str) -> Result<u8> {
    u8::from_str_radix(digits, 16).map_err(|_| Error::Color(input.to_string()))
}

/// Format an RGBA pixel back into `#rrggbb` form (alpha is dropped)
pub fn to_hex(color: Rgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}
