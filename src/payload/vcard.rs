//! vCard 3.0 serialization for contact records

use crate::payload::ContactRecord;

/// Serialize a contact record as a vCard 3.0 block
///
/// Always emits exactly nine lines in fixed order; empty fields produce
/// empty segments, never omitted lines. Field values are escaped per
/// RFC 2426 (backslash, semicolon, comma, newline).
pub fn vcard_payload(record: &ContactRecord) -> String {
    let name = escape(&record.name);
    let last_name = escape(&record.last_name);

    [
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("N:{};{}", last_name, name),
        format!("FN:{} {}", name, last_name),
        format!("ORG:{}", escape(&record.org)),
        format!("TITLE:{}", escape(&record.title)),
        format!("TEL;TYPE=cell:{}", escape(&record.phone)),
        format!("EMAIL:{}", escape(&record.email)),
        "END:VCARD".to_string(),
    ]
    .join("\n")
}

/// Escape a field value per RFC 2426 §2.4.2
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}
