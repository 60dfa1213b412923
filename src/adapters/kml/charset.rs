//! Character set detection for KML input
//!
//! A byte order mark wins, then the `encoding` of the XML declaration, then
//! UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;

/// Bytes searched for the XML declaration
const PROLOG_LIMIT: usize = 1024;

/// Decode a raw document into UTF-8 text
///
/// # Errors
///
/// Returns a description when the declared encoding is unknown or the bytes
/// are not valid in the detected encoding.
pub fn decode_document(bytes: &[u8]) -> Result<String, String> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(bytes)?.unwrap_or(UTF_8), bytes),
    };

    let (text, malformed) = encoding.decode_without_bom_handling(body);
    if malformed {
        return Err(format!("invalid {} byte sequence", encoding.name()));
    }
    Ok(text.into_owned())
}

fn declared_encoding(bytes: &[u8]) -> Result<Option<&'static Encoding>, String> {
    let pattern = Regex::new(r#"(?-u)^\s*<\?xml\s[^>]*?\bencoding\s*=\s*["']([^"']+)["']"#)
        .map_err(|e| format!("invalid declaration pattern: {e}"))?;

    let prolog = &bytes[..bytes.len().min(PROLOG_LIMIT)];
    let Some(label) = pattern.captures(prolog).and_then(|c| c.get(1)) else {
        return Ok(None);
    };

    Encoding::for_label(label.as_bytes()).map(Some).ok_or_else(|| {
        format!(
            "unsupported encoding {:?}",
            String::from_utf8_lossy(label.as_bytes())
        )
    })
}
