//! Byte-level helpers for reading pages from disk.

use std::borrow::Cow;

use memchr::memmem;

/// How far into a page to look for a charset declaration.
const SNIFF_LIMIT: usize = 1024;

/// Decode page bytes to text.
///
/// 1. UTF-8 (a BOM is handled by encoding_rs)
/// 2. The declared charset, if one was sniffed
/// 3. Windows-1252, a superset of ISO-8859-1 that never fails
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find the declared charset near the start of a page.
///
/// Recognizes `<meta charset="...">`, the `charset=` parameter of a
/// `http-equiv` content type, and `<?xml ... encoding="..."?>`.
pub fn sniff_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(SNIFF_LIMIT)];
    let lower = prefix.to_ascii_lowercase();

    let (pos, key_len) = memmem::find(&lower, b"charset=")
        .map(|p| (p, 8))
        .or_else(|| memmem::find(&lower, b"encoding=").map(|p| (p, 9)))?;

    let value = &prefix[pos + key_len..];
    let value = match value.first() {
        Some(b'"' | b'\'') => &value[1..],
        _ => value,
    };
    let end = value
        .iter()
        .position(|b| matches!(b, b'"' | b'\'' | b';' | b'>' | b'/' | b'?') || b.is_ascii_whitespace())
        .unwrap_or(value.len());

    let name = std::str::from_utf8(&value[..end]).ok()?;
    (!name.is_empty()).then_some(name)
}
