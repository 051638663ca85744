//! Reading text files of unknown encoding.

use encoding_rs::{UTF_8, WINDOWS_1252};
use std::path::Path;

/// Number of leading bytes inspected for NUL when sniffing binary content.
const BINARY_SNIFF_LEN: usize = 1024;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodings attempted in order until one succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 with a leading byte-order mark.
    Utf8Bom,
    Utf8,
    /// Single-byte fallback; cannot fail.
    Latin1,
}

const DECODE_ORDER: [TextEncoding; 3] = [
    TextEncoding::Utf8Bom,
    TextEncoding::Utf8,
    TextEncoding::Latin1,
];

impl TextEncoding {
    /// Decode `bytes`, or `None` if they are not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8Bom => {
                let body = bytes.strip_prefix(UTF8_BOM)?;
                UTF_8
                    .decode_without_bom_handling_and_without_replacement(body)
                    .map(|s| s.into_owned())
            }
            TextEncoding::Utf8 => UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
            TextEncoding::Latin1 => {
                let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
                Some(text.into_owned())
            }
        }
    }
}

/// Whether the first KiB of `bytes` contains a NUL byte.
pub fn looks_binary(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    head.contains(&0)
}

/// Decode raw bytes to text, returning the encoding that worked.
pub fn decode_text(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    if looks_binary(bytes) {
        return None;
    }
    DECODE_ORDER
        .iter()
        .find_map(|enc| enc.decode(bytes).map(|text| (text, *enc)))
}

/// Read `path` as lines of text.
///
/// Returns `None` if the file cannot be read or looks binary.
pub fn read_text_file(path: &Path) -> Option<Vec<String>> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!("{}: read failed: {}", path.display(), e);
            return None;
        }
    };
    let Some((text, encoding)) = decode_text(&bytes) else {
        tracing::debug!("{}: binary content rejected", path.display());
        return None;
    };
    tracing::trace!("{}: decoded as {:?}", path.display(), encoding);
    Some(text.lines().map(String::from).collect())
}
