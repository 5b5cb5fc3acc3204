//! Text decoding helpers.

use std::borrow::Cow;

/// Decode document bytes as UTF-8.
///
/// A leading BOM is stripped. Byte sequences that are not valid UTF-8 are
/// replaced with U+FFFD one by one, so every valid character of the input
/// survives unchanged.
///
/// Borrows the input when it is valid UTF-8 without a BOM.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (text, malformed) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    if malformed {
        log::warn!("input is not valid UTF-8, invalid bytes replaced with U+FFFD");
    }
    text
}
