//! Fixed-width string field encoding
//!
//! PMD stores every name as a fixed-width byte field padded with the 0xFD
//! sentinel. The two header text fields (model name, caption) additionally
//! carry a single 0x00 terminator between the content and the pad fill.
//!
//! Content is capped at width-1 bytes so the terminator/pad convention always
//! closes the field; longer input is truncated. Field content is expected to
//! be ASCII (one codepoint per byte).

/// Pad sentinel for fixed-width string fields
pub const PAD_BYTE: u8 = 0xFD;

/// Encode a name field: content bytes, then 0xFD fill.
///
/// Used for material texture filenames, bone names, and skin target names.
pub fn encode_name_field(s: &str, width: usize) -> Vec<u8> {
    let mut field = vec![PAD_BYTE; width];
    let bytes = s.as_bytes();
    let len = bytes.len().min(width - 1);
    field[..len].copy_from_slice(&bytes[..len]);
    field
}

/// Encode a header text field: content bytes, one 0x00 terminator, then
/// 0xFD fill.
pub fn encode_text_field(s: &str, width: usize) -> Vec<u8> {
    let mut field = encode_name_field(s, width);
    let len = s.len().min(width - 1);
    field[len] = 0x00;
    field
}
