//! PMD file header
//!
//! # Layout (283 bytes)
//! ```text
//! 0x000: magic "Pmd" (3 bytes)
//! 0x003: version f32 (1.00)
//! 0x007: model name (20-byte text field)
//! 0x01B: caption (256-byte text field)
//! ```

use crate::strings::encode_text_field;

use super::{COMMENT_FIELD_LEN, NAME_FIELD_LEN, PMD_MAGIC, PMD_VERSION};

/// PMD header (283 bytes)
#[derive(Debug, Clone, Default)]
pub struct PmdHeader {
    /// Model name stored in the 20-byte header field
    pub model_name: String,
    /// Free-text caption stored in the 256-byte header field
    pub comment: String,
}

impl PmdHeader {
    pub const SIZE: usize = 3 + 4 + NAME_FIELD_LEN + COMMENT_FIELD_LEN;

    pub fn new(model_name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            comment: comment.into(),
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..3].copy_from_slice(&PMD_MAGIC);
        bytes[3..7].copy_from_slice(&PMD_VERSION.to_le_bytes());
        bytes[7..27].copy_from_slice(&encode_text_field(&self.model_name, NAME_FIELD_LEN));
        bytes[27..283].copy_from_slice(&encode_text_field(&self.comment, COMMENT_FIELD_LEN));
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::PAD_BYTE;

    #[test]
    fn test_header_size() {
        assert_eq!(PmdHeader::SIZE, 283);
    }

    #[test]
    fn test_header_magic_and_version() {
        let bytes = PmdHeader::new("Cube", "").to_bytes();
        assert_eq!(&bytes[0..3], b"Pmd");
        assert_eq!(&bytes[3..7], &1.0f32.to_le_bytes());
    }

    #[test]
    fn test_header_name_field_bytes() {
        let bytes = PmdHeader::new("Cube", "").to_bytes();
        let mut expected = vec![b'C', b'u', b'b', b'e', 0x00];
        expected.extend(std::iter::repeat(PAD_BYTE).take(15));
        assert_eq!(&bytes[7..27], expected.as_slice());
    }

    #[test]
    fn test_header_caption_field_bytes() {
        let bytes = PmdHeader::new("Cube", "exported scene").to_bytes();
        assert_eq!(&bytes[27..41], b"exported scene");
        assert_eq!(bytes[41], 0x00);
        assert!(bytes[42..283].iter().all(|&b| b == PAD_BYTE));
    }
}
