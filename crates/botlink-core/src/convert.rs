//! Text/byte conversion seam
//!
//! The one place this crate commits to a text encoding (UTF-8). Buffers
//! and queues treat their contents as opaque; transport adapters cross
//! this boundary in both directions. All functions are stateless.

use crate::errors::ConvertError;

/// Encode command text as wire bytes
pub fn text_to_bytes(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Decode wire bytes as text, strictly
///
/// Invalid UTF-8 is a recoverable error; the robot occasionally garbles a
/// byte mid-reply and the caller decides whether to drop or retry.
pub fn bytes_to_text(bytes: &[u8]) -> Result<String, ConvertError> {
    Ok(core::str::from_utf8(bytes)?.to_owned())
}

/// Decode wire bytes as text, substituting U+FFFD for invalid sequences
///
/// For display paths where losing a garbled byte beats losing the reply.
pub fn bytes_to_text_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Format bytes as lowercase hex for diagnostics
pub fn hex_dump(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_roundtrip() {
        let bytes = text_to_bytes("kbalance");
        assert_eq!(bytes, b"kbalance");
        assert_eq!(bytes_to_text(&bytes).unwrap(), "kbalance");
    }

    #[test]
    fn test_strict_decode_rejects_invalid_utf8() {
        let err = bytes_to_text(&[0x6B, 0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidUtf8(_)));
    }

    #[test]
    fn test_lossy_decode_substitutes() {
        let text = bytes_to_text_lossy(&[0x6B, 0xFF]);
        assert_eq!(text, "k\u{FFFD}");
    }

    #[test]
    fn test_hex_dump() {
        assert_eq!(hex_dump(b"AT"), "4154");
        assert_eq!(hex_dump(&[]), "");
    }
}
