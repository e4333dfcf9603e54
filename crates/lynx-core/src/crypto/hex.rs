//! Hex codec shared by the framing layer and the digest service.
//!
//! Encoding is always lowercase with two digits per byte. Decoding accepts
//! either case but rejects odd lengths and non-hex characters.

use crate::error::{LynxError, Result};

/// Encode bytes as lowercase hex, two characters per byte.
pub fn encode(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}

/// Decode a hex string into bytes.
///
/// # Errors
///
/// Returns `LynxError::MalformedEnvelope` if the input has odd length or
/// contains a character outside `[0-9a-fA-F]`.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    ::hex::decode(text).map_err(|e| match e {
        ::hex::FromHexError::OddLength => {
            LynxError::MalformedEnvelope("hex length must be even".to_string())
        }
        ::hex::FromHexError::InvalidHexCharacter { index, .. } => LynxError::MalformedEnvelope(
            format!("non-hex character at position {}", index),
        ),
        other => LynxError::MalformedEnvelope(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_lowercase_fixed_width() {
        assert_eq!(encode(&[0x00, 0x0f, 0xab, 0xff]), "000fabff");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_decode_accepts_uppercase() {
        assert_eq!(decode("00FFaB").unwrap(), vec![0x00, 0xff, 0xab]);
    }

    #[test]
    fn test_round_trip_all_byte_values() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_decode_odd_length_rejected() {
        let result = decode("abc");
        assert!(matches!(result, Err(LynxError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_decode_non_hex_rejected() {
        let result = decode("zz");
        assert!(matches!(result, Err(LynxError::MalformedEnvelope(_))));
        let result = decode("0g");
        assert!(matches!(result, Err(LynxError::MalformedEnvelope(_))));
    }
}
