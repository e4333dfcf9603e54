//! Error types for Lynx core operations.
//!
//! Every failure the core can produce is a local, typed error. Messages
//! describe *what* failed, never the secret material involved; the CLI
//! layer maps these to user-facing messages.

use thiserror::Error;

/// Result type alias for Lynx operations.
pub type Result<T> = std::result::Result<T, LynxError>;

/// Core error type for Lynx operations.
#[derive(Debug, Error)]
pub enum LynxError {
    /// The key derivation primitive failed (environment fault, not retryable)
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    /// Tag verification failed: wrong key, corrupted or tampered ciphertext.
    ///
    /// The causes are deliberately indistinguishable.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Decrypted bytes are not valid UTF-8 text
    #[error("Decrypted data is not valid UTF-8")]
    DecodingFailed,

    /// Envelope framing violates the `{nonce}+{ciphertext}` format
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failed-attempt store could not be read or written
    #[error("Attempt store error: {0}")]
    AttemptStore(String),
}

impl From<std::io::Error> for LynxError {
    fn from(err: std::io::Error) -> Self {
        LynxError::AttemptStore(err.to_string())
    }
}

impl From<serde_json::Error> for LynxError {
    fn from(err: serde_json::Error) -> Self {
        LynxError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failed_message_has_no_detail() {
        assert_eq!(
            LynxError::AuthenticationFailed.to_string(),
            "Authentication failed"
        );
    }

    #[test]
    fn test_io_error_maps_to_attempt_store() {
        let err: LynxError = std::io::Error::new(std::io::ErrorKind::Other, "disk gone").into();
        assert!(matches!(err, LynxError::AttemptStore(_)));
    }
}
