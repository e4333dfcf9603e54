//! Envelope framing: `{hex(nonce)}+{hex(ciphertext)}`.
//!
//! This string is the at-rest format of every secret field, so the shape
//! is fixed: lowercase hex, a single `+` delimiter, split on the first `+`.
//! The hex alphabet has no `+`, which is what makes first-split safe.

use std::fmt;
use std::str::FromStr;

use super::cipher::{Nonce, NONCE_LEN};
use super::hex;
use crate::error::{LynxError, Result};

/// Delimiter between the nonce and ciphertext halves.
pub const DELIMITER: char = '+';

/// A nonce and the ciphertext it was used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    nonce: Nonce,
    ciphertext: Vec<u8>,
}

impl Envelope {
    pub(crate) fn new(nonce: Nonce, ciphertext: Vec<u8>) -> Self {
        Self { nonce, ciphertext }
    }

    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// Ciphertext with the authentication tag appended.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Serialize to the transport string.
    pub fn encode(&self) -> String {
        encode(&self.nonce, &self.ciphertext)
    }

    /// Parse a transport string.
    ///
    /// # Errors
    ///
    /// Returns `LynxError::MalformedEnvelope` if:
    /// - the `+` delimiter is absent
    /// - either half is empty, has odd length or contains non-hex characters
    /// - the nonce half is not exactly 12 bytes
    pub fn decode(envelope: &str) -> Result<Self> {
        let (nonce_hex, ciphertext_hex) = envelope.split_once(DELIMITER).ok_or_else(|| {
            LynxError::MalformedEnvelope("missing '+' delimiter".to_string())
        })?;

        if nonce_hex.is_empty() {
            return Err(LynxError::MalformedEnvelope(
                "nonce half is empty".to_string(),
            ));
        }
        if ciphertext_hex.is_empty() {
            return Err(LynxError::MalformedEnvelope(
                "ciphertext half is empty".to_string(),
            ));
        }

        let nonce_bytes = hex::decode(nonce_hex)?;
        let nonce: [u8; NONCE_LEN] = nonce_bytes.as_slice().try_into().map_err(|_| {
            LynxError::MalformedEnvelope(format!(
                "nonce must be {} bytes (got {})",
                NONCE_LEN,
                nonce_bytes.len()
            ))
        })?;
        let ciphertext = hex::decode(ciphertext_hex)?;

        Ok(Self::new(Nonce::from_bytes(nonce), ciphertext))
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Envelope {
    type Err = LynxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

/// Join a nonce and ciphertext into the transport string.
pub fn encode(nonce: &Nonce, ciphertext: &[u8]) -> String {
    format!(
        "{}{}{}",
        hex::encode(nonce.as_bytes()),
        DELIMITER,
        hex::encode(ciphertext)
    )
}

/// Split a transport string back into nonce and ciphertext.
pub fn decode(envelope: &str) -> Result<(Nonce, Vec<u8>)> {
    let parsed = Envelope::decode(envelope)?;
    Ok((parsed.nonce, parsed.ciphertext))
}
