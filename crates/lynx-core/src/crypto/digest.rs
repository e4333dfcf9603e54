//! SHA-256 digests for authentication tokens.
//!
//! Used only to compare API tokens at the authentication boundary; never
//! part of the encryption path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use super::hex;
use crate::error::{LynxError, Result};

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// A lowercase hex SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Digest {
    type Err = LynxError;

    /// Parse a stored digest, normalising to lowercase.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.len() != DIGEST_HEX_LEN || !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LynxError::InvalidInput(format!(
                "Digest must be {} hex characters",
                DIGEST_HEX_LEN
            )));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for Digest {
    type Error = LynxError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Digest> for String {
    fn from(value: Digest) -> Self {
        value.0
    }
}

/// Hash text with SHA-256 and return the lowercase hex digest.
///
/// # Examples
///
/// ```
/// use lynx_core::crypto::digest;
///
/// assert_eq!(
///     digest("").as_str(),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
pub fn digest(text: &str) -> Digest {
    let hash = Sha256::digest(text.as_bytes());
    Digest(hex::encode(&hash))
}
