//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! Keys are derived deterministically from the passphrase alone: the salt
//! is the passphrase's own UTF-8 bytes. Keys are never stored, so every
//! session re-derives the same key from the same passphrase.
//!
//! Changing the iteration count, the hash or the salt rule makes every
//! previously stored envelope undecryptable.

use hmac::Hmac;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{LynxError, Result};

/// PBKDF2 iteration count. Fixed for compatibility with stored data.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256-GCM).
pub const KEY_LENGTH: usize = 32;

/// A user-supplied master passphrase.
///
/// Held as a `SecretString` so it is zeroized on drop and never printed.
pub struct Passphrase(SecretString);

impl Passphrase {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Byte length of the passphrase.
    pub fn len(&self) -> usize {
        self.0.expose_secret().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<&str> for Passphrase {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Passphrase {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passphrase([REDACTED])")
    }
}

/// A symmetric key derived from a passphrase.
///
/// Key material is zeroized from memory when dropped. The type is
/// intentionally not serializable.
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Raw key bytes, for the cipher only.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a passphrase.
///
/// Runs PBKDF2-HMAC-SHA256 for [`PBKDF2_ITERATIONS`] rounds, using the
/// passphrase bytes as both password and salt. The whole passphrase is
/// used; there is no length cap.
///
/// This is CPU-bound and slow on purpose. Derive once per session and
/// reuse the key for many encrypt/decrypt calls.
///
/// # Errors
///
/// - `LynxError::InvalidInput` if the passphrase is empty
/// - `LynxError::KeyDerivationFailed` if the PBKDF primitive fails
///
/// # Examples
///
/// ```
/// use lynx_core::crypto::{derive_key, Passphrase};
///
/// let key = derive_key(&Passphrase::from("my-passphrase")).unwrap();
/// let again = derive_key(&Passphrase::from("my-passphrase")).unwrap();
/// assert_eq!(key, again);
/// ```
pub fn derive_key(passphrase: &Passphrase) -> Result<DerivedKey> {
    if passphrase.is_empty() {
        return Err(LynxError::InvalidInput(
            "Passphrase cannot be empty".to_string(),
        ));
    }

    let secret = passphrase.expose().as_bytes();
    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(secret, secret, PBKDF2_ITERATIONS, &mut key_bytes)
        .map_err(|e| LynxError::KeyDerivationFailed(e.to_string()))?;

    tracing::debug!(
        passphrase_len = passphrase.len(),
        iterations = PBKDF2_ITERATIONS,
        "derived key"
    );

    Ok(DerivedKey::from_bytes(key_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let passphrase = Passphrase::from("test-passphrase");

        let key1 = derive_key(&passphrase).unwrap();
        let key2 = derive_key(&passphrase).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let key1 = derive_key(&Passphrase::from("passphrase-one")).unwrap();
        let key2 = derive_key(&Passphrase::from("passphrase-two")).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_self_salted_matches_explicit_pbkdf2() {
        // Salt is the passphrase itself.
        let passphrase = "correct horse battery staple";
        let mut expected = [0u8; KEY_LENGTH];
        pbkdf2::pbkdf2_hmac::<Sha256>(
            passphrase.as_bytes(),
            passphrase.as_bytes(),
            PBKDF2_ITERATIONS,
            &mut expected,
        );

        let key = derive_key(&Passphrase::from(passphrase)).unwrap();
        assert_eq!(key.as_bytes(), &expected);
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        let result = derive_key(&Passphrase::from(""));
        assert!(matches!(result, Err(LynxError::InvalidInput(_))));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Passphrase cannot be empty"));
    }

    #[test]
    fn test_long_passphrase_not_truncated() {
        let long_a = "a".repeat(8 * 1024);
        let mut long_b = long_a.clone();
        long_b.push('b');

        let key_a = derive_key(&Passphrase::from(long_a)).unwrap();
        let key_b = derive_key(&Passphrase::from(long_b)).unwrap();
        assert_ne!(key_a.as_bytes(), key_b.as_bytes());
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key(&Passphrase::from("test-passphrase")).unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = ::hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }

    #[test]
    fn test_passphrase_debug_redacts() {
        let passphrase = Passphrase::from("hunter2");
        let debug_output = format!("{:?}", passphrase);
        assert!(!debug_output.contains("hunter2"));
    }
}
