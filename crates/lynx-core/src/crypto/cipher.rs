//! AES-256-GCM authenticated encryption.
//!
//! - 256-bit key from [`derive_key`](super::derive_key)
//! - 96-bit nonce drawn from the OS RNG on every call, never caller-supplied
//! - 128-bit tag appended to the ciphertext
//!
//! Decryption failures collapse into a single `AuthenticationFailed` so a
//! caller cannot tell a wrong key from corrupted or tampered data.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key};
use rand::rngs::OsRng;
use rand::RngCore;

use super::envelope::Envelope;
use super::key::DerivedKey;
use crate::error::{LynxError, Result};

/// Nonce length in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Authentication tag length in bytes (128 bits).
pub const TAG_LEN: usize = 16;

/// A per-encryption random nonce.
///
/// Nonces are public values; only the engine creates fresh ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    fn random() -> Self {
        let mut bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Rebuild a nonce read back from an envelope.
    pub(crate) fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

/// AEAD engine bound to one derived key.
///
/// Build once per key and reuse it for any number of fields.
pub struct Cipher {
    inner: Aes256Gcm,
}

impl Cipher {
    pub fn new(key: &DerivedKey) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(key.as_bytes());
        Self {
            inner: Aes256Gcm::new(key),
        }
    }

    /// Encrypt UTF-8 text under a fresh random nonce.
    pub fn encrypt(&self, plaintext: &str) -> Result<Envelope> {
        self.encrypt_bytes(plaintext.as_bytes())
    }

    fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<Envelope> {
        let nonce = Nonce::random();
        let ciphertext = self
            .inner
            .encrypt(aes_gcm::Nonce::from_slice(nonce.as_bytes()), plaintext)
            .map_err(|_| {
                LynxError::InvalidInput("Plaintext is too long for AES-GCM".to_string())
            })?;

        tracing::trace!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "encrypted field"
        );

        Ok(Envelope::new(nonce, ciphertext))
    }

    /// Verify and decrypt, then decode the plaintext as UTF-8.
    ///
    /// # Errors
    ///
    /// - `LynxError::AuthenticationFailed` if the tag does not verify
    /// - `LynxError::DecodingFailed` if the plaintext is not valid UTF-8
    pub fn decrypt(&self, nonce: &Nonce, ciphertext: &[u8]) -> Result<String> {
        let plaintext = self
            .inner
            .decrypt(aes_gcm::Nonce::from_slice(nonce.as_bytes()), ciphertext)
            .map_err(|_| LynxError::AuthenticationFailed)?;

        String::from_utf8(plaintext).map_err(|_| LynxError::DecodingFailed)
    }
}

/// Encrypt `plaintext` under `key` with a fresh nonce.
///
/// # Examples
///
/// ```
/// use lynx_core::crypto::{decrypt, derive_key, encrypt, Passphrase};
///
/// let key = derive_key(&Passphrase::from("master")).unwrap();
/// let sealed = encrypt(&key, "secret").unwrap();
/// let opened = decrypt(&key, sealed.nonce(), sealed.ciphertext()).unwrap();
/// assert_eq!(opened, "secret");
/// ```
pub fn encrypt(key: &DerivedKey, plaintext: &str) -> Result<Envelope> {
    Cipher::new(key).encrypt(plaintext)
}

/// Verify and decrypt `ciphertext` produced under `key` and `nonce`.
pub fn decrypt(key: &DerivedKey, nonce: &Nonce, ciphertext: &[u8]) -> Result<String> {
    Cipher::new(key).decrypt(nonce, ciphertext)
}
