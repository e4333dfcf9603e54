//! Zero-knowledge client-side cryptography for Lynx.
//!
//! Components, leaves first:
//! - **hex**: lowercase hex codec shared by framing and digests
//! - **key**: PBKDF2-HMAC-SHA256 key derivation (self-salted, deterministic)
//! - **cipher**: AES-256-GCM with a fresh random nonce per call
//! - **envelope**: `{hex(nonce)}+{hex(ciphertext)}` framing
//! - **digest**: SHA-256 hex digests for token comparison
//! - **generator**: random passwords for new items
//!
//! ## Security Model
//!
//! - Plaintext and keys never leave the client; only envelopes are stored
//! - A derived key is reused for many fields but each encryption draws its
//!   own nonce
//! - Decryption failures are indistinguishable to callers
//! - Nothing in this module logs secret material
//!
//! ## Threat Model
//!
//! We defend against:
//! - A server or storage layer reading stored records
//! - Tampering with stored envelopes
//!
//! We do NOT defend against:
//! - Offline brute force of weak passphrases beyond the PBKDF2 work factor
//! - Compromised client / memory

pub mod cipher;
pub mod digest;
pub mod envelope;
pub mod generator;
pub mod hex;
pub mod key;

pub use cipher::{decrypt, encrypt, Cipher, Nonce, NONCE_LEN, TAG_LEN};
pub use digest::{digest, Digest};
pub use envelope::Envelope;
pub use generator::{generate_password, DEFAULT_PASSWORD_LENGTH};
pub use key::{derive_key, DerivedKey, Passphrase, KEY_LENGTH, PBKDF2_ITERATIONS};

use crate::error::Result;

/// Encrypt `plaintext` and frame it as a transport string.
///
/// # Examples
///
/// ```
/// use lynx_core::crypto::{derive_key, open, seal, Passphrase};
///
/// let key = derive_key(&Passphrase::from("master")).unwrap();
/// let envelope = seal(&key, "hunter2").unwrap();
/// assert_eq!(open(&key, &envelope).unwrap(), "hunter2");
/// ```
pub fn seal(key: &DerivedKey, plaintext: &str) -> Result<String> {
    Ok(encrypt(key, plaintext)?.encode())
}

/// Parse a transport string and decrypt it.
pub fn open(key: &DerivedKey, envelope: &str) -> Result<String> {
    let parsed = Envelope::decode(envelope)?;
    decrypt(key, parsed.nonce(), parsed.ciphertext())
}

/// Derive a key from `passphrase` and seal `plaintext` in one call.
///
/// Pays the full derivation cost every time; prefer [`seal`] with a
/// cached key when handling more than one field.
pub fn seal_with_passphrase(passphrase: &Passphrase, plaintext: &str) -> Result<String> {
    seal(&derive_key(passphrase)?, plaintext)
}

/// Derive a key from `passphrase` and open `envelope` in one call.
pub fn open_with_passphrase(passphrase: &Passphrase, envelope: &str) -> Result<String> {
    open(&derive_key(passphrase)?, envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LynxError;

    #[test]
    fn test_seal_open_round_trip() {
        let key = derive_key(&Passphrase::from("round-trip")).unwrap();
        for message in ["", "a", "hunter2", "ünïcødé ✓ 密码"] {
            let envelope = seal(&key, message).unwrap();
            assert_eq!(open(&key, &envelope).unwrap(), message);
        }
    }

    #[test]
    fn test_multi_kilobyte_round_trip() {
        let key = derive_key(&Passphrase::from("round-trip")).unwrap();
        let message = "x".repeat(64 * 1024);
        let envelope = seal(&key, &message).unwrap();
        assert_eq!(open(&key, &envelope).unwrap(), message);
    }

    #[test]
    fn test_same_message_unlinkable() {
        let key = derive_key(&Passphrase::from("round-trip")).unwrap();
        let first = seal(&key, "same").unwrap();
        let second = seal(&key, "same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_passphrase_helpers_round_trip() {
        let passphrase = Passphrase::from("correct horse battery staple");
        let envelope = seal_with_passphrase(&passphrase, "hunter2").unwrap();
        assert_eq!(
            open_with_passphrase(&passphrase, &envelope).unwrap(),
            "hunter2"
        );
    }

    #[test]
    fn test_wrong_passphrase_fails_authentication() {
        let envelope = seal_with_passphrase(&Passphrase::from("alpha"), "secret").unwrap();
        let result = open_with_passphrase(&Passphrase::from("bravo"), &envelope);
        assert!(matches!(result, Err(LynxError::AuthenticationFailed)));
    }

    #[test]
    fn test_tampered_envelope_fails_authentication() {
        let key = derive_key(&Passphrase::from("tamper")).unwrap();
        let envelope = seal(&key, "secret").unwrap();
        let (nonce_hex, ciphertext_hex) = envelope.split_once('+').unwrap();

        // Flip the lowest bit of the first ciphertext byte.
        let mut bytes = super::hex::decode(ciphertext_hex).unwrap();
        bytes[0] ^= 0x01;
        let tampered = format!("{}+{}", nonce_hex, super::hex::encode(&bytes));

        assert!(matches!(
            open(&key, &tampered),
            Err(LynxError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_malformed_envelope_rejected_before_decrypt() {
        let key = derive_key(&Passphrase::from("malformed")).unwrap();
        assert!(matches!(
            open(&key, "not-an-envelope"),
            Err(LynxError::MalformedEnvelope(_))
        ));
    }
}
