//! Random password generation for new items.

use rand::rngs::OsRng;
use rand::Rng;
use zeroize::Zeroizing;

use crate::error::{LynxError, Result};

/// Default generated password length.
pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!-_?";

/// Generate a random password of `length` characters.
///
/// The first character is always an uppercase letter; the rest are drawn
/// from lowercase, uppercase, digits and `!-_?`.
pub fn generate_password(length: usize) -> Result<Zeroizing<String>> {
    if length == 0 {
        return Err(LynxError::InvalidInput(
            "Password length must be at least 1".to_string(),
        ));
    }

    let mut rng = OsRng;
    let mut password = Zeroizing::new(String::with_capacity(length));
    password.push(UPPERCASE[rng.gen_range(0..UPPERCASE.len())] as char);
    for _ in 1..length {
        password.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
    }

    Ok(password)
}
