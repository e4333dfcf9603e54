//! Single-value commands: encrypt, decrypt, digest, generate.
//!
//! Results go to stdout bare so they can be piped; status goes to stderr.

use lynx_core::crypto::{decrypt, digest, generate_password, seal, Envelope};

use crate::app::AppContext;
use crate::cli::{DecryptArgs, DigestArgs, EncryptArgs, GenerateArgs};
use crate::errors::from_core;
use crate::helpers::read_input;

pub fn handle_encrypt(ctx: &AppContext, args: &EncryptArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);
    let text = read_input(args.text.clone(), "text")?;
    let key = ctx.derive_key(&ui)?;

    let envelope = seal(&key, &text).map_err(from_core)?;
    println!("{}", envelope);
    Ok(())
}

pub fn handle_decrypt(ctx: &AppContext, args: &DecryptArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);
    let input = read_input(args.envelope.clone(), "envelope")?;

    // Reject bad framing before asking for the passphrase.
    let envelope = Envelope::decode(input.trim()).map_err(from_core)?;
    let key = ctx.derive_key(&ui)?;

    let plaintext = zeroize::Zeroizing::new(
        decrypt(&key, envelope.nonce(), envelope.ciphertext()).map_err(from_core)?,
    );
    println!("{}", plaintext.as_str());
    Ok(())
}

pub fn handle_digest(args: &DigestArgs) -> anyhow::Result<()> {
    let text = read_input(args.text.clone(), "text")?;
    println!("{}", digest(&text));
    Ok(())
}

pub fn handle_generate(ctx: &AppContext, args: &GenerateArgs) -> anyhow::Result<()> {
    let length = match args.length {
        Some(length) => length,
        None => ctx.config()?.generator.length,
    };
    let password = generate_password(length).map_err(from_core)?;
    println!("{}", password.as_str());
    Ok(())
}
