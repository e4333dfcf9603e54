//! Input handling helpers for passphrases, secrets and piped text.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use dialoguer::Password;
use zeroize::Zeroizing;

use lynx_core::Passphrase;

use crate::constants::env_vars;
use crate::errors::CliError;

/// Prompt for the master passphrase, or read it from `LYNX_PASSPHRASE`.
pub fn prompt_passphrase(interactive: bool) -> anyhow::Result<Passphrase> {
    let value = prompt_secret("Master passphrase", env_vars::PASSPHRASE, interactive)?;
    if value.is_empty() {
        return Err(CliError::invalid_input("Passphrase cannot be empty").into());
    }
    Ok(Passphrase::new(value.as_str()))
}

/// Read a secret from `env_var`, falling back to a hidden prompt.
pub fn prompt_secret(
    prompt: &str,
    env_var: &str,
    interactive: bool,
) -> anyhow::Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var(env_var) {
        if !value.is_empty() {
            return Ok(Zeroizing::new(value));
        }
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No {} provided and no TTY available. Set {}.",
            prompt.to_lowercase(),
            env_var
        ))
        .into());
    }
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", prompt.to_lowercase(), e))
}

/// Use `value` when given, otherwise read piped stdin.
///
/// One trailing newline is dropped from stdin so `echo text | lynx ...`
/// behaves like passing the argument.
pub fn read_input(value: Option<String>, what: &str) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = value {
        return Ok(Zeroizing::new(value));
    }

    if io::stdin().is_terminal() {
        return Err(CliError::invalid_input(format!(
            "No {} provided. Pass it as an argument or pipe it via stdin.",
            what
        ))
        .into());
    }

    let mut buffer = Zeroizing::new(String::new());
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    strip_trailing_newline(&mut buffer);
    Ok(buffer)
}

/// Read JSON text from `path`, or from stdin when no path is given.
pub fn read_json_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::not_found(
                    format!("File not found: {}", path.display()),
                    "Hint: Pass the JSON produced by `lynx seal`.",
                )
                .into());
            }
            std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
        }
        None => Ok(read_input(None, "sealed item JSON")?.to_string()),
    }
}

fn strip_trailing_newline(buffer: &mut String) {
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
}
