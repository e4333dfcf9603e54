//! Input helpers for the CLI.

mod input;

pub use input::{prompt_passphrase, prompt_secret, read_input, read_json_input};
