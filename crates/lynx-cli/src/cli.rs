use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use lynx_core::VERSION;

/// Lynx - zero-knowledge password vault client
#[derive(Parser)]
#[command(name = "lynx")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// API token; only its digest is written to the config
    #[arg(long)]
    pub token: Option<String>,

    /// Failed attempts allowed before the gate locks
    #[arg(long, value_name = "N")]
    pub max_failed_attempts: Option<u32>,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `encrypt` command
#[derive(Args)]
pub struct EncryptArgs {
    /// Text to encrypt (reads stdin when omitted)
    #[arg(long)]
    pub text: Option<String>,
}

/// Arguments for the `decrypt` command
#[derive(Args)]
pub struct DecryptArgs {
    /// Envelope to decrypt (reads stdin when omitted)
    #[arg(value_name = "ENVELOPE")]
    pub envelope: Option<String>,
}

/// Arguments for the `digest` command
#[derive(Args)]
pub struct DigestArgs {
    /// Text to hash (reads stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,
}

/// Arguments for the `generate` command
#[derive(Args)]
pub struct GenerateArgs {
    /// Password length (defaults to config, then 16)
    #[arg(long)]
    pub length: Option<usize>,
}

/// Arguments for the `seal` command
#[derive(Args)]
pub struct SealArgs {
    /// Plaintext description (stored unencrypted)
    #[arg(long)]
    pub description: String,

    /// Username (encrypted when given)
    #[arg(long)]
    pub username: Option<String>,

    /// Password (prompted when neither this nor --generate is given)
    #[arg(long, conflicts_with = "generate")]
    pub password: Option<String>,

    /// Generate a random password
    #[arg(long)]
    pub generate: bool,
}

/// Arguments for the `open` command
#[derive(Args)]
pub struct OpenArgs {
    /// File with one sealed item or an array (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `auth` command
#[derive(Args)]
pub struct AuthArgs {
    /// Token to check (prompted when omitted)
    #[arg(value_name = "TOKEN")]
    pub token: Option<String>,

    /// Clear the failed-attempt counter instead of checking
    #[arg(long)]
    pub reset: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file
    Init(InitArgs),

    /// Encrypt text into an envelope
    Encrypt(EncryptArgs),

    /// Decrypt an envelope
    Decrypt(DecryptArgs),

    /// SHA-256 hex digest of text
    Digest(DigestArgs),

    /// Generate a random password
    Generate(GenerateArgs),

    /// Encrypt a vault item into storable JSON
    Seal(SealArgs),

    /// Decrypt sealed vault items
    Open(OpenArgs),

    /// Check an API token against the configured digest
    Auth(AuthArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
