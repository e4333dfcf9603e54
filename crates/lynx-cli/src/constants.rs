//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// - 0: Success
/// - 1: General error (unhandled `anyhow` errors)
/// - 2: Usage error (reserved by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Config or input file not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Token rejected, gate locked or misconfigured.
    pub const AUTH_FAILED: i32 = 5;

    /// Envelope could not be decrypted.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Environment variables read by the CLI.
pub mod env_vars {
    pub const CONFIG: &str = "LYNX_CONFIG";
    pub const PASSPHRASE: &str = "LYNX_PASSPHRASE";
    pub const TOKEN: &str = "LYNX_TOKEN";
    pub const ITEM_PASSWORD: &str = "LYNX_ITEM_PASSWORD";
}

/// Generic message for every decryption failure.
pub const DECRYPT_FAILED_MESSAGE: &str = "Failed to decrypt.";
