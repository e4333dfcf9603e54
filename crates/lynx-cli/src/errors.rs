//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes so scripts can tell a missing
//! config from a rejected token or an undecryptable envelope.

use std::fmt;

use lynx_core::LynxError;

use crate::constants::{exit_codes, DECRYPT_FAILED_MESSAGE};

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, input file)
    NotFound { message: String, hint: String },

    /// Token rejected, gate locked or misconfigured
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Envelope failed to decrypt
    IntegrityFailed,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::IntegrityFailed => write!(f, "{}", DECRYPT_FAILED_MESSAGE),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and optional hint.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed => exit_codes::INTEGRITY_FAILED,
        }
    }
}

/// Convert a core error into the error shown to users.
///
/// Every decryption failure collapses into one generic message. Errors
/// without a user-facing category stay as plain `anyhow` errors.
pub fn from_core(err: LynxError) -> anyhow::Error {
    match err {
        LynxError::AuthenticationFailed | LynxError::DecodingFailed => {
            CliError::IntegrityFailed.into()
        }
        LynxError::MalformedEnvelope(reason) => {
            CliError::invalid_input(format!("Malformed envelope: {}", reason)).into()
        }
        LynxError::InvalidInput(message) => CliError::invalid_input(message).into(),
        other => anyhow::Error::new(other),
    }
}

/// Exit code for an error returned from a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>()
        .map(CliError::exit_code)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrypt_failures_are_generic() {
        let auth = from_core(LynxError::AuthenticationFailed);
        let decode = from_core(LynxError::DecodingFailed);
        assert_eq!(auth.to_string(), DECRYPT_FAILED_MESSAGE);
        assert_eq!(decode.to_string(), DECRYPT_FAILED_MESSAGE);
        assert_eq!(exit_code_for(&auth), exit_codes::INTEGRITY_FAILED);
    }

    #[test]
    fn test_malformed_envelope_is_invalid_input() {
        let err = from_core(LynxError::MalformedEnvelope("missing delimiter".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_INPUT);
        assert!(err.to_string().contains("missing delimiter"));
    }

    #[test]
    fn test_other_errors_exit_one() {
        let err = from_core(LynxError::AttemptStore("disk full".to_string()));
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CliError::not_found("missing", "hint").exit_code(),
            exit_codes::NOT_FOUND
        );
        assert_eq!(
            CliError::auth_failed("nope").exit_code(),
            exit_codes::AUTH_FAILED
        );
    }
}
