//! # Lynx Core
//!
//! Core library for Lynx - a zero-knowledge password vault client.
//!
//! Everything secret is encrypted on the client before it reaches storage.
//! This crate holds the cryptographic core and the client side of the
//! storage and authentication boundaries, independent of any interface.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation, AES-256-GCM, envelope framing, digests
//! - **item**: plaintext and sealed vault items
//! - **auth**: bearer-token gate with injected failed-attempt storage
//! - **fs**: atomic file replacement

pub mod auth;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod item;

pub use auth::{AttemptRecord, AttemptStore, AuthDecision, TokenGate};
pub use crypto::{derive_key, DerivedKey, Digest, Envelope, Passphrase};
pub use error::{LynxError, Result};
pub use item::{SealedItem, SecretItem};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
