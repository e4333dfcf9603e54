//! Bearer-token gate for the item API.
//!
//! Clients send `Authorization: Bearer <sha256(token)>`; the raw token is
//! never transmitted. The gate compares the presented digest with the
//! configured one and counts failures in an injected [`AttemptStore`].
//! Once an instance reaches `max_failed_attempts` it stays locked until
//! the counter is reset out of band.
//!
//! The gate shares no key material with the encryption path.

pub mod store;

pub use store::{AttemptRecord, AttemptStore, FileAttemptStore, MemoryAttemptStore};

use crate::crypto::{digest, Digest};
use crate::error::Result;

/// Default failure budget per instance before the gate locks.
pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 20;

/// Default instance key for single-deployment setups.
pub const DEFAULT_INSTANCE: &str = "default";

const BEARER_PREFIX: &str = "Bearer ";

/// Outcome of one gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    /// Token matched; failure counter cleared.
    Authorized,
    /// Token missing or wrong.
    Unauthorized,
    /// Too many failures for this instance.
    Locked,
    /// No expected token digest is configured.
    Misconfigured,
}

impl AuthDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// Build the `Authorization` header value for a raw token.
pub fn bearer_header(token: &str) -> String {
    format!("{}{}", BEARER_PREFIX, digest(token))
}

/// Request-scoped authentication gate.
pub struct TokenGate<S: AttemptStore> {
    expected: Option<Digest>,
    max_failed_attempts: u32,
    instance: String,
    store: S,
}

impl<S: AttemptStore> TokenGate<S> {
    pub fn new(expected: Option<Digest>, store: S) -> Self {
        Self {
            expected,
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            instance: DEFAULT_INSTANCE.to_string(),
            store,
        }
    }

    pub fn with_max_failed_attempts(mut self, max: u32) -> Self {
        self.max_failed_attempts = max;
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = instance.into();
        self
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check an `Authorization` header value.
    ///
    /// Order of checks:
    /// 1. a locked instance is refused without touching the counter
    /// 2. a missing expected digest counts as a failure
    /// 3. a missing or mismatched bearer digest counts as a failure
    /// 4. a match clears the counter
    ///
    /// The lock decision and the counter update happen in one store call,
    /// so concurrent checks never push an instance past its limit.
    ///
    /// # Errors
    ///
    /// Only fails if the attempt store fails.
    pub fn check(&self, authorization: Option<&str>) -> Result<AuthDecision> {
        let matched = match self.expected.as_ref() {
            None => None,
            Some(expected) => {
                let presented = authorization
                    .and_then(|value| value.strip_prefix(BEARER_PREFIX))
                    .map(str::trim)
                    .and_then(|value| value.parse::<Digest>().ok());
                Some(presented.as_ref() == Some(expected))
            }
        };

        let record = self.store.apply(
            &self.instance,
            self.max_failed_attempts,
            matched == Some(true),
        )?;

        let decision = match (record, matched) {
            (AttemptRecord::Locked(failures), _) => {
                tracing::warn!(instance = %self.instance, failures, "gate locked");
                AuthDecision::Locked
            }
            (AttemptRecord::Failed(failures), None) => {
                tracing::error!(instance = %self.instance, failures, "expected token digest missing");
                AuthDecision::Misconfigured
            }
            (AttemptRecord::Failed(failures), Some(_)) => {
                tracing::warn!(instance = %self.instance, failures, "token rejected");
                AuthDecision::Unauthorized
            }
            (AttemptRecord::Cleared, _) => {
                tracing::debug!(instance = %self.instance, "token accepted");
                AuthDecision::Authorized
            }
        };
        Ok(decision)
    }

    /// Digest a raw token and check it.
    pub fn check_token(&self, token: &str) -> Result<AuthDecision> {
        self.check(Some(&bearer_header(token)))
    }
}
