//! Error definitions
//!
//! [`DeferredFailure`] is the designed failure outcome of a deferred call.
//! [`Error`] covers everything else the crate can report: failed fluent
//! assertions and unparseable configuration.

use thiserror::Error;

/// The failure carried by [`Outcome::Failure`](crate::Outcome::Failure).
///
/// Its message is exactly the effective value of the call that produced it,
/// so `"EpicFail"` fails with the message `EpicFail` (or `Wrong Value` when
/// substitution is on).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{payload}")]
pub struct DeferredFailure {
    payload: String,
}

impl DeferredFailure {
    /// Create a failure carrying `payload`.
    #[must_use]
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// The effective value this failure was settled with.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Consume the failure and return its payload.
    #[must_use]
    pub fn into_payload(self) -> String {
        self.payload
    }
}

impl AsRef<str> for DeferredFailure {
    fn as_ref(&self) -> &str {
        &self.payload
    }
}

/// Main error type for deferred-outcome
#[derive(Error, Debug)]
pub enum Error {
    /// A fluent outcome assertion did not hold
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// Emitter configuration could not be parsed
    #[error("Invalid emitter configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

impl Error {
    /// Create an assertion failure error.
    #[must_use]
    pub fn assertion_failed(message: impl Into<String>) -> Self {
        Self::AssertionFailed(message.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
