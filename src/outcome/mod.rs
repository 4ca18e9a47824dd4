//! The settled result of a deferred call.

use std::fmt;

use crate::error::DeferredFailure;

/// Which way a deferred call settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// Settles with a value.
    Success,
    /// Settles with a [`DeferredFailure`].
    Failure,
}

impl OutcomeKind {
    /// The opposite kind.
    #[must_use]
    pub fn inverted(self) -> Self {
        match self {
            Self::Success => Self::Failure,
            Self::Failure => Self::Success,
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failure => f.write_str("failure"),
        }
    }
}

/// The result a [`Deferred`](crate::Deferred) resolves to.
///
/// # Example
///
/// ```rust
/// use deferred_outcome::{DeferredFailure, Outcome, OutcomeKind};
///
/// let outcome = Outcome::Failure(DeferredFailure::new("EpicFail"));
/// assert_eq!(outcome.kind(), OutcomeKind::Failure);
/// assert_eq!(outcome.payload(), "EpicFail");
/// assert!(outcome.into_result().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Settled with the effective value.
    Success(String),
    /// Settled with a failure wrapping the effective value.
    Failure(DeferredFailure),
}

impl Outcome {
    pub(crate) fn settle(kind: OutcomeKind, payload: String) -> Self {
        match kind {
            OutcomeKind::Success => Self::Success(payload),
            OutcomeKind::Failure => Self::Failure(DeferredFailure::new(payload)),
        }
    }

    /// The kind of this outcome.
    #[must_use]
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success(_) => OutcomeKind::Success,
            Self::Failure(_) => OutcomeKind::Failure,
        }
    }

    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for [`Outcome::Failure`].
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The effective value, whichever way the call settled.
    #[must_use]
    pub fn payload(&self) -> &str {
        match self {
            Self::Success(value) => value,
            Self::Failure(failure) => failure.payload(),
        }
    }

    /// Convert into a `Result`, the natural shape for `?` and `matches!`.
    ///
    /// # Errors
    ///
    /// Returns the [`DeferredFailure`] when the call settled as a failure.
    pub fn into_result(self) -> Result<String, DeferredFailure> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(failure) => Err(failure),
        }
    }

    /// The success value, if any.
    #[must_use]
    pub fn success(self) -> Option<String> {
        self.into_result().ok()
    }

    /// The failure, if any.
    #[must_use]
    pub fn failure(self) -> Option<DeferredFailure> {
        self.into_result().err()
    }
}

impl From<Outcome> for Result<String, DeferredFailure> {
    fn from(outcome: Outcome) -> Self {
        outcome.into_result()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind(), self.payload())
    }
}
