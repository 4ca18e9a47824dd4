//! Emitter configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Flags that bend what an [`Emitter`](crate::Emitter) produces.
///
/// Both flags default to `false` and are independent: `invert_outcome` only
/// ever changes the kind of outcome, `substitute_value` only ever changes the
/// payload.
///
/// # Example
///
/// ```rust
/// use deferred_outcome::EmitterConfig;
///
/// let config = EmitterConfig::new().invert_outcome();
/// assert!(config.invert_outcome);
/// assert!(!config.substitute_value);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct EmitterConfig {
    /// Swap success and failure.
    #[serde(alias = "reverseLogic")]
    pub invert_outcome: bool,
    /// Settle with [`SUBSTITUTE_VALUE`](crate::SUBSTITUTE_VALUE) instead of
    /// the caller's value.
    #[serde(alias = "wrongData")]
    pub substitute_value: bool,
}

impl EmitterConfig {
    /// Create a configuration with both flags off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn inversion on.
    #[must_use]
    pub fn invert_outcome(self) -> Self {
        self.with_invert_outcome(true)
    }

    /// Turn substitution on.
    #[must_use]
    pub fn substitute_value(self) -> Self {
        self.with_substitute_value(true)
    }

    /// Set inversion explicitly.
    #[must_use]
    pub fn with_invert_outcome(mut self, invert: bool) -> Self {
        self.invert_outcome = invert;
        self
    }

    /// Set substitution explicitly.
    #[must_use]
    pub fn with_substitute_value(mut self, substitute: bool) -> Self {
        self.substitute_value = substitute;
        self
    }

    /// Parse a JSON options object.
    ///
    /// Missing flags default to `false`. Unknown keys are rejected. The
    /// older names `reverseLogic` and `wrongData` are accepted too.
    ///
    /// ```rust
    /// use deferred_outcome::EmitterConfig;
    ///
    /// let config = EmitterConfig::from_json(r#"{ "wrongData": true }"#).unwrap();
    /// assert_eq!(config, EmitterConfig::new().substitute_value());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) for
    /// malformed JSON, unknown keys, or non-boolean flags.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
