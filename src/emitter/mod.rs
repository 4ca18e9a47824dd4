//! The deferred outcome emitter.
//!
//! An [`Emitter`] has two operations: [`succeed_after`](Emitter::succeed_after)
//! and [`fail_after`](Emitter::fail_after). Each returns a [`Deferred`] that
//! settles once its delay has elapsed. The [`EmitterConfig`] flags can swap
//! which kind of outcome is produced and replace the payload with
//! [`SUBSTITUTE_VALUE`].
//!
//! | `invert_outcome` | `succeed_after(v)` | `fail_after(v)` |
//! |------------------|--------------------|-----------------|
//! | `false`          | `Success(v')`      | `Failure(v')`   |
//! | `true`           | `Failure(v')`      | `Success(v')`   |
//!
//! where `v'` is `"Wrong Value"` when `substitute_value` is set and `v`
//! otherwise.
//!
//! # Example
//!
//! ```rust
//! use deferred_outcome::clock::ManualClock;
//! use deferred_outcome::{Emitter, EmitterConfig, Outcome};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let emitter = Emitter::with_timer(EmitterConfig::new(), clock.clone());
//!
//! let deferred = emitter.succeed_after("Hello", Duration::from_millis(50));
//! clock.advance(Duration::from_millis(50));
//!
//! let outcome = futures::executor::block_on(deferred);
//! assert_eq!(outcome, Outcome::Success("Hello".into()));
//! ```

use std::time::Duration;

mod config;
mod deferred;

pub use config::EmitterConfig;
pub use deferred::Deferred;

use crate::clock::{Timer, TokioTimer};
use crate::outcome::{Outcome, OutcomeKind};

/// Payload used instead of the caller's value when
/// [`EmitterConfig::substitute_value`] is set.
pub const SUBSTITUTE_VALUE: &str = "Wrong Value";

/// Delay used by [`Emitter::succeed`].
pub const DEFAULT_SUCCEED_DELAY: Duration = Duration::from_millis(500);

/// Delay used by [`Emitter::fail`].
pub const DEFAULT_FAIL_DELAY: Duration = Duration::from_millis(1500);

/// Produces deferred successes and failures.
///
/// The emitter holds nothing but its configuration and timer, so one
/// instance can serve any number of concurrent calls through `&self`.
#[derive(Debug, Clone)]
pub struct Emitter<C = TokioTimer> {
    config: EmitterConfig,
    timer: C,
}

impl Emitter {
    /// Create an emitter driven by real Tokio time.
    #[must_use]
    pub fn new(config: EmitterConfig) -> Self {
        Self::with_timer(config, TokioTimer::new())
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(EmitterConfig::default())
    }
}

impl<C: Timer> Emitter<C> {
    /// Create an emitter driven by `timer`.
    #[must_use]
    pub fn with_timer(config: EmitterConfig, timer: C) -> Self {
        Self { config, timer }
    }

    /// The configuration this emitter was built with.
    #[must_use]
    pub fn config(&self) -> EmitterConfig {
        self.config
    }

    /// The timer that schedules this emitter's calls.
    #[must_use]
    pub fn timer(&self) -> &C {
        &self.timer
    }

    /// Settle as a success with `value` after `delay`.
    ///
    /// Settles as a failure instead when `invert_outcome` is set.
    ///
    /// # Panics
    ///
    /// With [`TokioTimer`], panics if called outside a Tokio runtime.
    pub fn succeed_after(&self, value: impl Into<String>, delay: Duration) -> Deferred<C::Sleep> {
        self.schedule(OutcomeKind::Success, value.into(), delay)
    }

    /// Settle as a failure carrying `value` after `delay`.
    ///
    /// Settles as a success instead when `invert_outcome` is set.
    ///
    /// # Panics
    ///
    /// With [`TokioTimer`], panics if called outside a Tokio runtime.
    pub fn fail_after(&self, value: impl Into<String>, delay: Duration) -> Deferred<C::Sleep> {
        self.schedule(OutcomeKind::Failure, value.into(), delay)
    }

    /// [`succeed_after`](Self::succeed_after) with [`DEFAULT_SUCCEED_DELAY`].
    pub fn succeed(&self, value: impl Into<String>) -> Deferred<C::Sleep> {
        self.succeed_after(value, DEFAULT_SUCCEED_DELAY)
    }

    /// [`fail_after`](Self::fail_after) with [`DEFAULT_FAIL_DELAY`].
    pub fn fail(&self, value: impl Into<String>) -> Deferred<C::Sleep> {
        self.fail_after(value, DEFAULT_FAIL_DELAY)
    }

    fn schedule(
        &self,
        requested: OutcomeKind,
        value: String,
        delay: Duration,
    ) -> Deferred<C::Sleep> {
        let kind = if self.config.invert_outcome {
            requested.inverted()
        } else {
            requested
        };
        let payload = if self.config.substitute_value {
            SUBSTITUTE_VALUE.to_string()
        } else {
            value
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            requested = %requested,
            settles_as = %kind,
            substituted = self.config.substitute_value,
            delay_ms = delay.as_millis(),
            "Scheduled deferred outcome"
        );

        Deferred::new(self.timer.sleep(delay), Outcome::settle(kind, payload), delay)
    }
}
