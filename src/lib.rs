//! # deferred-outcome
//!
//! > Deferred successes and failures for practicing async test assertions
//!
//! An [`Emitter`] produces futures that settle into an [`Outcome`] after a
//! delay. Two [`EmitterConfig`] flags make it misbehave on purpose:
//! `invert_outcome` swaps success and failure, `substitute_value` replaces
//! the payload with `"Wrong Value"`. Tests written against it show quickly
//! whether their async assertions actually check what they claim to.
//!
//! ## Quick Start
//!
//! ```rust
//! use deferred_outcome::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let emitter = Emitter::new(EmitterConfig::new().invert_outcome());
//!
//! // Asked to succeed, settles as a failure.
//! let outcome = emitter.succeed_after("Hello", Duration::from_millis(50)).await;
//! assert_eq!(outcome, Outcome::Failure(DeferredFailure::new("Hello")));
//! # }
//! ```
//!
//! ## Features
//!
//! - **Emitter** - `succeed_after` / `fail_after` with configurable delays
//! - **Timers** - real Tokio time or a [`ManualClock`](clock::ManualClock)
//! - **Assertions** - direct await, fluent "eventually", completion callbacks
//! - **Test macro** - `#[deferred_outcome::test]` builds the emitter for you

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod clock;
pub mod emitter;
pub mod error;
pub mod outcome;

/// Prelude for convenient imports
///
/// ```rust
/// use deferred_outcome::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assertions::matcher::{anything, contains, eq, not, Matcher};
    pub use crate::assertions::{expect_outcome, NotifyExt};
    pub use crate::clock::{ManualClock, Timer, TokioTimer};
    pub use crate::emitter::{
        Deferred, Emitter, EmitterConfig, DEFAULT_FAIL_DELAY, DEFAULT_SUCCEED_DELAY,
        SUBSTITUTE_VALUE,
    };
    pub use crate::error::{DeferredFailure, Error, Result};
    pub use crate::outcome::{Outcome, OutcomeKind};
    pub use std::time::Duration;
}

// Re-exports
pub use emitter::{
    Deferred, Emitter, EmitterConfig, DEFAULT_FAIL_DELAY, DEFAULT_SUCCEED_DELAY, SUBSTITUTE_VALUE,
};
pub use error::{DeferredFailure, Error, Result};
pub use outcome::{Outcome, OutcomeKind};

// Re-export the test macro when macros feature is enabled
#[cfg(feature = "macros")]
pub use deferred_outcome_macros::test;
