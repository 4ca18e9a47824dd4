//! Timers that decide when a deferred outcome settles.
//!
//! The emitter never touches wall-clock time directly. It asks a [`Timer`]
//! for a sleep future and settles once that sleep completes, so tests can
//! pick between:
//!
//! - [`TokioTimer`] - real `tokio::time` sleeps (fast-forwarded under
//!   `#[tokio::test(start_paused = true)]`)
//! - [`ManualClock`] - virtual time that only moves when the test calls
//!   [`ManualClock::advance`]
//!
//! # Example
//!
//! ```rust
//! use deferred_outcome::clock::{ManualClock, Timer};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let sleep = Timer::sleep(&clock, Duration::from_millis(50));
//!
//! clock.advance(Duration::from_millis(50));
//! assert!(sleep.is_elapsed());
//! ```

use std::future::Future;
use std::time::Duration;

mod manual_clock;
mod sleep;
mod tokio;

pub use manual_clock::ManualClock;
pub use sleep::ManualSleep;
pub use self::tokio::TokioTimer;

/// A source of sleeps for deferred outcomes.
///
/// The sleep's deadline is fixed when [`sleep`](Timer::sleep) is called, not
/// when the returned future is first polled.
pub trait Timer: Send + Sync {
    /// Future returned by [`sleep`](Timer::sleep).
    type Sleep: Future<Output = ()> + Send + 'static;

    /// Time elapsed on this timer's clock.
    fn now(&self) -> Duration;

    /// Create a future that completes once `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> Self::Sleep;
}
