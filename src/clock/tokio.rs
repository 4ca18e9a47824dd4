//! Real-time timer backed by `tokio::time`.
//!
//! Under `#[tokio::test(start_paused = true)]` Tokio auto-advances its clock
//! whenever the runtime is idle, so even the default 1500 ms failure delay
//! settles without a real wait.

use std::time::Duration;

use ::tokio::time::{Instant, Sleep};

use super::Timer;

/// Tokio-based timer.
///
/// # Panics
///
/// [`Timer::sleep`] panics when called outside a Tokio runtime, the same as
/// `tokio::time::sleep`.
#[derive(Debug, Clone, Copy)]
pub struct TokioTimer {
    start: Instant,
}

impl TokioTimer {
    /// Create a timer whose [`now`](Timer::now) starts counting from here.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for TokioTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for TokioTimer {
    type Sleep = Sleep;

    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&self, duration: Duration) -> Sleep {
        ::tokio::time::sleep(duration)
    }
}
