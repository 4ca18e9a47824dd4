//! `ManualClock` implementation for virtual time control.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use super::sleep::{ManualSleep, SleepQueue};
use super::Timer;

/// A virtual clock whose time only moves when the test moves it.
///
/// Handing a `ManualClock` to an [`Emitter`](crate::Emitter) lets a test
/// settle a 1500 ms failure instantly, and check that it is still pending
/// one millisecond before its deadline.
///
/// # Thread Safety
///
/// Clones share the same time and sleep registry, so a clone can be moved
/// into a spawned task while the test keeps advancing the original.
///
/// # Example
///
/// ```rust
/// use deferred_outcome::clock::ManualClock;
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let clock2 = clock.clone();
///
/// clock.advance(Duration::from_millis(500));
/// assert_eq!(clock2.now(), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    pub(crate) inner: Arc<Mutex<ClockState>>,
}

#[derive(Debug)]
pub(crate) struct ClockState {
    /// Current virtual time
    pub(crate) now: Duration,
    pub(crate) sleeps: SleepQueue,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Creates a clock starting at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::with_start_time(Duration::ZERO)
    }

    /// Creates a clock starting at `start`.
    ///
    /// ```rust
    /// use deferred_outcome::clock::ManualClock;
    /// use std::time::Duration;
    ///
    /// let clock = ManualClock::with_start_time(Duration::from_secs(100));
    /// assert_eq!(clock.now(), Duration::from_secs(100));
    /// ```
    #[must_use]
    pub fn with_start_time(start: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ClockState {
                now: start,
                sleeps: SleepQueue::default(),
            })),
        }
    }

    /// Returns the current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.lock().now
    }

    /// Moves time forward by `duration`, waking every sleep it passes.
    ///
    /// Time saturates at `Duration::MAX`.
    ///
    /// ```rust
    /// use deferred_outcome::clock::ManualClock;
    /// use std::time::Duration;
    ///
    /// let clock = ManualClock::new();
    /// clock.advance(Duration::from_millis(10));
    /// clock.advance(Duration::from_millis(5));
    /// assert_eq!(clock.now(), Duration::from_millis(15));
    /// ```
    pub fn advance(&self, duration: Duration) {
        let expired = {
            let mut state = self.inner.lock();
            state.now = state.now.saturating_add(duration);
            let now = state.now;
            state.sleeps.take_expired(now)
        };
        // Woken outside the lock so a waker that polls inline can't deadlock.
        for waker in expired {
            waker.wake();
        }
    }

    /// Moves time forward to `time`. Earlier times are a no-op.
    ///
    /// ```rust
    /// use deferred_outcome::clock::ManualClock;
    /// use std::time::Duration;
    ///
    /// let clock = ManualClock::new();
    /// clock.advance_to(Duration::from_secs(10));
    /// clock.advance_to(Duration::from_secs(5));
    /// assert_eq!(clock.now(), Duration::from_secs(10));
    /// ```
    pub fn advance_to(&self, time: Duration) {
        let now = self.now();
        if time > now {
            self.advance(time - now);
        }
    }

    /// Jumps to the earliest deadline among registered sleeps.
    ///
    /// Returns that deadline, or `None` if nothing is waiting. Only sleeps
    /// that have been polled at least once are registered.
    pub fn advance_to_next_deadline(&self) -> Option<Duration> {
        let deadline = self.inner.lock().sleeps.next_deadline()?;
        self.advance_to(deadline);
        Some(deadline)
    }

    /// Creates a sleep that completes once this clock reaches `now + duration`.
    #[must_use]
    pub fn sleep(&self, duration: Duration) -> ManualSleep {
        ManualSleep::new(self.clone(), duration)
    }

    /// Number of registered sleeps that have not fired yet.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.lock().sleeps.pending_count()
    }
}

impl Timer for ManualClock {
    type Sleep = ManualSleep;

    fn now(&self) -> Duration {
        ManualClock::now(self)
    }

    fn sleep(&self, duration: Duration) -> ManualSleep {
        ManualClock::sleep(self, duration)
    }
}
