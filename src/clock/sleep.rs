//! Virtual sleeps driven by [`ManualClock`].

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use super::ManualClock;

/// Registry of sleeps waiting on a [`ManualClock`].
///
/// The heap can hold entries for sleeps that already completed or were
/// dropped; only ids still present in `wakers` are live.
#[derive(Debug, Default)]
pub(crate) struct SleepQueue {
    deadlines: BinaryHeap<Reverse<(Duration, u64)>>,
    wakers: HashMap<u64, Waker>,
    next_id: u64,
}

impl SleepQueue {
    /// Register a sleep and return its id.
    pub(crate) fn register(&mut self, deadline: Duration, waker: &Waker) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.deadlines.push(Reverse((deadline, id)));
        self.wakers.insert(id, waker.clone());
        id
    }

    pub(crate) fn update_waker(&mut self, id: u64, waker: &Waker) {
        if let Some(current) = self.wakers.get_mut(&id) {
            if !current.will_wake(waker) {
                current.clone_from(waker);
            }
        }
    }

    pub(crate) fn remove(&mut self, id: u64) {
        self.wakers.remove(&id);
    }

    /// Take the wakers of every live sleep whose deadline is at or before `now`.
    pub(crate) fn take_expired(&mut self, now: Duration) -> Vec<Waker> {
        let mut expired = Vec::new();
        while let Some(Reverse((deadline, id))) = self.deadlines.peek().copied() {
            if deadline > now {
                break;
            }
            self.deadlines.pop();
            if let Some(waker) = self.wakers.remove(&id) {
                expired.push(waker);
            }
        }
        expired
    }

    /// Earliest deadline among live sleeps.
    pub(crate) fn next_deadline(&mut self) -> Option<Duration> {
        while let Some(Reverse((deadline, id))) = self.deadlines.peek().copied() {
            if self.wakers.contains_key(&id) {
                return Some(deadline);
            }
            self.deadlines.pop();
        }
        None
    }

    pub(crate) fn pending_count(&self) -> usize {
        self.wakers.len()
    }
}

/// A future that completes when a [`ManualClock`] reaches its deadline.
///
/// Created by [`ManualClock::sleep`]. The sleep is registered with the clock
/// on first poll and deregistered when it completes or is dropped.
#[derive(Debug)]
#[must_use = "sleeps do nothing unless polled"]
pub struct ManualSleep {
    clock: ManualClock,
    deadline: Duration,
    id: Option<u64>,
}

impl ManualSleep {
    pub(crate) fn new(clock: ManualClock, duration: Duration) -> Self {
        let deadline = clock.now().saturating_add(duration);
        Self {
            clock,
            deadline,
            id: None,
        }
    }

    /// The virtual time at which this sleep completes.
    #[must_use]
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Time left until the deadline, or `Duration::ZERO` once it has passed.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_sub(self.clock.now())
    }

    /// Returns `true` once the clock has reached the deadline.
    #[must_use]
    pub fn is_elapsed(&self) -> bool {
        self.clock.now() >= self.deadline
    }
}

impl Future for ManualSleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        let mut state = this.clock.inner.lock();

        if state.now >= this.deadline {
            if let Some(id) = this.id.take() {
                state.sleeps.remove(id);
            }
            return Poll::Ready(());
        }

        match this.id {
            Some(id) => state.sleeps.update_waker(id, cx.waker()),
            None => this.id = Some(state.sleeps.register(this.deadline, cx.waker())),
        }
        Poll::Pending
    }
}

impl Drop for ManualSleep {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.clock.inner.lock().sleeps.remove(id);
        }
    }
}
