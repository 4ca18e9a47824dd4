//! The future returned by every emitter call.

use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::time::Duration;

use crate::outcome::{Outcome, OutcomeKind};

/// A call that settles into an [`Outcome`] once its delay has elapsed.
///
/// The timer sleep is created when the call is made, so the deadline does not
/// depend on when the future is first polled. A `Deferred` settles exactly
/// once; polling it again afterwards panics.
#[pin_project]
#[derive(Debug)]
#[must_use = "a deferred outcome does nothing unless awaited"]
pub struct Deferred<S> {
    #[pin]
    sleep: S,
    outcome: Option<Outcome>,
    delay: Duration,
}

impl<S> Deferred<S> {
    pub(crate) fn new(sleep: S, outcome: Outcome, delay: Duration) -> Self {
        Self {
            sleep,
            outcome: Some(outcome),
            delay,
        }
    }

    /// The delay this call was made with.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The kind of outcome this call will settle with, or `None` once it has.
    #[must_use]
    pub fn settles_as(&self) -> Option<OutcomeKind> {
        self.outcome.as_ref().map(Outcome::kind)
    }
}

impl<S: Future<Output = ()>> Future for Deferred<S> {
    type Output = Outcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        ready!(this.sleep.poll(cx));

        let outcome = this
            .outcome
            .take()
            .expect("`Deferred` polled after completion");

        #[cfg(feature = "tracing")]
        tracing::trace!(
            outcome = %outcome.kind(),
            payload = outcome.payload(),
            delay_ms = this.delay.as_millis(),
            "Deferred outcome settled"
        );

        Poll::Ready(outcome)
    }
}
