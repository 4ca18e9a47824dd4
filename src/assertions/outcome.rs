//! Fluent "eventually" assertions and completion callbacks.

use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use super::matcher::Matcher;
use crate::error::{DeferredFailure, Error, Result};
use crate::outcome::Outcome;

/// Start a fluent assertion on a future that settles into an [`Outcome`].
///
/// The terminal checks are async and return `Ok` with the settled payload
/// when the expectation holds, or [`Error::AssertionFailed`] otherwise.
///
/// # Example
///
/// ```rust
/// use deferred_outcome::assertions::expect_outcome;
/// use deferred_outcome::{Emitter, EmitterConfig};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> deferred_outcome::Result<()> {
/// let emitter = Emitter::new(EmitterConfig::new());
/// let value = expect_outcome(emitter.succeed_after("Hello", Duration::from_millis(5)))
///     .becomes("Hello")
///     .await?;
/// assert_eq!(value, "Hello");
/// # Ok(())
/// # }
/// ```
pub fn expect_outcome<F>(future: F) -> OutcomeAssertion<F>
where
    F: Future<Output = Outcome>,
{
    OutcomeAssertion {
        future,
        description: None,
    }
}

/// A pending expectation on a deferred outcome.
///
/// Created by [`expect_outcome`].
#[derive(Debug)]
#[must_use = "assertions do nothing unless a terminal check is awaited"]
pub struct OutcomeAssertion<F> {
    future: F,
    description: Option<String>,
}

impl<F> OutcomeAssertion<F>
where
    F: Future<Output = Outcome>,
{
    /// Attach a message reported alongside any assertion failure.
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Expect a success with any value.
    ///
    /// # Errors
    ///
    /// Fails if the outcome is a failure.
    pub async fn is_fulfilled(self) -> Result<String> {
        let description = self.description;
        match self.future.await {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failed(
                format!("expected success, but failed with {:?}", failure.payload()),
                description,
            )),
        }
    }

    /// Expect a success with exactly `expected`.
    ///
    /// # Errors
    ///
    /// Fails if the outcome is a failure or carries another value.
    pub async fn becomes(self, expected: impl Into<String>) -> Result<String> {
        let expected = expected.into();
        let description = self.description;
        match self.future.await {
            Outcome::Success(value) if value == expected => Ok(value),
            Outcome::Success(value) => Err(failed(
                format!("expected success with {expected:?}, but succeeded with {value:?}"),
                description,
            )),
            Outcome::Failure(failure) => Err(failed(
                format!(
                    "expected success with {expected:?}, but failed with {:?}",
                    failure.payload()
                ),
                description,
            )),
        }
    }

    /// Expect a success with any value other than `unexpected`.
    ///
    /// # Errors
    ///
    /// Fails if the outcome is a failure or carries `unexpected`.
    pub async fn does_not_become(self, unexpected: impl Into<String>) -> Result<String> {
        let unexpected = unexpected.into();
        let description = self.description;
        match self.future.await {
            Outcome::Success(value) if value != unexpected => Ok(value),
            Outcome::Success(value) => Err(failed(
                format!("expected success with anything but {unexpected:?}, got {value:?}"),
                description,
            )),
            Outcome::Failure(failure) => Err(failed(
                format!(
                    "expected success with anything but {unexpected:?}, but failed with {:?}",
                    failure.payload()
                ),
                description,
            )),
        }
    }

    /// Expect a failure, whatever its payload.
    ///
    /// # Errors
    ///
    /// Fails if the outcome is a success.
    pub async fn is_rejected(self) -> Result<DeferredFailure> {
        let description = self.description;
        match self.future.await {
            Outcome::Failure(failure) => Ok(failure),
            Outcome::Success(value) => Err(failed(
                format!("expected failure, but succeeded with {value:?}"),
                description,
            )),
        }
    }

    /// Expect a failure whose payload satisfies `matcher`.
    ///
    /// # Errors
    ///
    /// Fails if the outcome is a success or the payload doesn't match.
    pub async fn is_rejected_with<M: Matcher>(self, matcher: M) -> Result<DeferredFailure> {
        let description = self.description;
        match self.future.await {
            Outcome::Failure(failure) if matcher.matches(failure.payload()) => Ok(failure),
            Outcome::Failure(failure) => Err(failed(
                format!(
                    "expected failure that {}, but {}",
                    matcher.describe(),
                    matcher.describe_mismatch(failure.payload())
                ),
                description,
            )),
            Outcome::Success(value) => Err(failed(
                format!(
                    "expected failure that {}, but succeeded with {value:?}",
                    matcher.describe()
                ),
                description,
            )),
        }
    }
}

fn failed(message: String, description: Option<String>) -> Error {
    match description {
        Some(description) => Error::AssertionFailed(format!("{message}: {description}")),
        None => Error::AssertionFailed(message),
    }
}

/// Report the result of an assertion future to a completion callback.
///
/// This is the callback style of async testing: instead of awaiting the
/// check, the test hands it a `done` function that is called exactly once
/// with `Ok(())` or the assertion error.
///
/// ```rust
/// use deferred_outcome::assertions::{expect_outcome, NotifyExt};
/// use deferred_outcome::Emitter;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let emitter = Emitter::default();
/// let (tx, rx) = tokio::sync::oneshot::channel();
///
/// tokio::spawn(
///     expect_outcome(emitter.fail_after("EpicFail", std::time::Duration::from_millis(5)))
///         .is_rejected()
///         .notify(move |result| {
///             let _ = tx.send(result);
///         }),
/// );
///
/// assert!(rx.await.unwrap().is_ok());
/// # }
/// ```
pub trait NotifyExt<T>: Future<Output = Result<T>> + Sized {
    /// Call `done` with the assertion result once this future completes.
    fn notify<D>(self, done: D) -> Notified<Self, D>
    where
        D: FnOnce(Result<()>),
    {
        Notified {
            future: self,
            done: Some(done),
        }
    }
}

impl<T, F: Future<Output = Result<T>>> NotifyExt<T> for F {}

/// Future returned by [`NotifyExt::notify`].
#[pin_project]
#[derive(Debug)]
#[must_use = "the callback only runs once this future is polled to completion"]
pub struct Notified<F, D> {
    #[pin]
    future: F,
    done: Option<D>,
}

impl<T, F, D> Future for Notified<F, D>
where
    F: Future<Output = Result<T>>,
    D: FnOnce(Result<()>),
{
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let result = ready!(this.future.poll(cx));
        let done = this.done.take().expect("`Notified` polled after completion");
        done(result.map(|_| ()));
        Poll::Ready(())
    }
}
