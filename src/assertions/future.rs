//! Direct-await assertions on deferred outcomes.
//!
//! - [`assert_success!`] / [`assert_failure!`] - await and unwrap one kind
//! - [`assert_pending!`] / [`assert_ready!`] - check settlement without awaiting
//! - [`poll_once`] - poll a future once with a no-op waker
//!
//! # Example
//!
//! ```rust
//! use deferred_outcome::clock::ManualClock;
//! use deferred_outcome::{assert_pending, assert_ready, Emitter, EmitterConfig};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let emitter = Emitter::with_timer(EmitterConfig::new(), clock.clone());
//! let mut deferred = emitter.succeed_after("Hello", Duration::from_millis(50));
//!
//! clock.advance(Duration::from_millis(49));
//! assert_pending!(&mut deferred);
//!
//! clock.advance(Duration::from_millis(1));
//! let outcome = assert_ready!(&mut deferred);
//! assert_eq!(outcome.payload(), "Hello");
//! ```

use futures::task::noop_waker;
use std::future::Future;
use std::pin::pin;
use std::task::{Context, Poll};

/// Poll a future once and return the result.
///
/// Pass `&mut future` to keep polling the same future afterwards; this needs
/// the future to be `Unpin`, which a [`Deferred`](crate::Deferred) on a
/// [`ManualClock`](crate::clock::ManualClock) is.
pub fn poll_once<F: Future>(future: F) -> Poll<F::Output> {
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    pin!(future).poll(&mut cx)
}

/// Assert that a future is ready on its first poll, returning its output.
///
/// # Panics
///
/// Panics if the future returns `Poll::Pending`.
#[macro_export]
macro_rules! assert_ready {
    ($future:expr) => {{
        match $crate::assertions::poll_once($future) {
            ::std::task::Poll::Ready(value) => value,
            ::std::task::Poll::Pending => {
                panic!("assertion failed: expected future to be Ready, but it was Pending");
            }
        }
    }};
    ($future:expr, $($arg:tt)+) => {{
        match $crate::assertions::poll_once($future) {
            ::std::task::Poll::Ready(value) => value,
            ::std::task::Poll::Pending => {
                panic!("assertion failed: expected future to be Ready, but it was Pending: {}", format_args!($($arg)+));
            }
        }
    }};
}

/// Assert that a future has not settled yet.
///
/// # Panics
///
/// Panics if the future returns `Poll::Ready`.
#[macro_export]
macro_rules! assert_pending {
    ($future:expr) => {{
        if let ::std::task::Poll::Ready(value) = $crate::assertions::poll_once($future) {
            panic!(
                "assertion failed: expected future to be Pending, but it was Ready({:?})",
                value
            );
        }
    }};
    ($future:expr, $($arg:tt)+) => {{
        if let ::std::task::Poll::Ready(value) = $crate::assertions::poll_once($future) {
            panic!(
                "assertion failed: expected future to be Pending, but it was Ready({:?}): {}",
                value,
                format_args!($($arg)+)
            );
        }
    }};
}

/// Await a deferred outcome and return its success value.
///
/// Must be used inside an async context.
///
/// # Panics
///
/// Panics if the outcome is a failure.
///
/// ```rust,ignore
/// let value = assert_success!(emitter.succeed("Hello"));
/// assert_eq!(value, "Hello");
/// ```
#[macro_export]
macro_rules! assert_success {
    ($future:expr) => {{
        match $crate::Outcome::into_result($future.await) {
            ::std::result::Result::Ok(value) => value,
            ::std::result::Result::Err(failure) => panic!(
                "assertion failed: expected deferred success, got failure({:?})",
                failure.payload()
            ),
        }
    }};
    ($future:expr, $($arg:tt)+) => {{
        match $crate::Outcome::into_result($future.await) {
            ::std::result::Result::Ok(value) => value,
            ::std::result::Result::Err(failure) => panic!(
                "assertion failed: expected deferred success, got failure({:?}): {}",
                failure.payload(),
                format_args!($($arg)+)
            ),
        }
    }};
}

/// Await a deferred outcome and return its [`DeferredFailure`](crate::DeferredFailure).
///
/// Must be used inside an async context.
///
/// # Panics
///
/// Panics if the outcome is a success.
///
/// ```rust,ignore
/// let failure = assert_failure!(emitter.fail("EpicFail"));
/// assert_eq!(failure.payload(), "EpicFail");
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($future:expr) => {{
        match $crate::Outcome::into_result($future.await) {
            ::std::result::Result::Err(failure) => failure,
            ::std::result::Result::Ok(value) => panic!(
                "assertion failed: expected deferred failure, got success({:?})",
                value
            ),
        }
    }};
    ($future:expr, $($arg:tt)+) => {{
        match $crate::Outcome::into_result($future.await) {
            ::std::result::Result::Err(failure) => failure,
            ::std::result::Result::Ok(value) => panic!(
                "assertion failed: expected deferred failure, got success({:?}): {}",
                value,
                format_args!($($arg)+)
            ),
        }
    }};
}
