//! Integration tests for the `#[deferred_outcome::test]` macro.

#![cfg(feature = "macros")]

use deferred_outcome::clock::ManualClock;
use deferred_outcome::{
    assert_failure, assert_pending, assert_success, DeferredFailure, Emitter, Outcome,
};
use std::time::Duration;

/// No injected parameters at all.
#[deferred_outcome::test]
async fn test_basic_async() {
    let emitter = Emitter::default();
    assert_eq!(assert_success!(emitter.succeed("Hello")), "Hello");
}

/// Default flags, real (paused) Tokio time.
#[deferred_outcome::test]
async fn test_injected_default_emitter(emitter: Emitter) {
    assert!(!emitter.config().invert_outcome);
    assert!(!emitter.config().substitute_value);

    let failure = assert_failure!(emitter.fail("EpicFail"));
    assert_eq!(failure.payload(), "EpicFail");
}

#[deferred_outcome::test(invert_outcome = true)]
async fn test_inverted_success_fails(emitter: Emitter) {
    let outcome = emitter.succeed_after("Hello", Duration::from_millis(50)).await;
    assert_eq!(outcome, Outcome::Failure(DeferredFailure::new("Hello")));
}

#[deferred_outcome::test(substitute_value = true)]
async fn test_substituted_success(emitter: Emitter<ManualClock>, clock: ManualClock) {
    let mut deferred = emitter.succeed_after("Hello", Duration::from_millis(50));

    clock.advance(Duration::from_millis(49));
    assert_pending!(&mut deferred);

    clock.advance(Duration::from_millis(1));
    assert_eq!(deferred.await, Outcome::Success("Wrong Value".into()));
}

#[deferred_outcome::test(invert_outcome = true, substitute_value = true)]
async fn test_inverted_and_substituted_failure(clock: ManualClock, emitter: Emitter<ManualClock>) {
    let deferred = emitter.fail_after("EpicFail", Duration::from_millis(50));
    clock.advance(Duration::from_millis(50));
    assert_eq!(deferred.await, Outcome::Success("Wrong Value".into()));
}

/// A clock on its own, no emitter.
#[deferred_outcome::test]
async fn test_clock_only(clock: ManualClock) {
    assert_eq!(clock.now(), Duration::ZERO);
    clock.advance(Duration::from_millis(1500));
    assert_eq!(clock.now(), Duration::from_millis(1500));
}

/// Real time on a multi-threaded runtime.
#[deferred_outcome::test(start_paused = false, flavor = "multi_thread")]
async fn test_multi_thread(emitter: Emitter) {
    let handle = tokio::spawn(async move {
        emitter
            .succeed_after("Hello", Duration::from_millis(5))
            .await
    });
    assert_eq!(handle.await.unwrap(), Outcome::Success("Hello".into()));
}
