//! The same assertion-style suite, run against every flag combination.
//!
//! Each suite checks what the emitter *should* do under its configuration
//! and, for the fluent and callback styles, that an assertion written for
//! the default behavior catches the misbehaving configurations.

use deferred_outcome::assertions::matcher::{anything, contains};
use deferred_outcome::assertions::{expect_outcome, NotifyExt};
use deferred_outcome::{
    assert_failure, assert_success, Emitter, EmitterConfig, Error, Outcome, OutcomeKind,
    SUBSTITUTE_VALUE,
};
use regex::Regex;
use std::time::Duration;
use tokio::sync::oneshot;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

fn expected_payload(config: EmitterConfig, value: &str) -> &str {
    if config.substitute_value {
        SUBSTITUTE_VALUE
    } else {
        value
    }
}

fn expected_kind(config: EmitterConfig, requested: OutcomeKind) -> OutcomeKind {
    if config.invert_outcome {
        requested.inverted()
    } else {
        requested
    }
}

/// Whether assertions written for the default behavior should pass.
fn honest(config: EmitterConfig) -> bool {
    !config.invert_outcome && !config.substitute_value
}

fn expected_outcome(config: EmitterConfig, requested: OutcomeKind, value: &str) -> Outcome {
    let payload = expected_payload(config, value).to_string();
    match expected_kind(config, requested) {
        OutcomeKind::Success => Outcome::Success(payload),
        OutcomeKind::Failure => Outcome::Failure(deferred_outcome::DeferredFailure::new(payload)),
    }
}

macro_rules! scenario_suite {
    ($($suite:ident => $config:expr;)+) => {$(
        mod $suite {
            use super::*;

            fn config() -> EmitterConfig {
                $config
            }

            fn emitter() -> Emitter {
                init_tracing();
                Emitter::new(config())
            }

            mod awaiting {
                use super::*;

                #[tokio::test(start_paused = true)]
                async fn several_outcomes_in_one_test() {
                    let emitter = emitter();

                    let hello = emitter.succeed("Hello").await;
                    assert_eq!(hello, expected_outcome(config(), OutcomeKind::Success, "Hello"));

                    let bye = emitter.succeed("Bye").await;
                    assert_eq!(bye, expected_outcome(config(), OutcomeKind::Success, "Bye"));
                }

                #[tokio::test(start_paused = true)]
                async fn expected_failure_in_one_test() {
                    let emitter = emitter();

                    let outcome = emitter.fail("EpicFail").await;
                    assert_eq!(
                        outcome.kind(),
                        expected_kind(config(), OutcomeKind::Failure)
                    );
                    assert_eq!(outcome.payload(), expected_payload(config(), "EpicFail"));
                }

                #[tokio::test(start_paused = true)]
                async fn unwrapping_macros() {
                    let emitter = emitter();

                    if config().invert_outcome {
                        let failure = assert_failure!(emitter.succeed("Hello"));
                        assert_eq!(failure.payload(), expected_payload(config(), "Hello"));
                        let value = assert_success!(emitter.fail("EpicFail"));
                        assert_eq!(value, expected_payload(config(), "EpicFail"));
                    } else {
                        let value = assert_success!(emitter.succeed("Hello"));
                        assert_eq!(value, expected_payload(config(), "Hello"));
                        let failure = assert_failure!(emitter.fail("EpicFail"));
                        assert_eq!(failure.payload(), expected_payload(config(), "EpicFail"));
                    }
                }

                #[tokio::test(start_paused = true)]
                async fn settles_no_earlier_than_delay() {
                    let emitter = emitter();
                    let start = tokio::time::Instant::now();

                    emitter.succeed_after("Hello", Duration::from_millis(50)).await;
                    assert!(start.elapsed() >= Duration::from_millis(50));

                    let start = tokio::time::Instant::now();
                    emitter.fail("EpicFail").await;
                    assert!(start.elapsed() >= Duration::from_millis(1500));
                }
            }

            mod fluent {
                use super::*;

                #[tokio::test(start_paused = true)]
                async fn becomes_value() {
                    let result = expect_outcome(emitter().succeed("Hello"))
                        .described_as("Should be resolved with correct data")
                        .becomes("Hello")
                        .await;
                    assert_eq!(result.is_ok(), honest(config()));
                }

                #[tokio::test(start_paused = true)]
                async fn fulfilled_regardless_of_value() {
                    let result = expect_outcome(emitter().succeed("")).is_fulfilled().await;
                    assert_eq!(result.is_ok(), !config().invert_outcome);
                }

                #[tokio::test(start_paused = true)]
                async fn does_not_become_wrong_data() {
                    let result = expect_outcome(emitter().succeed("Hello"))
                        .does_not_become("Wrong Data")
                        .await;
                    // "Wrong Value" is not "Wrong Data", so only inversion trips this one.
                    assert_eq!(result.is_ok(), !config().invert_outcome);
                }

                #[tokio::test(start_paused = true)]
                async fn rejected_not_concerned_with_value() {
                    let result = expect_outcome(emitter().fail("EpicFail")).is_rejected().await;
                    assert_eq!(result.is_ok(), !config().invert_outcome);
                }

                #[tokio::test(start_paused = true)]
                async fn rejected_with_value_check() {
                    let pattern = Regex::new("EpicFail").unwrap();
                    let result = expect_outcome(emitter().fail("EpicFail"))
                        .is_rejected_with(&pattern)
                        .await;
                    assert_eq!(result.is_ok(), honest(config()));
                    if let Err(err) = result {
                        assert!(matches!(err, Error::AssertionFailed(_)));
                    }
                }

                #[tokio::test(start_paused = true)]
                async fn rejected_with_substring() {
                    let result = expect_outcome(emitter().fail("EpicFail"))
                        .is_rejected_with(contains("Epic"))
                        .await;
                    assert_eq!(result.is_ok(), honest(config()));
                }

                #[tokio::test(start_paused = true)]
                async fn rejected_with_anything() {
                    let result = expect_outcome(emitter().fail("EpicFail"))
                        .is_rejected_with(anything())
                        .await;
                    assert_eq!(result.is_ok(), !config().invert_outcome);
                }
            }

            mod callback {
                use super::*;

                #[tokio::test(start_paused = true)]
                async fn becomes_then_done() {
                    let (done, finished) = oneshot::channel();
                    tokio::spawn(
                        expect_outcome(emitter().succeed("Hello"))
                            .becomes("Hello")
                            .notify(move |result| {
                                let _ = done.send(result);
                            }),
                    );
                    assert_eq!(finished.await.unwrap().is_ok(), honest(config()));
                }

                #[tokio::test(start_paused = true)]
                async fn fulfilled_then_done() {
                    let (done, finished) = oneshot::channel();
                    tokio::spawn(expect_outcome(emitter().succeed("")).is_fulfilled().notify(
                        move |result| {
                            let _ = done.send(result);
                        },
                    ));
                    assert_eq!(finished.await.unwrap().is_ok(), !config().invert_outcome);
                }

                #[tokio::test(start_paused = true)]
                async fn rejected_then_done() {
                    let (done, finished) = oneshot::channel();
                    tokio::spawn(
                        expect_outcome(emitter().fail("EpicFail"))
                            .is_rejected_with(Regex::new("EpicFail").unwrap())
                            .notify(move |result| {
                                let _ = done.send(result);
                            }),
                    );
                    assert_eq!(finished.await.unwrap().is_ok(), honest(config()));
                }
            }
        }
    )+};
}

scenario_suite! {
    default_flags => EmitterConfig::new();
    inverted => EmitterConfig::new().invert_outcome();
    substituted => EmitterConfig::new().substitute_value();
    inverted_and_substituted => EmitterConfig::new().invert_outcome().substitute_value();
}

#[tokio::test(start_paused = true)]
async fn concurrent_calls_settle_in_deadline_order() {
    init_tracing();
    let emitter = Emitter::default();

    let slow = emitter.fail_after("EpicFail", Duration::from_millis(1500));
    let fast = emitter.succeed_after("Hello", Duration::from_millis(50));

    let first = tokio::select! {
        outcome = slow => outcome,
        outcome = fast => outcome,
    };
    assert_eq!(first, Outcome::Success("Hello".into()));
}

#[tokio::test(start_paused = true)]
async fn concurrent_calls_share_one_emitter() {
    let emitter = Emitter::new(EmitterConfig::new().invert_outcome());

    let (a, b) = tokio::join!(
        emitter.succeed_after("Hello", Duration::from_millis(50)),
        emitter.fail_after("EpicFail", Duration::from_millis(50)),
    );

    assert_eq!(a.kind(), OutcomeKind::Failure);
    assert_eq!(b, Outcome::Success("EpicFail".into()));
}
