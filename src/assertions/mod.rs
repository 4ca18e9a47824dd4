//! Ways to observe a deferred outcome in a test.
//!
//! The emitter does not care how its outcomes are observed. This module
//! offers the three usual styles:
//!
//! - **Direct await** - [`assert_success!`](crate::assert_success),
//!   [`assert_failure!`](crate::assert_failure), or plain `.await` and
//!   `assert_eq!`
//! - **Fluent "eventually"** - [`expect_outcome`] with
//!   [`becomes`](OutcomeAssertion::becomes),
//!   [`is_rejected_with`](OutcomeAssertion::is_rejected_with), ...
//! - **Completion callback** - [`NotifyExt::notify`] hands the assertion
//!   result to a `done` function
//!
//! plus [`poll_once`], [`assert_pending!`](crate::assert_pending) and
//! [`assert_ready!`](crate::assert_ready) for checking settlement with a
//! [`ManualClock`](crate::clock::ManualClock).
//!
//! # Example
//!
//! ```rust
//! use deferred_outcome::assertions::expect_outcome;
//! use deferred_outcome::assertions::matcher::contains;
//! use deferred_outcome::{assert_success, Emitter};
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() -> deferred_outcome::Result<()> {
//! let emitter = Emitter::default();
//!
//! let value = assert_success!(emitter.succeed("Hello"));
//! assert_eq!(value, "Hello");
//!
//! expect_outcome(emitter.fail("EpicFail"))
//!     .is_rejected_with(contains("EpicFail"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod future;
pub mod matcher;
mod outcome;

pub use future::poll_once;
pub use outcome::{expect_outcome, Notified, NotifyExt, OutcomeAssertion};
