//! Matchers over outcome payloads.
//!
//! Every payload a deferred call settles with is a string, so a [`Matcher`]
//! checks a `&str`:
//!
//! - built-ins: [`eq`], [`contains`], [`anything`]
//! - negation: [`not`]
//! - [`regex::Regex`] is a matcher too, for pattern checks on failures
//!
//! # Example
//!
//! ```rust
//! use deferred_outcome::assert_that;
//! use deferred_outcome::assertions::matcher::{contains, eq, not, Matcher};
//! use regex::Regex;
//!
//! assert_that!("EpicFail", contains("Fail"));
//! assert_that!("Hello", not(eq("Wrong Value")));
//! assert!(Regex::new("^Epic").unwrap().matches("EpicFail"));
//! ```

use regex::Regex;

/// A check on an outcome payload.
///
/// # Implementing Custom Matchers
///
/// ```rust
/// use deferred_outcome::assertions::matcher::Matcher;
///
/// struct IsEmpty;
///
/// impl Matcher for IsEmpty {
///     fn matches(&self, value: &str) -> bool {
///         value.is_empty()
///     }
///
///     fn describe(&self) -> String {
///         "is empty".to_string()
///     }
/// }
///
/// assert!(IsEmpty.matches(""));
/// assert!(!IsEmpty.matches("Hello"));
/// ```
pub trait Matcher {
    /// Check if the payload matches.
    fn matches(&self, value: &str) -> bool;

    /// Describe what this matcher expects.
    fn describe(&self) -> String;

    /// Describe why a payload didn't match.
    fn describe_mismatch(&self, value: &str) -> String {
        format!("{value:?} does not satisfy \"{}\"", self.describe())
    }
}

impl<M: Matcher + ?Sized> Matcher for &M {
    fn matches(&self, value: &str) -> bool {
        (**self).matches(value)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn describe_mismatch(&self, value: &str) -> String {
        (**self).describe_mismatch(value)
    }
}

impl Matcher for Regex {
    fn matches(&self, value: &str) -> bool {
        self.is_match(value)
    }

    fn describe(&self) -> String {
        format!("matches /{}/", self.as_str())
    }

    fn describe_mismatch(&self, value: &str) -> String {
        format!("{value:?} does not match /{}/", self.as_str())
    }
}

/// Assert that a payload satisfies a matcher.
///
/// The value can be anything that is `AsRef<str>`: a `&str`, a `String`,
/// or a [`DeferredFailure`](crate::DeferredFailure).
///
/// # Panics
///
/// Panics with the matcher's descriptions if the value doesn't match.
#[macro_export]
macro_rules! assert_that {
    ($value:expr, $matcher:expr) => {{
        let owned = &$value;
        let value: &str = ::std::convert::AsRef::<str>::as_ref(owned);
        let matcher = &$matcher;
        if !$crate::assertions::matcher::Matcher::matches(matcher, value) {
            panic!(
                "assertion failed: {}\n  expected: {}\n  got: {:?}",
                $crate::assertions::matcher::Matcher::describe_mismatch(matcher, value),
                $crate::assertions::matcher::Matcher::describe(matcher),
                value
            );
        }
    }};
    ($value:expr, $matcher:expr, $($arg:tt)+) => {{
        let owned = &$value;
        let value: &str = ::std::convert::AsRef::<str>::as_ref(owned);
        let matcher = &$matcher;
        if !$crate::assertions::matcher::Matcher::matches(matcher, value) {
            panic!(
                "assertion failed: {}\n  expected: {}\n  got: {:?}\n  message: {}",
                $crate::assertions::matcher::Matcher::describe_mismatch(matcher, value),
                $crate::assertions::matcher::Matcher::describe(matcher),
                value,
                format_args!($($arg)+)
            );
        }
    }};
}

/// Matches a payload equal to `expected`.
#[must_use]
pub fn eq(expected: impl Into<String>) -> EqMatcher {
    EqMatcher {
        expected: expected.into(),
    }
}

/// Matcher for equality.
#[derive(Debug, Clone)]
pub struct EqMatcher {
    expected: String,
}

impl Matcher for EqMatcher {
    fn matches(&self, value: &str) -> bool {
        value == self.expected
    }

    fn describe(&self) -> String {
        format!("equals {:?}", self.expected)
    }

    fn describe_mismatch(&self, value: &str) -> String {
        format!("{value:?} does not equal {:?}", self.expected)
    }
}

/// Matches a payload containing `substring`.
#[must_use]
pub fn contains(substring: impl Into<String>) -> ContainsMatcher {
    ContainsMatcher {
        substring: substring.into(),
    }
}

/// Matcher for substrings.
#[derive(Debug, Clone)]
pub struct ContainsMatcher {
    substring: String,
}

impl Matcher for ContainsMatcher {
    fn matches(&self, value: &str) -> bool {
        value.contains(self.substring.as_str())
    }

    fn describe(&self) -> String {
        format!("contains {:?}", self.substring)
    }

    fn describe_mismatch(&self, value: &str) -> String {
        format!("{value:?} does not contain {:?}", self.substring)
    }
}

/// Matches any payload.
#[must_use]
pub fn anything() -> AnythingMatcher {
    AnythingMatcher
}

/// Matcher that always matches.
#[derive(Debug, Clone, Copy)]
pub struct AnythingMatcher;

impl Matcher for AnythingMatcher {
    fn matches(&self, _value: &str) -> bool {
        true
    }

    fn describe(&self) -> String {
        "anything".to_string()
    }
}

/// Negate a matcher.
#[must_use]
pub fn not<M: Matcher>(inner: M) -> NotMatcher<M> {
    NotMatcher { inner }
}

/// Matcher that inverts another.
#[derive(Debug, Clone)]
pub struct NotMatcher<M> {
    inner: M,
}

impl<M: Matcher> Matcher for NotMatcher<M> {
    fn matches(&self, value: &str) -> bool {
        !self.inner.matches(value)
    }

    fn describe(&self) -> String {
        format!("not ({})", self.inner.describe())
    }

    fn describe_mismatch(&self, value: &str) -> String {
        format!("{value:?} unexpectedly {}", self.inner.describe())
    }
}
