//! Assertion failures surfaced to test code.

use std::time::Duration;

use thiserror::Error;

use crate::{AssertionResult, Rejection, Verdict};

/// A failed assertion.
///
/// `Display` is the rendered failure message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssertionError {
    /// The subject was not a mock endpoint. A usage error.
    #[error("{message}")]
    InvalidSubject {
        /// Assertion name
        matcher: &'static str,
        /// Rendered failure message
        message: String,
    },

    /// No message arrived before the deadline.
    #[error("{message}")]
    Timeout {
        /// Assertion name
        matcher: &'static str,
        /// The wait that elapsed
        waited: Duration,
        /// Rendered failure message
        message: String,
    },

    /// A message was received but did not satisfy the comparison.
    #[error("{message}")]
    Mismatch {
        /// Assertion name
        matcher: &'static str,
        /// Rendered failure message
        message: String,
    },
}

impl AssertionError {
    /// Classify a failed result, rendering its message.
    pub fn from_result<A, E>(matcher: &'static str, result: &AssertionResult<A, E>) -> Self {
        let message = result.message();
        match result.verdict() {
            Verdict::Rejected(Rejection::InvalidSubject) => Self::InvalidSubject { matcher, message },
            Verdict::Rejected(Rejection::TimedOut { waited }) => {
                Self::Timeout { matcher, waited, message }
            },
            Verdict::Evaluated { .. } => Self::Mismatch { matcher, message },
        }
    }

    /// Name of the failed assertion.
    pub fn matcher(&self) -> &'static str {
        match self {
            Self::InvalidSubject { matcher, .. }
            | Self::Timeout { matcher, .. }
            | Self::Mismatch { matcher, .. } => matcher,
        }
    }

    /// Rendered failure message.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidSubject { message, .. }
            | Self::Timeout { message, .. }
            | Self::Mismatch { message, .. } => message,
        }
    }

    /// Returns true if re-running with a larger timeout may succeed.
    ///
    /// Usage errors and mismatches are never retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
