//! Uniform assertion result.
//!
//! Every assertion, whatever its kernel, produces an [`AssertionResult`]. The
//! [`Verdict`] separates outcomes a kernel decided from outcomes the engine
//! rejected before any kernel ran: a rejection is a failure under both
//! polarities, so an invalid subject or an elapsed deadline can never pass
//! under `.not`.

use std::{fmt, future::IntoFuture, sync::Arc, time::Duration};

/// Deferred failure message.
///
/// Only invoked when a failure is reported. Must be pure and repeatable.
pub type LazyMessage = Arc<dyn Fn() -> String + Send + Sync>;

/// Why the engine refused to consult a kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The subject is not a mock endpoint.
    InvalidSubject,
    /// No message arrived before the deadline.
    TimedOut {
        /// The wait that elapsed
        waited: Duration,
    },
}

/// Outcome class of an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// A kernel evaluated the claim.
    ///
    /// `pass` is the kernel's answer; the assertion fails when it equals the
    /// negation flag.
    Evaluated {
        /// Kernel's answer
        pass: bool,
    },
    /// The engine rejected the invocation. Always a failure.
    Rejected(Rejection),
}

/// Result of one assertion invocation.
///
/// `A` is the observed value and `E` the expected value the kernel chose to
/// report. Both are absent on rejections.
pub struct AssertionResult<A, E> {
    verdict: Verdict,
    actual: Option<A>,
    expected: Option<E>,
    message: LazyMessage,
}

impl<A, E> AssertionResult<A, E> {
    /// Result decided by a kernel.
    pub fn evaluated(
        pass: bool,
        actual: A,
        expected: E,
        message: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            verdict: Verdict::Evaluated { pass },
            actual: Some(actual),
            expected: Some(expected),
            message: Arc::new(message),
        }
    }

    /// Result rejected by the engine.
    pub fn rejected(
        rejection: Rejection,
        message: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            verdict: Verdict::Rejected(rejection),
            actual: None,
            expected: None,
            message: Arc::new(message),
        }
    }

    /// Outcome class.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Rejection reason, if the engine rejected the invocation.
    pub fn rejection(&self) -> Option<Rejection> {
        match self.verdict {
            Verdict::Rejected(rejection) => Some(rejection),
            Verdict::Evaluated { .. } => None,
        }
    }

    /// Whether the assertion failed as stated under the given polarity.
    pub fn is_failure(&self, negated: bool) -> bool {
        match self.verdict {
            Verdict::Evaluated { pass } => pass == negated,
            Verdict::Rejected(_) => true,
        }
    }

    /// Raw `pass` flag for runtimes that only apply `pass == negated`.
    ///
    /// Rejections report the negation flag itself so that they fail under
    /// either polarity.
    pub fn pass_flag(&self, negated: bool) -> bool {
        match self.verdict {
            Verdict::Evaluated { pass } => pass,
            Verdict::Rejected(_) => negated,
        }
    }

    /// Observed value.
    pub fn actual(&self) -> Option<&A> {
        self.actual.as_ref()
    }

    /// Expected value.
    pub fn expected(&self) -> Option<&E> {
        self.expected.as_ref()
    }

    /// Render the failure message.
    pub fn message(&self) -> String {
        (self.message)()
    }

    /// The deferred message itself.
    pub fn lazy_message(&self) -> LazyMessage {
        Arc::clone(&self.message)
    }
}

impl<A: fmt::Debug, E: fmt::Debug> fmt::Debug for AssertionResult<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssertionResult")
            .field("verdict", &self.verdict)
            .field("actual", &self.actual)
            .field("expected", &self.expected)
            .finish_non_exhaustive()
    }
}

/// A ready result satisfies the same bound as a deferred one, so synchronous
/// kernels plug into the single-message derivation unchanged.
impl<A, E> IntoFuture for AssertionResult<A, E> {
    type Output = Self;
    type IntoFuture = std::future::Ready<Self>;

    fn into_future(self) -> Self::IntoFuture {
        std::future::ready(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn evaluated_fails_when_pass_equals_negation() {
        let passing = AssertionResult::evaluated(true, 1, 1, String::new);
        assert!(!passing.is_failure(false));
        assert!(passing.is_failure(true));

        let failing = AssertionResult::evaluated(false, 1, 2, String::new);
        assert!(failing.is_failure(false));
        assert!(!failing.is_failure(true));
    }

    #[test]
    fn rejection_fails_under_both_polarities() {
        let rejected: AssertionResult<(), ()> =
            AssertionResult::rejected(Rejection::InvalidSubject, String::new);
        assert!(rejected.is_failure(false));
        assert!(rejected.is_failure(true));
        assert!(!rejected.pass_flag(false));
        assert!(rejected.pass_flag(true));
    }

    #[test]
    fn message_is_not_rendered_eagerly() {
        let renders = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&renders);
        let result = AssertionResult::evaluated(true, (), (), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            "rendered".to_owned()
        });

        assert_eq!(renders.load(Ordering::SeqCst), 0);
        assert_eq!(result.message(), "rendered");
        assert_eq!(result.message(), "rendered");
        assert_eq!(renders.load(Ordering::SeqCst), 2);
    }
}
