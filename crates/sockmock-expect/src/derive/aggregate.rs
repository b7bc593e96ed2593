//! Aggregate derivation.
//!
//! Wraps a kernel with the guard and hands it the endpoint's full received
//! log. There is no waiting: the log is already materialized, so the result is
//! a pure function of the log at the time of the call.

use std::marker::PhantomData;

use sockmock_endpoint::Message;

use crate::{AssertionResult, MatcherContext, ReceiveOptions, Subject, guard};

/// Assertion derived from a kernel over every message received so far.
///
/// Built by [`derive_aggregate`].
pub struct AggregateAssertion<E, K> {
    name: &'static str,
    kernel: K,
    _expected: PhantomData<fn(E)>,
}

/// Derive a synchronous aggregate assertion named `name`.
pub fn derive_aggregate<E, K, A, X>(name: &'static str, kernel: K) -> AggregateAssertion<E, K>
where
    K: Fn(&MatcherContext, Vec<Message>, E, &ReceiveOptions) -> AssertionResult<A, X>,
{
    AggregateAssertion { name, kernel, _expected: PhantomData }
}

impl<E, K> AggregateAssertion<E, K> {
    /// Assertion name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluate the assertion against `subject`.
    ///
    /// The log and `expected` reach the kernel unmodified.
    pub fn evaluate<A, X>(
        &self,
        ctx: &MatcherContext,
        subject: &dyn Subject,
        expected: E,
        options: ReceiveOptions,
    ) -> AssertionResult<A, X>
    where
        K: Fn(&MatcherContext, Vec<Message>, E, &ReceiveOptions) -> AssertionResult<A, X>,
    {
        match guard(ctx, subject, self.name) {
            Ok(endpoint) => {
                let received = endpoint.messages();
                tracing::trace!(matcher = self.name, received = received.len(), "evaluating log");
                (self.kernel)(ctx, received, expected, &options)
            },
            Err(rejected) => rejected,
        }
    }
}
