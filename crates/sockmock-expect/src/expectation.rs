//! Registration surface.
//!
//! [`expect`] binds a subject to a [`MatcherContext`] and exposes the built-in
//! assertions as methods. User-derived assertions plug in through
//! [`Expectation::satisfies_single`] and [`Expectation::satisfies_aggregate`].
//! Each call settles to `Ok(())` or an [`AssertionError`] carrying the
//! rendered failure message; the message is only rendered on failure.

use std::{future::IntoFuture, sync::Arc};

use sockmock_endpoint::Message;

use crate::{
    AggregateAssertion, AssertionError, AssertionResult, ExpectConfig, MatcherContext,
    MatcherUtils, ReceiveOptions, SingleMessageAssertion, Subject, derive_aggregate,
    derive_single,
    matchers::{
        RECEIVED_ALL_OF_MESSAGES, RECEIVED_NEXT_MESSAGE_EQUALS, all_of_messages,
        next_message_equals,
    },
};

/// Start an expectation on `subject`.
pub fn expect(subject: &dyn Subject) -> Expectation<'_> {
    Expectation::new(subject)
}

/// A subject bound to a matcher context.
#[derive(Debug)]
pub struct Expectation<'s> {
    subject: &'s dyn Subject,
    ctx: MatcherContext,
}

impl<'s> Expectation<'s> {
    /// Expectation with default capabilities and configuration.
    pub fn new(subject: &'s dyn Subject) -> Self {
        Self { subject, ctx: MatcherContext::default() }
    }

    /// Negate the expectation.
    #[must_use]
    pub fn not(mut self) -> Self {
        self.ctx = self.ctx.negate();
        self
    }

    /// Replace the comparison and rendering capabilities.
    #[must_use]
    pub fn with_utils(mut self, utils: Arc<dyn MatcherUtils>) -> Self {
        self.ctx = self.ctx.with_utils(utils);
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ExpectConfig) -> Self {
        self.ctx = self.ctx.with_config(config);
        self
    }

    /// Context assertions are evaluated in.
    pub fn context(&self) -> &MatcherContext {
        &self.ctx
    }

    /// The next message the endpoint receives equals `expected`, waiting up
    /// to the configured default.
    pub async fn received_next_message_equals(
        &self,
        expected: impl Into<Message>,
    ) -> Result<(), AssertionError> {
        self.received_next_message_equals_with(expected, ReceiveOptions::default()).await
    }

    /// The next message the endpoint receives equals `expected`.
    pub async fn received_next_message_equals_with(
        &self,
        expected: impl Into<Message>,
        options: ReceiveOptions,
    ) -> Result<(), AssertionError> {
        let assertion = derive_single(RECEIVED_NEXT_MESSAGE_EQUALS, next_message_equals);
        self.satisfies_single(&assertion, expected.into(), options).await
    }

    /// Every message in `expected` was received, in any order.
    pub fn received_all_of_messages<I>(&self, expected: I) -> Result<(), AssertionError>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        let assertion = derive_aggregate(RECEIVED_ALL_OF_MESSAGES, all_of_messages);
        self.satisfies_aggregate(&assertion, expected.into_iter().map(Into::into).collect())
    }

    /// Evaluate a user-derived single-message assertion.
    pub async fn satisfies_single<E, K, O, A, X>(
        &self,
        assertion: &SingleMessageAssertion<E, K>,
        expected: E,
        options: ReceiveOptions,
    ) -> Result<(), AssertionError>
    where
        K: Fn(&MatcherContext, Message, E, &ReceiveOptions) -> O,
        O: IntoFuture<Output = AssertionResult<A, X>>,
    {
        let result = assertion.evaluate(&self.ctx, self.subject, expected, options).await;
        self.settle(assertion.name(), &result)
    }

    /// Evaluate a user-derived aggregate assertion.
    pub fn satisfies_aggregate<E, K, A, X>(
        &self,
        assertion: &AggregateAssertion<E, K>,
        expected: E,
    ) -> Result<(), AssertionError>
    where
        K: Fn(&MatcherContext, Vec<Message>, E, &ReceiveOptions) -> AssertionResult<A, X>,
    {
        let result = assertion.evaluate(&self.ctx, self.subject, expected, ReceiveOptions::default());
        self.settle(assertion.name(), &result)
    }

    fn settle<A, E>(
        &self,
        matcher: &'static str,
        result: &AssertionResult<A, E>,
    ) -> Result<(), AssertionError> {
        if result.is_failure(self.ctx.is_negated()) {
            Err(AssertionError::from_result(matcher, result))
        } else {
            Ok(())
        }
    }
}
