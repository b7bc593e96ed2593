//! Single-message derivation.
//!
//! Wraps a kernel with the guard and a bounded wait for the endpoint's next
//! message. The wait races the message against a timer started when the
//! assertion is evaluated; whichever settles first decides the path.

use std::{future::IntoFuture, marker::PhantomData, time::Duration};

use sockmock_endpoint::{Message, MockEndpoint};

use crate::{AssertionResult, MatcherContext, ReceiveOptions, Rejection, Subject, guard};

/// Outcome of the race between the next message and the deadline.
enum Arrival {
    Message(Message),
    Elapsed,
}

async fn next_or_deadline(endpoint: &MockEndpoint, wait: Duration) -> Arrival {
    let next = async {
        match endpoint.next_message().await {
            Some(message) => Arrival::Message(message),
            // A closed endpoint never delivers; let the deadline decide.
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        biased;
        arrival = next => arrival,
        () = tokio::time::sleep(wait) => Arrival::Elapsed,
    }
}

/// Assertion derived from a kernel over the next received message.
///
/// Built by [`derive_single`].
pub struct SingleMessageAssertion<E, K> {
    name: &'static str,
    kernel: K,
    _expected: PhantomData<fn(E)>,
}

/// Derive an asynchronous single-message assertion named `name`.
///
/// The kernel receives the next message, the expected value and the options,
/// and returns either an [`AssertionResult`] or a future resolving to one. A
/// deferred kernel must own what it needs, so clone the context into it.
pub fn derive_single<E, K, O, A, X>(name: &'static str, kernel: K) -> SingleMessageAssertion<E, K>
where
    K: Fn(&MatcherContext, Message, E, &ReceiveOptions) -> O,
    O: IntoFuture<Output = AssertionResult<A, X>>,
{
    SingleMessageAssertion { name, kernel, _expected: PhantomData }
}

impl<E, K> SingleMessageAssertion<E, K> {
    /// Assertion name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluate the assertion against `subject`.
    ///
    /// Rejects invalid subjects without waiting. Otherwise waits up to the
    /// resolved timeout for the next message and hands it to the kernel; an
    /// elapsed wait is rejected as [`Rejection::TimedOut`].
    pub async fn evaluate<O, A, X>(
        &self,
        ctx: &MatcherContext,
        subject: &dyn Subject,
        expected: E,
        options: ReceiveOptions,
    ) -> AssertionResult<A, X>
    where
        K: Fn(&MatcherContext, Message, E, &ReceiveOptions) -> O,
        O: IntoFuture<Output = AssertionResult<A, X>>,
    {
        let endpoint = match guard(ctx, subject, self.name) {
            Ok(endpoint) => endpoint,
            Err(rejected) => return rejected,
        };

        let wait = options.resolve_timeout(ctx.config());

        match next_or_deadline(endpoint, wait).await {
            Arrival::Elapsed => {
                tracing::debug!(
                    matcher = self.name,
                    url = %endpoint.url(),
                    waited_ms = wait.as_millis(),
                    "no message before deadline"
                );
                let hint = ctx.hint(self.name);
                let millis = wait.as_millis();
                AssertionResult::rejected(Rejection::TimedOut { waited: wait }, move || {
                    format!(
                        "{hint}\n\nExpected the endpoint to receive a message,\n\
                         but it didn't receive anything in {millis}ms."
                    )
                })
            },
            Arrival::Message(message) => {
                tracing::trace!(matcher = self.name, url = %endpoint.url(), "message received");
                (self.kernel)(ctx, message, expected, &options).await
            },
        }
    }
}
