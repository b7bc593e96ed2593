//! "Received exactly this next message."

use sockmock_endpoint::Message;

use super::indent;
use crate::{AssertionResult, MatcherContext, ReceiveOptions};

/// Name of the next-message equality assertion.
pub const RECEIVED_NEXT_MESSAGE_EQUALS: &str = "received_next_message_equals";

/// Kernel: the next received message deep-equals `expected`.
///
/// On a mismatch the message carries both values and their structural diff.
pub fn next_message_equals(
    ctx: &MatcherContext,
    received: Message,
    expected: Message,
    _options: &ReceiveOptions,
) -> AssertionResult<Message, Message> {
    let pass = ctx.equals(&received, &expected);

    let ctx = ctx.clone();
    let (shown_received, shown_expected) = (received.clone(), expected.clone());

    AssertionResult::evaluated(pass, received, expected, move || {
        let utils = ctx.utils();
        let (received, expected) = (shown_received.as_value(), shown_expected.as_value());
        let hint = ctx.hint_as(RECEIVED_NEXT_MESSAGE_EQUALS, pass);
        let printed_expected = indent(&utils.print_expected(&expected));
        let printed_received = indent(&utils.print_received(&received));

        if pass {
            format!(
                "{hint}\n\nExpected the next received message to not equal:\n\
                 {printed_expected}\nReceived:\n{printed_received}"
            )
        } else {
            let diff = utils.diff(&expected, &received);
            format!(
                "{hint}\n\nExpected the next received message to equal:\n\
                 {printed_expected}\nReceived:\n{printed_received}\n\nDifference:\n\n{diff}"
            )
        }
    })
}
