//! "The log contains all of these messages."
//!
//! Membership is order-independent: each expected message only needs a deep
//! equal somewhere in the log. Extra received messages never fail the check.

use serde_json::Value;
use sockmock_endpoint::Message;

use super::indent;
use crate::{AssertionResult, MatcherContext, ReceiveOptions};

/// Name of the membership assertion.
pub const RECEIVED_ALL_OF_MESSAGES: &str = "received_all_of_messages";

fn list_value(messages: &[Message]) -> Value {
    Value::Array(messages.iter().map(|message| message.as_value().into_owned()).collect())
}

/// Kernel: every message in `expected` appears in `received`.
///
/// Negated, the kernel's claim becomes "at least one was found", so `.not`
/// fails as soon as any one listed message was received.
pub fn all_of_messages(
    ctx: &MatcherContext,
    received: Vec<Message>,
    expected: Vec<Message>,
    _options: &ReceiveOptions,
) -> AssertionResult<Vec<Message>, Vec<Message>> {
    let mut found = expected.iter().map(|wanted| received.iter().any(|got| ctx.equals(got, wanted)));
    let pass = if ctx.is_negated() { found.any(|hit| hit) } else { found.all(|hit| hit) };

    let ctx = ctx.clone();
    let (shown_received, shown_expected) = (received.clone(), expected.clone());

    AssertionResult::evaluated(pass, received, expected, move || {
        let utils = ctx.utils();
        let hint = ctx.hint_as(RECEIVED_ALL_OF_MESSAGES, pass);
        let printed_expected = indent(&utils.print_expected(&list_value(&shown_expected)));
        let printed_received = indent(&utils.print_received(&list_value(&shown_received)));

        if pass {
            format!(
                "{hint}\n\nExpected the endpoint to not have received the following messages:\n\
                 {printed_expected}\nBut it received:\n{printed_received}"
            )
        } else {
            format!(
                "{hint}\n\nExpected the endpoint to have received the following messages:\n\
                 {printed_expected}\nReceived:\n{printed_received}"
            )
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> Vec<Message> {
        vec!["hello there".into(), "how are you?".into(), "good?".into()]
    }

    fn check(negated: bool, expected: &[&str]) -> AssertionResult<Vec<Message>, Vec<Message>> {
        let expected = expected.iter().map(|text| Message::from(*text)).collect();
        all_of_messages(&MatcherContext::new(negated), log(), expected, &ReceiveOptions::default())
    }

    #[test]
    fn subset_in_any_order_passes() {
        assert!(!check(false, &["good?", "hello there"]).is_failure(false));
    }

    #[test]
    fn missing_message_fails() {
        let result = check(false, &["hello there", "'sup?"]);
        assert!(result.is_failure(false));
        insta::assert_snapshot!(result.message(), @r#"
        expect(endpoint).received_all_of_messages(expected)

        Expected the endpoint to have received the following messages:
          [
            "hello there",
            "'sup?"
          ]
        Received:
          [
            "hello there",
            "how are you?",
            "good?"
          ]
        "#);
    }

    #[test]
    fn negated_passes_when_none_found() {
        assert!(!check(true, &["'sup?", "U good?"]).is_failure(true));
    }

    #[test]
    fn negated_fails_when_any_found() {
        let result = check(true, &["'sup?", "U good?", "hello there"]);
        assert!(result.is_failure(true));
        assert!(result.message().starts_with(
            "expect(endpoint).not.received_all_of_messages(expected)\n\n\
             Expected the endpoint to not have received the following messages:"
        ));
    }

    #[test]
    fn empty_expectation_holds_and_negation_passes() {
        assert!(!check(false, &[]).is_failure(false));
        assert!(!check(true, &[]).is_failure(true));
    }
}
