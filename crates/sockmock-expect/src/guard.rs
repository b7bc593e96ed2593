//! Subject validation shared by both derivations.

use sockmock_endpoint::MockEndpoint;

use crate::{AssertionResult, MatcherContext, Rejection, Subject};

/// Resolve the subject to a mock endpoint.
///
/// A subject of any other type yields a [`Rejection::InvalidSubject`] result,
/// which fails whether or not the assertion is negated. The polarity only
/// shows up in the rendered hint.
pub fn guard<'s, A, E>(
    ctx: &MatcherContext,
    subject: &'s dyn Subject,
    name: &str,
) -> Result<&'s MockEndpoint, AssertionResult<A, E>> {
    if let Some(endpoint) = subject.as_any().downcast_ref::<MockEndpoint>() {
        return Ok(endpoint);
    }

    let type_name = subject.type_name();
    tracing::warn!(matcher = name, subject = type_name, "assertion subject is not a mock endpoint");

    // The subject is borrowed, so only its rendering can travel with the message.
    let printed = ctx.utils().print_debug(&subject);
    let hint = ctx.hint(name);

    Err(AssertionResult::rejected(Rejection::InvalidSubject, move || {
        format!(
            "{hint}\n\nExpected the subject to be a valid mock endpoint.\n\
             Received: {type_name}\n  {printed}"
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_passes_guard() {
        let endpoint = MockEndpoint::new("ws://localhost:1234");
        let resolved = guard::<(), ()>(&MatcherContext::default(), &endpoint, "probe");
        assert!(resolved.is_ok());
    }

    #[test]
    fn other_subject_is_rejected_under_both_polarities() {
        for negated in [false, true] {
            let ctx = MatcherContext::new(negated);
            let Err(result) = guard::<(), ()>(&ctx, &"boom", "probe") else {
                panic!("string subject must be rejected");
            };

            assert_eq!(result.rejection(), Some(Rejection::InvalidSubject));
            assert!(result.is_failure(negated));
        }
    }

    #[test]
    fn rejection_message_names_type_and_value() {
        let ctx = MatcherContext::new(true);
        let Err(result) = guard::<(), ()>(&ctx, &"boom", "probe") else {
            panic!("string subject must be rejected");
        };

        assert_eq!(
            result.message(),
            "expect(endpoint).not.probe(expected)\n\n\
             Expected the subject to be a valid mock endpoint.\n\
             Received: &str\n  \"boom\""
        );
    }
}
