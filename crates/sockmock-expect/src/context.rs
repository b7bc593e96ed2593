//! Per-invocation matcher context and injected capabilities.
//!
//! The engine never compares, prints or diffs values itself. It asks the
//! [`MatcherUtils`] carried by the [`MatcherContext`], which callers may
//! replace. [`DefaultUtils`] compares JSON views structurally, prints them as
//! JSON and diffs them line by line.

use std::{fmt, fmt::Write as _, sync::Arc};

use serde_json::Value;
use similar::{ChangeTag, TextDiff};
use sockmock_endpoint::Message;

use crate::ExpectConfig;

/// Label for the subject in matcher hints.
pub const RECEIVED_LABEL: &str = "endpoint";

/// Label for the expected argument in matcher hints.
pub const EXPECTED_LABEL: &str = "expected";

/// Comparison and rendering capabilities supplied to kernels.
pub trait MatcherUtils: Send + Sync {
    /// Deep equality.
    fn equals(&self, a: &Value, b: &Value) -> bool;

    /// One-line call signature shown at the top of a failure message.
    ///
    /// `matcher` includes its leading `.` and any `.not` prefix.
    fn matcher_hint(&self, matcher: &str, received: &str, expected: &str) -> String;

    /// Render an expected value.
    fn print_expected(&self, value: &Value) -> String;

    /// Render a received value.
    fn print_received(&self, value: &Value) -> String;

    /// Render an arbitrary subject.
    fn print_debug(&self, value: &dyn fmt::Debug) -> String;

    /// Structural difference between an expected and a received value.
    fn diff(&self, expected: &Value, received: &Value) -> String;
}

/// Default capabilities backed by `serde_json` and `similar`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultUtils;

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn print_value(value: &Value) -> String {
    match value {
        Value::String(text) => format!("\"{text}\""),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

// Strings diff on their content, not their quoted form.
fn diff_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => print_value(other),
    }
}

impl MatcherUtils for DefaultUtils {
    fn equals(&self, a: &Value, b: &Value) -> bool {
        a == b
    }

    fn matcher_hint(&self, matcher: &str, received: &str, expected: &str) -> String {
        format!("expect({received}){matcher}({expected})")
    }

    fn print_expected(&self, value: &Value) -> String {
        print_value(value)
    }

    fn print_received(&self, value: &Value) -> String {
        print_value(value)
    }

    fn print_debug(&self, value: &dyn fmt::Debug) -> String {
        format!("{value:?}")
    }

    fn diff(&self, expected: &Value, received: &Value) -> String {
        let (expected_kind, received_kind) = (kind(expected), kind(received));
        if expected_kind != received_kind {
            return format!(
                "  Comparing two different types of values. \
                 Expected {expected_kind} but received {received_kind}."
            );
        }

        let (old, new) = (diff_text(expected), diff_text(received));
        if old == new {
            return "Compared values have no visual difference.".to_owned();
        }

        let mut out = String::from("- Expected\n+ Received\n\n");
        for change in TextDiff::from_lines(old.as_str(), new.as_str()).iter_all_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "- ",
                ChangeTag::Insert => "+ ",
                ChangeTag::Equal => "  ",
            };
            let _ = writeln!(out, "{sign}{}", change.value().trim_end_matches('\n'));
        }
        out.pop();
        out
    }
}

/// State handed to every assertion invocation.
#[derive(Clone)]
pub struct MatcherContext {
    negated: bool,
    utils: Arc<dyn MatcherUtils>,
    config: ExpectConfig,
}

impl MatcherContext {
    /// Context with default capabilities and configuration.
    pub fn new(negated: bool) -> Self {
        Self { negated, utils: Arc::new(DefaultUtils), config: ExpectConfig::default() }
    }

    /// Replace the capabilities.
    #[must_use]
    pub fn with_utils(mut self, utils: Arc<dyn MatcherUtils>) -> Self {
        self.utils = utils;
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ExpectConfig) -> Self {
        self.config = config;
        self
    }

    /// Flip the polarity.
    #[must_use]
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Whether the assertion is evaluated as "must NOT hold".
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Injected capabilities.
    pub fn utils(&self) -> &Arc<dyn MatcherUtils> {
        &self.utils
    }

    /// Active configuration.
    pub fn config(&self) -> &ExpectConfig {
        &self.config
    }

    /// Deep equality over the JSON views of two messages.
    pub fn equals(&self, a: &Message, b: &Message) -> bool {
        self.utils.equals(&a.as_value(), &b.as_value())
    }

    /// Matcher hint for `name` under the context's own polarity.
    pub fn hint(&self, name: &str) -> String {
        self.hint_as(name, self.negated)
    }

    /// Matcher hint for `name` rendered as negated or not.
    pub fn hint_as(&self, name: &str, negated: bool) -> String {
        let prefix = if negated { ".not" } else { "" };
        self.utils.matcher_hint(&format!("{prefix}.{name}"), RECEIVED_LABEL, EXPECTED_LABEL)
    }
}

impl Default for MatcherContext {
    fn default() -> Self {
        Self::new(false)
    }
}

impl fmt::Debug for MatcherContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatcherContext")
            .field("negated", &self.negated)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
