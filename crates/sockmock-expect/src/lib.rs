//! Derived assertions over messages received by a mock endpoint.
//!
//! The interesting part is the derivation engine: it turns a *kernel* (a
//! plain comparison function) into a complete assertion with subject
//! validation, bounded async waiting, negation handling and lazily rendered
//! failure messages.
//!
//! # Architecture
//!
//! - [`guard()`]: resolves the subject to a [`MockEndpoint`] or rejects it
//! - [`derive_single`]: guard + race of the next message against a deadline
//! - [`derive_aggregate`]: guard + the full received log
//! - [`matchers`]: the built-in kernels
//! - [`expect`]: binds a subject to a [`MatcherContext`] and settles results
//!
//! Comparison, printing and diffing are capabilities injected through
//! [`MatcherUtils`]; the engine only decides when they run.
//!
//! # Usage
//!
//! ```ignore
//! let server = MockEndpoint::new("ws://localhost:1234");
//! let client = server.connect();
//!
//! client.send("hello there")?;
//! expect(&server).received_next_message_equals("hello there").await?;
//! expect(&server).received_all_of_messages(["hello there"])?;
//! expect(&server).not().received_all_of_messages(["'sup?"])?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
pub mod derive;
mod error;
mod expectation;
mod guard;
pub mod matchers;
mod result;
mod subject;
mod tracing_config;

pub use config::{DEFAULT_TIMEOUT, ExpectConfig, ReceiveOptions};
pub use context::{DefaultUtils, EXPECTED_LABEL, MatcherContext, MatcherUtils, RECEIVED_LABEL};
pub use derive::{AggregateAssertion, SingleMessageAssertion, derive_aggregate, derive_single};
pub use error::AssertionError;
pub use expectation::{Expectation, expect};
pub use guard::guard;
pub use result::{AssertionResult, LazyMessage, Rejection, Verdict};
pub use sockmock_endpoint::{Message, MockEndpoint};
pub use subject::Subject;
pub use tracing_config::{init_test_tracing, init_test_tracing_with_filter};
