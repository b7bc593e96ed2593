//! Built-in kernels.
//!
//! The only assertions exposed to end users. Each is a plain function that
//! satisfies the kernel contract of [`crate::derive`].

mod all_of_messages;
mod next_message;

pub use all_of_messages::{RECEIVED_ALL_OF_MESSAGES, all_of_messages};
pub use next_message::{RECEIVED_NEXT_MESSAGE_EQUALS, next_message_equals};

/// Indent every line of a rendered value by two spaces.
fn indent(rendered: &str) -> String {
    rendered.lines().map(|line| format!("  {line}")).collect::<Vec<_>>().join("\n")
}
