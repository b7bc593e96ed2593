//! In-process mock message endpoint.
//!
//! The server side of a simulated socket connection. Clients attach and send
//! text; the endpoint keeps an append-only, arrival-ordered log of everything
//! it received and exposes a single-consumer "next message" wait that yields
//! each message exactly once in the same order.
//!
//! With [`Protocol::Json`] incoming text is deserialized on arrival, so tests
//! can compare structured values instead of raw strings.
//!
//! # Usage
//!
//! ```ignore
//! let server = MockEndpoint::new("ws://localhost:1234");
//! let client = server.connect();
//! server.connected().await;
//!
//! client.send("hello there")?;
//! assert_eq!(server.next_message().await, Some("hello there".into()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod endpoint;
mod error;
mod message;

pub use client::MockClient;
pub use endpoint::{DEFAULT_URL, EndpointConfig, MockEndpoint};
pub use error::EndpointError;
pub use message::{Message, Protocol};
