//! Endpoint error types.

use thiserror::Error;

/// Errors raised by the mock endpoint and its clients.
#[derive(Error, Debug)]
pub enum EndpointError {
    /// The endpoint was closed; no further traffic is accepted.
    #[error("endpoint closed")]
    Closed,

    /// Client text could not be decoded under the JSON protocol.
    #[error("failed to deserialize message: {source}")]
    Deserialize {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}
