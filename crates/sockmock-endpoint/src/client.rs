//! Client side of a mock connection.

use std::fmt;

use tokio::sync::mpsc;

use crate::{EndpointError, MockEndpoint};

/// A client attached to a [`MockEndpoint`].
///
/// Dropping the client detaches it from the endpoint.
pub struct MockClient {
    endpoint: MockEndpoint,
    id: u64,
    /// Messages sent by the endpoint to this client
    inbox: mpsc::UnboundedReceiver<String>,
}

impl MockClient {
    pub(crate) fn new(
        endpoint: MockEndpoint,
        id: u64,
        inbox: mpsc::UnboundedReceiver<String>,
    ) -> Self {
        Self { endpoint, id, inbox }
    }

    /// Client identifier, unique per endpoint.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Send text to the endpoint.
    ///
    /// Under the JSON protocol the text must be valid JSON.
    pub fn send(&self, text: impl AsRef<str>) -> Result<(), EndpointError> {
        self.endpoint.accept(text.as_ref())
    }

    /// Wait for the next message sent by the endpoint.
    ///
    /// Returns `None` once the endpoint is closed and the inbox is drained.
    pub async fn recv(&mut self) -> Option<String> {
        self.inbox.recv().await
    }

    /// Next message sent by the endpoint, if one is already waiting.
    pub fn try_recv(&mut self) -> Option<String> {
        self.inbox.try_recv().ok()
    }
}

impl Drop for MockClient {
    fn drop(&mut self) {
        self.endpoint.detach(self.id);
    }
}

impl fmt::Debug for MockClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockClient")
            .field("id", &self.id)
            .field("url", &self.endpoint.url())
            .finish_non_exhaustive()
    }
}
