//! The mock endpoint.
//!
//! `MockEndpoint` is the server side of a simulated socket connection. Clients
//! attach with [`MockEndpoint::connect`] and send text; every accepted message
//! is appended to an ordered log and queued for [`MockEndpoint::next_message`]
//! in the same critical section, so the log order and the notification order
//! never diverge.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use serde::Deserialize;
use tokio::sync::{Mutex as AsyncMutex, mpsc, watch};

use crate::{EndpointError, Message, MockClient, Protocol};

/// Default URL used when none is configured.
pub const DEFAULT_URL: &str = "ws://localhost:1234";

/// Endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Address the endpoint pretends to listen on. Informational only.
    pub url: String,
    /// How incoming client text is decoded.
    pub protocol: Protocol,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self { url: DEFAULT_URL.to_owned(), protocol: Protocol::Raw }
    }
}

impl EndpointConfig {
    /// Configuration for the given URL with the raw protocol.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Self::default() }
    }

    /// Set the decoding protocol.
    #[must_use]
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }
}

struct State {
    /// Every accepted message, in arrival order
    log: Vec<Message>,
    /// Queue feeding `next_message`. `None` once closed.
    queue: Option<mpsc::UnboundedSender<Message>>,
    /// Per-client outboxes for server-to-client traffic
    outboxes: Vec<(u64, mpsc::UnboundedSender<String>)>,
    next_client_id: u64,
}

struct Shared {
    config: EndpointConfig,
    state: Mutex<State>,
    /// Single consumer of the arrival queue
    incoming: AsyncMutex<mpsc::UnboundedReceiver<Message>>,
    /// Number of attached clients
    clients: watch::Sender<usize>,
}

/// In-process mock message endpoint.
///
/// Cloning yields another handle to the same endpoint.
#[derive(Clone)]
pub struct MockEndpoint {
    shared: Arc<Shared>,
}

impl MockEndpoint {
    /// Create an endpoint at `url` using the raw protocol.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_config(EndpointConfig::new(url))
    }

    /// Create an endpoint from an explicit configuration.
    pub fn with_config(config: EndpointConfig) -> Self {
        let (queue, incoming) = mpsc::unbounded_channel();
        let (clients, _) = watch::channel(0);

        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(State {
                    log: Vec::new(),
                    queue: Some(queue),
                    outboxes: Vec::new(),
                    next_client_id: 1,
                }),
                incoming: AsyncMutex::new(incoming),
                clients,
            }),
        }
    }

    /// Endpoint configuration.
    pub fn config(&self) -> &EndpointConfig {
        &self.shared.config
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.shared.config.url
    }

    /// Decoding protocol.
    pub fn protocol(&self) -> Protocol {
        self.shared.config.protocol
    }

    // The log is append-only, so a poisoned guard still holds a valid prefix.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.shared.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach a new client.
    pub fn connect(&self) -> MockClient {
        let (outbox, inbox) = mpsc::unbounded_channel();

        let id = {
            let mut state = self.lock();
            let id = state.next_client_id;
            state.next_client_id += 1;
            if state.queue.is_some() {
                state.outboxes.push((id, outbox));
            }
            id
        };

        self.shared.clients.send_modify(|count| *count += 1);
        tracing::debug!(url = %self.url(), client = id, "client connected");

        MockClient::new(self.clone(), id, inbox)
    }

    pub(crate) fn detach(&self, id: u64) {
        self.lock().outboxes.retain(|(client, _)| *client != id);
        self.shared.clients.send_modify(|count| *count = count.saturating_sub(1));
        tracing::debug!(url = %self.url(), client = id, "client disconnected");
    }

    /// Resolves once at least one client is attached.
    pub async fn connected(&self) {
        let mut clients = self.shared.clients.subscribe();
        // The sender lives as long as `self`, so this only returns once satisfied.
        let _ = clients.wait_for(|count| *count > 0).await;
    }

    /// Number of attached clients.
    pub fn client_count(&self) -> usize {
        *self.shared.clients.borrow()
    }

    /// Accept client text: decode, log and queue it.
    pub(crate) fn accept(&self, text: &str) -> Result<(), EndpointError> {
        let mut state = self.lock();

        let Some(queue) = state.queue.as_ref() else {
            tracing::warn!(url = %self.url(), "message sent to closed endpoint");
            return Err(EndpointError::Closed);
        };

        let message = self.protocol().decode(text)?;
        queue.send(message.clone()).map_err(|_| EndpointError::Closed)?;
        state.log.push(message);

        tracing::trace!(url = %self.url(), index = state.log.len() - 1, "message received");
        Ok(())
    }

    /// Wait for the next not-yet-consumed message.
    ///
    /// Messages are yielded once each, in arrival order. Returns `None` only
    /// after the endpoint is closed and the queue is drained. Dropping the
    /// returned future before it completes does not lose a message.
    pub async fn next_message(&self) -> Option<Message> {
        let mut incoming = self.shared.incoming.lock().await;
        incoming.recv().await
    }

    /// Snapshot of every message received so far, in arrival order.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().log.clone()
    }

    /// Number of messages received so far.
    pub fn message_count(&self) -> usize {
        self.lock().log.len()
    }

    /// Send a message to every attached client.
    ///
    /// Returns the number of clients reached.
    pub fn send(&self, message: impl Into<Message>) -> Result<usize, EndpointError> {
        let wire = message.into().to_wire();
        let mut state = self.lock();

        if state.queue.is_none() {
            return Err(EndpointError::Closed);
        }

        state.outboxes.retain(|(_, outbox)| outbox.send(wire.clone()).is_ok());
        Ok(state.outboxes.len())
    }

    /// Close the endpoint.
    ///
    /// Client sends fail afterwards and client receivers end. Messages already
    /// queued can still be drained with [`Self::next_message`].
    pub fn close(&self) {
        let mut state = self.lock();
        if state.queue.take().is_some() {
            state.outboxes.clear();
            tracing::debug!(url = %self.url(), received = state.log.len(), "endpoint closed");
        }
    }

    /// Whether [`Self::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().queue.is_none()
    }
}

impl fmt::Debug for MockEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockEndpoint")
            .field("url", &self.url())
            .field("protocol", &self.protocol())
            .field("messages", &self.message_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn config_defaults_to_raw_protocol() {
        let config = EndpointConfig::default();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.protocol, Protocol::Raw);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: EndpointConfig = serde_json::from_value(json!({"protocol": "json"})).unwrap();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.protocol, Protocol::Json);
    }

    #[test]
    fn log_preserves_arrival_order() {
        let endpoint = MockEndpoint::new("ws://localhost:1234");
        let client = endpoint.connect();

        client.send("one").unwrap();
        client.send("two").unwrap();
        client.send("three").unwrap();

        assert_eq!(endpoint.messages(), vec!["one".into(), "two".into(), "three".into()]);
    }

    #[test]
    fn client_count_tracks_attach_and_drop() {
        let endpoint = MockEndpoint::new("ws://localhost:1234");
        assert_eq!(endpoint.client_count(), 0);

        let first = endpoint.connect();
        let second = endpoint.connect();
        assert_eq!(endpoint.client_count(), 2);

        drop(first);
        assert_eq!(endpoint.client_count(), 1);
        drop(second);
        assert_eq!(endpoint.client_count(), 0);
    }

    #[test]
    fn closed_endpoint_rejects_traffic() {
        let endpoint = MockEndpoint::new("ws://localhost:1234");
        let client = endpoint.connect();
        endpoint.close();

        assert!(endpoint.is_closed());
        assert!(matches!(client.send("late"), Err(EndpointError::Closed)));
        assert!(matches!(endpoint.send("late"), Err(EndpointError::Closed)));
        assert!(endpoint.messages().is_empty());
    }

    #[test]
    fn malformed_json_is_not_logged() {
        let endpoint = MockEndpoint::with_config(EndpointConfig::default().with_protocol(Protocol::Json));
        let client = endpoint.connect();

        assert!(client.send("not json").is_err());
        assert_eq!(endpoint.message_count(), 0);
    }

    #[test]
    fn debug_shows_url_and_log_length() {
        let endpoint = MockEndpoint::new("ws://localhost:9876");
        let rendered = format!("{endpoint:?}");
        assert!(rendered.contains("ws://localhost:9876"));
        assert!(rendered.contains("messages: 0"));
    }
}
