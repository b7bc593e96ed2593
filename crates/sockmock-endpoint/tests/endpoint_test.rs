//! Endpoint behavior tests.
//!
//! Cover the ordering and delivery guarantees the assertion engine relies on:
//! arrival order, exactly-once notification, and no loss when a wait is
//! abandoned.

use std::time::Duration;

use proptest::prelude::*;
use serde_json::json;
use sockmock_endpoint::{EndpointConfig, Message, MockEndpoint, Protocol};

#[tokio::test]
async fn connected_resolves_after_client_attaches() {
    let server = MockEndpoint::new("ws://localhost:1234");

    let waiter = {
        let server = server.clone();
        tokio::spawn(async move { server.connected().await })
    };

    let _client = server.connect();
    waiter.await.expect("connected task panicked");
    assert_eq!(server.client_count(), 1);
}

#[tokio::test]
async fn next_message_yields_each_message_once_in_order() {
    let server = MockEndpoint::new("ws://localhost:1234");
    let client = server.connect();

    client.send("hello there").unwrap();
    client.send("how are you?").unwrap();

    assert_eq!(server.next_message().await, Some(Message::from("hello there")));
    assert_eq!(server.next_message().await, Some(Message::from("how are you?")));
    assert_eq!(server.message_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn abandoned_wait_does_not_drop_late_message() {
    let server = MockEndpoint::new("ws://localhost:1234");
    let client = server.connect();

    let waited = tokio::time::timeout(Duration::from_millis(100), server.next_message()).await;
    assert!(waited.is_err(), "nothing was sent yet");

    client.send("late").unwrap();
    assert_eq!(server.next_message().await, Some(Message::from("late")));
}

#[tokio::test]
async fn json_protocol_logs_deserialized_values() {
    let server = MockEndpoint::with_config(
        EndpointConfig::new("ws://localhost:9876").with_protocol(Protocol::Json),
    );
    let client = server.connect();

    client.send(r#"{"type":"GREETING","payload":"hello there"}"#).unwrap();

    let message = server.next_message().await.unwrap();
    assert_eq!(message, Message::Json(json!({"type": "GREETING", "payload": "hello there"})));
}

#[tokio::test]
async fn server_messages_reach_every_client() {
    let server = MockEndpoint::new("ws://localhost:1234");
    let mut alice = server.connect();
    let mut bob = server.connect();

    let reached = server.send(json!({"answer": 42})).unwrap();
    assert_eq!(reached, 2);

    assert_eq!(alice.recv().await.as_deref(), Some(r#"{"answer":42}"#));
    assert_eq!(bob.recv().await.as_deref(), Some(r#"{"answer":42}"#));
}

#[tokio::test]
async fn close_ends_clients_and_drains_queue() {
    let server = MockEndpoint::new("ws://localhost:1234");
    let mut client = server.connect();

    client.send("queued").unwrap();
    server.close();

    assert_eq!(client.recv().await, None);
    assert_eq!(server.next_message().await, Some(Message::from("queued")));
    assert_eq!(server.next_message().await, None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The log always mirrors send order, whatever the payloads are.
    #[test]
    fn prop_log_mirrors_send_order(payloads in prop::collection::vec(".{0,16}", 0..32)) {
        let server = MockEndpoint::new("ws://localhost:1234");
        let client = server.connect();

        for payload in &payloads {
            client.send(payload).unwrap();
        }

        let logged: Vec<Message> = server.messages();
        let expected: Vec<Message> = payloads.iter().map(|p| Message::from(p.as_str())).collect();
        prop_assert_eq!(logged, expected);
    }
}
