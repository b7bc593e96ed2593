//! Messages as seen by the endpoint.
//!
//! A message is either the raw text a client sent or, when the endpoint runs
//! the JSON protocol, the deserialized value. Both compare through their JSON
//! view so an assertion can be written against either shape.

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EndpointError;

/// Wire protocol applied to incoming client text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Messages are kept as the raw text that was sent.
    #[default]
    Raw,
    /// Messages are parsed as JSON on arrival.
    Json,
}

impl Protocol {
    /// Decode client text into a [`Message`] according to this protocol.
    pub fn decode(self, text: &str) -> Result<Message, EndpointError> {
        match self {
            Self::Raw => Ok(Message::Text(text.to_owned())),
            Self::Json => serde_json::from_str(text)
                .map(Message::Json)
                .map_err(|source| EndpointError::Deserialize { source }),
        }
    }
}

/// A single message received by (or sent from) the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// Raw text.
    Text(String),
    /// Deserialized structured value.
    Json(Value),
}

impl Message {
    /// JSON view of the message, used for comparison and printing.
    ///
    /// Text is viewed as a JSON string.
    pub fn as_value(&self) -> Cow<'_, Value> {
        match self {
            Self::Text(text) => Cow::Owned(Value::String(text.clone())),
            Self::Json(value) => Cow::Borrowed(value),
        }
    }

    /// Consume the message into its JSON view.
    pub fn into_value(self) -> Value {
        match self {
            Self::Text(text) => Value::String(text),
            Self::Json(value) => value,
        }
    }

    /// Wire form of the message: text as-is, JSON serialized compactly.
    pub fn to_wire(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Json(value) => value.to_string(),
        }
    }

    /// Raw text, if this is a text message.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Json(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn raw_protocol_keeps_text() {
        let message = Protocol::Raw.decode(r#"{"answer":42}"#).unwrap();
        assert_eq!(message, Message::Text(r#"{"answer":42}"#.into()));
    }

    #[test]
    fn json_protocol_parses_text() {
        let message = Protocol::Json.decode(r#"{"answer":42}"#).unwrap();
        assert_eq!(message, Message::Json(json!({"answer": 42})));
    }

    #[test]
    fn json_protocol_rejects_malformed_text() {
        let err = Protocol::Json.decode("hello there").unwrap_err();
        assert!(matches!(err, EndpointError::Deserialize { .. }));
    }

    #[test]
    fn text_and_json_string_share_a_view() {
        let text = Message::from("x");
        let json = Message::from(json!("x"));
        assert_eq!(text.as_value(), json.as_value());
        assert_ne!(Message::from(r#"{"a":1}"#).as_value(), Message::from(json!({"a": 1})).as_value());
    }

    #[test]
    fn wire_form_serializes_json() {
        assert_eq!(Message::from(json!({"a": 1})).to_wire(), r#"{"a":1}"#);
        assert_eq!(Message::from("hi").to_wire(), "hi");
    }
}
