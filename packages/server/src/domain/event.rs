//! Wire events exchanged over a relay connection.
//!
//! Every frame in either direction is an envelope `{"type": ..., "payload": ...}`.
//! The payload stays an opaque JSON value until a handler for the type decodes it.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Client → server: post a chat message to the sender's room.
pub const EVENT_SEND_MESSAGE: &str = "send_message";
/// Server → client: a chat message broadcast to a room.
pub const EVENT_NEW_MESSAGE: &str = "new_message";
/// Client → server: move the connection to another room.
pub const EVENT_CHANGE_ROOM: &str = "change_room";

/// Event envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub payload: Value,
}

impl Event {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }

    /// Decode an envelope from a text frame.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Decode an envelope from a binary frame.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode the payload into the shape expected for this event type.
    pub fn decode_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.payload)
    }
}

/// Payload of `change_room`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRoomPayload {
    pub name: String,
}

/// Payload of `send_message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessagePayload {
    pub message: String,
    pub from: String,
}

/// Payload of `new_message`
///
/// `sent` is the RFC 3339 time at which the server accepted the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessagePayload {
    pub message: String,
    pub from: String,
    pub sent: String,
}

impl From<NewMessagePayload> for Event {
    fn from(payload: NewMessagePayload) -> Self {
        Event::new(
            EVENT_NEW_MESSAGE,
            serde_json::json!({
                "message": payload.message,
                "from": payload.from,
                "sent": payload.sent,
            }),
        )
    }
}

impl From<ChangeRoomPayload> for Event {
    fn from(payload: ChangeRoomPayload) -> Self {
        Event::new(EVENT_CHANGE_ROOM, serde_json::json!({ "name": payload.name }))
    }
}

impl From<SendMessagePayload> for Event {
    fn from(payload: SendMessagePayload) -> Self {
        Event::new(
            EVENT_SEND_MESSAGE,
            serde_json::json!({
                "message": payload.message,
                "from": payload.from,
            }),
        )
    }
}
