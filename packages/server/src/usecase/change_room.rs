//! Handler for `change_room`.

use async_trait::async_trait;

use crate::domain::{ChangeRoomPayload, Connection, Event, EventError};

use super::event_router::EventHandler;

/// Moves the sending connection into the requested room.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChangeRoomHandler;

#[async_trait]
impl EventHandler for ChangeRoomHandler {
    async fn handle(&self, event: &Event, connection: &Connection) -> Result<(), EventError> {
        let payload: ChangeRoomPayload = event.decode_payload().map_err(EventError::BadPayload)?;
        tracing::debug!(
            "Connection {} moves from room '{}' to '{}'",
            connection.id(),
            connection.room(),
            payload.name
        );
        connection.set_room(payload.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_change_room_sets_room() {
        // テスト項目: change_room で接続のルームが変わる
        // given (前提条件):
        let (connection, _rx) = Connection::new(4);
        let event = Event::from(ChangeRoomPayload {
            name: "lobby".to_string(),
        });

        // when (操作):
        let result = ChangeRoomHandler.handle(&event, &connection).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(connection.room(), "lobby");
    }

    #[tokio::test]
    async fn test_bad_payload_leaves_room_unchanged() {
        // テスト項目: 不正な payload は BadPayload になり、ルームは変わらない
        // given (前提条件):
        let (connection, _rx) = Connection::new(4);
        connection.set_room("lobby");
        let event = Event::new("change_room", serde_json::json!({ "room": 42 }));

        // when (操作):
        let result = ChangeRoomHandler.handle(&event, &connection).await;

        // then (期待する結果):
        assert!(matches!(result, Err(EventError::BadPayload(_))));
        assert_eq!(connection.room(), "lobby");
    }
}
