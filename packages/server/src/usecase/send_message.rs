//! Handler for `send_message`.
//!
//! ## 概要
//!
//! 受信したチャットメッセージに受理時刻を付けて `new_message` を作り、
//! 送信者と同じルームの全ての接続（送信者自身を含む）にブロードキャストします。

use std::sync::Arc;

use async_trait::async_trait;
use relay_shared::time::{Clock, millis_to_rfc3339};

use crate::{
    domain::{Connection, Event, EventError, NewMessagePayload, SendMessagePayload},
    infrastructure::ConnectionRegistry,
};

use super::event_router::EventHandler;

pub struct SendMessageHandler {
    registry: Arc<ConnectionRegistry>,
    clock: Arc<dyn Clock>,
}

impl SendMessageHandler {
    pub fn new(registry: Arc<ConnectionRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }
}

#[async_trait]
impl EventHandler for SendMessageHandler {
    async fn handle(&self, event: &Event, connection: &Connection) -> Result<(), EventError> {
        let request: SendMessagePayload = event.decode_payload().map_err(EventError::BadPayload)?;

        let broadcast: Event = NewMessagePayload {
            message: request.message,
            from: request.from,
            sent: millis_to_rfc3339(self.clock.now_millis()),
        }
        .into();

        let room = connection.room();
        let delivered = self.registry.broadcast(&room, &broadcast).await;
        tracing::debug!(
            "Connection {} sent a message to room '{}' ({} recipient(s))",
            connection.id(),
            room,
            delivered
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use relay_shared::time::FixedClock;

    use super::*;
    use crate::domain::{EVENT_NEW_MESSAGE, OutboundReceiver};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【どのようなシナリオをテストするか】
    // 1. A と B が lobby、C が other にいるとき、A の発言は A と B にだけ届く
    // 2. 不正な payload は BadPayload になり、誰にも届かない
    // ========================================

    async fn join(registry: &ConnectionRegistry, room: &str) -> (Arc<Connection>, OutboundReceiver) {
        let (connection, rx) = Connection::new(8);
        connection.set_room(room);
        registry.add(connection.clone()).await;
        (connection, rx)
    }

    fn handler(registry: Arc<ConnectionRegistry>) -> SendMessageHandler {
        // 2023-01-01T00:00:00.000Z
        SendMessageHandler::new(registry, Arc::new(FixedClock::new(1_672_531_200_000)))
    }

    #[tokio::test]
    async fn test_message_is_broadcast_to_sender_room() {
        // テスト項目: 同じルームのメンバーにだけ new_message が届く
        // given (前提条件):
        let registry = Arc::new(ConnectionRegistry::new());
        let (a, mut rx_a) = join(&registry, "lobby").await;
        let (_b, mut rx_b) = join(&registry, "lobby").await;
        let (_c, mut rx_c) = join(&registry, "other").await;
        let event = Event::from(SendMessagePayload {
            message: "hi".to_string(),
            from: "alice".to_string(),
        });

        // when (操作):
        let result = handler(registry.clone()).handle(&event, &a).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let received = rx_b.try_recv().unwrap();
        assert_eq!(received.event_type, EVENT_NEW_MESSAGE);
        let payload: NewMessagePayload = received.decode_payload().unwrap();
        assert_eq!(
            payload,
            NewMessagePayload {
                message: "hi".to_string(),
                from: "alice".to_string(),
                sent: "2023-01-01T00:00:00.000Z".to_string(),
            }
        );
        assert!(rx_a.try_recv().is_ok());
        assert!(rx_c.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_bad_payload_broadcasts_nothing() {
        // テスト項目: 不正な payload では何も配信されない
        // given (前提条件):
        let registry = Arc::new(ConnectionRegistry::new());
        let (a, mut rx_a) = join(&registry, "lobby").await;
        let event = Event::new("send_message", serde_json::json!("not an object"));

        // when (操作):
        let result = handler(registry.clone()).handle(&event, &a).await;

        // then (期待する結果):
        assert!(matches!(result, Err(EventError::BadPayload(_))));
        assert!(rx_a.try_recv().is_err());
    }
}
