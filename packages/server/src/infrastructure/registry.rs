//! Registry of live connections.
//!
//! ## 設計ノート
//!
//! - 追加・削除は書き込みロック、ブロードキャストは読み込みロックで列挙します
//! - ブロードキャストは `try_send` のみを使い、ロック中に待機しません
//! - キューが満杯の接続（遅いクライアント）はロック解放後に切断します

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::domain::{Connection, ConnectionId, EnqueueError, Event};

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, Arc<Connection>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and mark it active.
    pub async fn add(&self, connection: Arc<Connection>) {
        let mut connections = self.connections.write().await;
        connection.activate();
        connections.insert(connection.id(), connection.clone());
        tracing::info!(
            "Connection {} registered ({} live)",
            connection.id(),
            connections.len()
        );
    }

    /// Close and forget a connection.
    ///
    /// Returns false if it was not registered; removing twice is a no-op.
    pub async fn remove(&self, id: ConnectionId) -> bool {
        let mut connections = self.connections.write().await;
        match connections.remove(&id) {
            Some(connection) => {
                connection.close();
                tracing::info!(
                    "Connection {} removed ({} live)",
                    id,
                    connections.len()
                );
                true
            }
            None => false,
        }
    }

    /// Queue `event` for every connection currently in `room`.
    ///
    /// Returns the number of connections the event was queued for. Members
    /// whose queue is full are disconnected once enumeration is done.
    pub async fn broadcast(&self, room: &str, event: &Event) -> usize {
        let mut delivered = 0;
        let mut slow_consumers = Vec::new();

        {
            let connections = self.connections.read().await;
            for connection in connections.values().filter(|c| c.in_room(room)) {
                match connection.enqueue(event.clone()) {
                    Ok(()) => delivered += 1,
                    Err(EnqueueError::Full) => {
                        tracing::warn!(
                            "Outbound queue of connection {} is full, disconnecting",
                            connection.id()
                        );
                        slow_consumers.push(connection.id());
                    }
                    Err(EnqueueError::Closed) => {
                        tracing::debug!(
                            "Connection {} is closing, skipping broadcast",
                            connection.id()
                        );
                    }
                }
            }
        }

        for id in slow_consumers {
            self.remove(id).await;
        }

        tracing::debug!(
            "Broadcast '{}' to {} member(s) of room '{}'",
            event.event_type,
            delivered,
            room
        );
        delivered
    }

    /// Close every connection, e.g. on server shutdown.
    pub async fn close_all(&self) -> usize {
        let mut connections = self.connections.write().await;
        let count = connections.len();
        for (_, connection) in connections.drain() {
            connection.close();
        }
        count
    }

    pub async fn get(&self, id: ConnectionId) -> Option<Arc<Connection>> {
        self.connections.read().await.get(&id).cloned()
    }

    pub async fn contains(&self, id: ConnectionId) -> bool {
        self.connections.read().await.contains_key(&id)
    }

    /// Number of live connections currently in `room`.
    pub async fn count_in_room(&self, room: &str) -> usize {
        self.connections
            .read()
            .await
            .values()
            .filter(|c| c.in_room(room))
            .count()
    }

    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}
