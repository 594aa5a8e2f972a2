//! Errors that end a connection.

use std::time::Duration;

use thiserror::Error;

/// Fatal to one connection's loops; the connection is removed from the
/// registry. Never affects other connections.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("transport error: {0}")]
    Transport(#[from] axum::Error),

    #[error("malformed event envelope: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to serialize outbound event: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("no heartbeat reply within {0:?}")]
    HeartbeatTimeout(Duration),
}
