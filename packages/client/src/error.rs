//! Client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("login rejected: invalid username or password")]
    LoginRejected,

    #[error("login request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("connection refused by server with status {0}")]
    ConnectionRefused(u16),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("invalid Origin header value: {0}")]
    InvalidOrigin(String),

    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("connection lost")]
    ConnectionLost,
}

impl ClientError {
    /// Rejections that retrying with the same input cannot fix.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::LoginRejected | Self::ConnectionRefused(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_classified() {
        // テスト項目: 認証系の拒否のみ rejection と判定される
        // given (前提条件):
        let rejected = [ClientError::LoginRejected, ClientError::ConnectionRefused(401)];
        let lost = ClientError::ConnectionLost;

        // when (操作) / then (期待する結果):
        assert!(rejected.iter().all(ClientError::is_rejection));
        assert!(!lost.is_rejection());
    }

    #[test]
    fn test_connection_refused_message_includes_status() {
        // given (前提条件):
        let error = ClientError::ConnectionRefused(403);

        // when (操作):
        let message = error.to_string();

        // then (期待する結果):
        assert_eq!(message, "connection refused by server with status 403");
    }
}
