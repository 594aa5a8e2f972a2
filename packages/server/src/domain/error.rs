//! Domain errors.

use thiserror::Error;

/// Admission failures. Surfaced to HTTP clients as 401 without a body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("one-time password is missing")]
    MissingOtp,

    #[error("one-time password is invalid, expired or already used")]
    InvalidOtp,

    #[error("invalid username or password")]
    InvalidCredentials,
}

/// Per-message failures while routing an inbound event.
///
/// These are logged and the message is dropped; the connection stays open.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("there is no handler for event type '{0}'")]
    UnknownEventType(String),

    #[error("bad payload in request: {0}")]
    BadPayload(#[source] serde_json::Error),
}

/// Failure to place an event on a connection's outbound queue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnqueueError {
    #[error("outbound queue is full")]
    Full,

    #[error("connection is closed")]
    Closed,
}
