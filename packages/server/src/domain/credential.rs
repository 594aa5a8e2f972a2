//! One-time passwords and the traits that issue, verify and authenticate them.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

/// Single-use token exchanged for permission to open a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Otp {
    pub key: String,
    /// Unix milliseconds
    pub created_at: i64,
}

impl Otp {
    pub fn new(key: impl Into<String>, created_at: i64) -> Self {
        Self {
            key: key.into(),
            created_at,
        }
    }

    /// Create a token with a fresh random key.
    pub fn generate(created_at: i64) -> Self {
        Self::new(Uuid::new_v4().to_string(), created_at)
    }

    /// True once `created_at + retention` lies strictly before `now`.
    pub fn is_expired(&self, now: i64, retention: Duration) -> bool {
        let retention = i64::try_from(retention.as_millis()).unwrap_or(i64::MAX);
        self.created_at.saturating_add(retention) < now
    }
}

/// Time-bounded store of single-use tokens.
///
/// Implementations must make issue, verify and expiry mutually exclusive so
/// that a key appears and disappears atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create, store and return a new token.
    async fn issue(&self) -> Otp;

    /// Return true and delete the token iff `key` is currently stored.
    async fn verify_and_consume(&self, key: &str) -> bool;

    /// Delete every expired token and return how many were removed.
    async fn remove_expired(&self) -> usize;
}

/// Username/password check performed before a token is issued.
#[cfg_attr(test, mockall::automock)]
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> bool;
}
