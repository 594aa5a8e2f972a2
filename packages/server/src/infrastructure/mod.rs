//! Infrastructure layer
//!
//! ドメイン層の trait の具体的な実装と、接続レジストリ・DTO を提供します。

pub mod auth;
pub mod credential_store;
pub mod dto;
pub mod registry;

pub use auth::StaticAuthenticator;
pub use credential_store::{InMemoryCredentialStore, spawn_retention_sweep};
pub use registry::ConnectionRegistry;
