//! ワンタイムパスワードの保存と期限切れ削除
//!
//! - `inmemory`: HashMap を使った `CredentialStore` 実装
//! - `retention`: 期限切れトークンを定期的に削除するバックグラウンドタスク

pub mod inmemory;
pub mod retention;

pub use inmemory::InMemoryCredentialStore;
pub use retention::spawn_retention_sweep;
