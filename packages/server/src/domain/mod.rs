//! Domain layer
//!
//! 接続・イベント・ワンタイムパスワードのドメインモデルと、
//! 外部実装に依存しないための trait を定義します。

pub mod connection;
pub mod credential;
pub mod error;
pub mod event;

pub use connection::{Connection, ConnectionId, ConnectionState, OutboundReceiver};
pub use credential::{Authenticator, CredentialStore, Otp};
#[cfg(test)]
pub use credential::{MockAuthenticator, MockCredentialStore};
pub use error::{AuthError, EnqueueError, EventError};
pub use event::{
    ChangeRoomPayload, EVENT_CHANGE_ROOM, EVENT_NEW_MESSAGE, EVENT_SEND_MESSAGE, Event,
    NewMessagePayload, SendMessagePayload,
};
