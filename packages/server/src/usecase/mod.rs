//! UseCase layer
//!
//! - 認証とワンタイムパスワードの発行・検証
//! - 受信イベントの型によるルーティングとハンドラ

pub mod authorize_connection;
pub mod change_room;
pub mod event_router;
pub mod issue_credential;
pub mod send_message;

pub use authorize_connection::AuthorizeConnectionUseCase;
pub use change_room::ChangeRoomHandler;
pub use event_router::{EventHandler, EventRouter};
pub use issue_credential::IssueCredentialUseCase;
pub use send_message::SendMessageHandler;
