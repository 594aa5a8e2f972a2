//! CLI chat client for the relay server.
//!
//! Logs in over HTTP for a one-time password, opens the WebSocket with it,
//! joins a room and relays lines typed at the prompt.

pub mod command;
pub mod error;
pub mod formatter;
pub mod session;

pub use error::ClientError;
pub use session::{SessionOptions, run_session};
