//! Request handlers.

mod http;
mod websocket;

pub use http::{health_check, login_handler};
pub use websocket::websocket_handler;
