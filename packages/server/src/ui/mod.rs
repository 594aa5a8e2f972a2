//! UI layer: HTTP and WebSocket surface of the relay.

pub mod connection_loop;
pub mod error;
mod handler;
pub mod origin;
mod server;
pub mod signal;
pub mod state;

pub use error::ConnectionError;
pub use origin::OriginPolicy;
pub use server::Server;
pub use state::AppState;
