//! Room-scoped WebSocket relay.
//!
//! Clients log in over HTTP to obtain a single-use token, open a WebSocket
//! with it, join a room with `change_room` and chat with `send_message`.
//! Every `new_message` is fanned out to the current members of the sender's
//! room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
