//! Data Transfer Objects (DTOs) for the HTTP surface.
//!
//! WebSocket frames use the domain `Event` envelope directly.

pub mod http;
