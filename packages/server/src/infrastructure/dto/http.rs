//! HTTP request/response bodies and query parameters.

use serde::{Deserialize, Serialize};

/// Query parameters of the WebSocket upgrade request
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    pub otp: Option<String>,
}

/// Body of `POST /login`
///
/// Missing fields read as empty and fail authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful `POST /login` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub otp: String,
}

/// `GET /api/health` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub connections: usize,
}
