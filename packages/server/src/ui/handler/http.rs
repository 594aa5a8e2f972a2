//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{HealthResponse, LoginRequest, LoginResponse},
    ui::state::AppState,
};

/// Exchange a username/password for a one-time password.
///
/// 200 with `{"otp": ...}` on success, 401 without a body for wrong or
/// missing credentials. A body that is not a JSON object (bad syntax, wrong
/// content type) is 400.
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, StatusCode> {
    let Json(request) = request.map_err(|rejection| {
        tracing::warn!("Malformed login request: {}", rejection);
        StatusCode::BAD_REQUEST
    })?;

    match state
        .issue_credential_usecase
        .execute(&request.username, &request.password)
        .await
    {
        Ok(otp) => {
            tracing::info!("Issued one-time password for '{}'", request.username);
            Ok(Json(LoginResponse { otp: otp.key }))
        }
        Err(e) => {
            tracing::warn!("Login rejected for '{}': {}", request.username, e);
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        connections: state.registry.len().await,
    })
}
