//! WebSocket upgrade handler.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header::ORIGIN},
    response::IntoResponse,
};
use futures_util::StreamExt;

use crate::{
    domain::{AuthError, Connection},
    infrastructure::dto::http::ConnectQuery,
    ui::{
        connection_loop::{log_loop_exit, read_loop, write_loop},
        state::AppState,
    },
};

/// Admit a connection.
///
/// A request without a token is 401 regardless of origin. The origin is
/// checked before the token is verified so that a rejected cross-origin
/// request does not consume it.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    let Some(otp) = query.otp.as_deref().filter(|otp| !otp.is_empty()) else {
        tracing::warn!("Rejected upgrade: {}", AuthError::MissingOtp);
        return Err(StatusCode::UNAUTHORIZED);
    };

    let origin = headers.get(ORIGIN).and_then(|value| value.to_str().ok());
    if !state.origin_policy.is_allowed(origin) {
        tracing::warn!("Rejected upgrade from origin {:?}", origin);
        return Err(StatusCode::FORBIDDEN);
    }

    if let Err(e) = state.authorize_connection_usecase.execute(Some(otp)).await {
        tracing::warn!("Rejected upgrade: {}", e);
        return Err(StatusCode::UNAUTHORIZED);
    }

    tracing::info!("New connection authorized");
    let max_message_size = state.config.max_message_size;
    Ok(ws
        .max_message_size(max_message_size)
        .on_upgrade(move |socket| handle_socket(socket, state)))
}

/// Register the connection, run both loops to completion, and retire it.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (connection, outbound) = Connection::new(state.config.outbound_capacity);
    let id = connection.id();
    state.registry.add(connection.clone()).await;

    let (sender, receiver) = socket.split();

    let read_task = tokio::spawn({
        let state = state.clone();
        let connection = connection.clone();
        async move {
            let result = read_loop(
                receiver,
                connection,
                state.router.clone(),
                state.config.pong_wait,
            )
            .await;
            log_loop_exit("read", id, &result);
            state.registry.remove(id).await;
        }
    });

    let write_task = tokio::spawn({
        let state = state.clone();
        let connection = connection.clone();
        async move {
            let result = write_loop(sender, outbound, connection, state.config.ping_interval()).await;
            log_loop_exit("write", id, &result);
            state.registry.remove(id).await;
        }
    });

    let (read_result, write_result) = tokio::join!(read_task, write_task);
    for result in [read_result, write_result] {
        if let Err(e) = result {
            tracing::error!("Connection {} loop panicked: {}", id, e);
        }
    }

    // a panicked loop skips its own removal
    state.registry.remove(id).await;
    connection.mark_closed();
    tracing::info!("Connection {} closed", id);
}
