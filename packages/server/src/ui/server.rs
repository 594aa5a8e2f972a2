//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use super::{
    handler::{health_check, login_handler, websocket_handler},
    state::AppState,
};

/// Relay HTTP/WebSocket server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(Arc::new(state));
/// server.run("127.0.0.1".to_string(), 8080, shutdown).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/login", post(login_handler))
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind to `host:port` and serve until `shutdown` is cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if binding fails or the server stops abnormally.
    pub async fn run(
        self,
        host: String,
        port: u16,
        shutdown: CancellationToken,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Relay server listening on {}", listener.local_addr()?);
        tracing::info!("Login at: http://{}/login", bind_addr);
        tracing::info!("Connect to: ws://{}/ws?otp=<token>", bind_addr);

        self.serve(listener, shutdown).await?;
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` is cancelled, then
    /// close every live connection.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: CancellationToken,
    ) -> Result<(), std::io::Error> {
        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        let closed = self.state.registry.close_all().await;
        tracing::info!("Server shutdown complete ({} connection(s) closed)", closed);
        Ok(())
    }
}
