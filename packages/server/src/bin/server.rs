//! Relay server binary.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relay-server -- --username alice --password secret
//! cargo run --bin relay-server -- --port 3000 --allowed-origin http://localhost:3000
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use relay_server::{
    config::RelayConfig,
    infrastructure::{InMemoryCredentialStore, StaticAuthenticator, spawn_retention_sweep},
    ui::{AppState, Server, signal::shutdown_signal},
};
use relay_shared::{logger::setup_logger, time::SystemClock};
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[command(name = "relay-server")]
#[command(about = "Room-scoped WebSocket relay with one-time-password login", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Username accepted by /login
    #[arg(long, default_value = "admin")]
    username: String,

    /// Password accepted by /login
    #[arg(long, default_value = "admin")]
    password: String,

    /// Heartbeat timeout in milliseconds (pings go out at 90% of it)
    #[arg(long, default_value_t = 10_000)]
    pong_wait_ms: u64,

    /// Largest inbound message in bytes
    #[arg(long, default_value_t = 512)]
    max_message_size: usize,

    /// Capacity of each connection's outbound queue
    #[arg(long, default_value_t = 256)]
    outbound_capacity: usize,

    /// Lifetime of an unused one-time password in milliseconds
    #[arg(long, default_value_t = 5_000)]
    otp_retention_ms: u64,

    /// Interval of the expired one-time password sweep in milliseconds
    #[arg(long, default_value_t = 400)]
    otp_sweep_interval_ms: u64,

    /// Origin allowed to open WebSocket connections (repeatable)
    #[arg(long = "allowed-origin", default_value = "http://localhost:8080")]
    allowed_origins: Vec<String>,
}

impl Args {
    fn config(&self) -> RelayConfig {
        RelayConfig {
            pong_wait: Duration::from_millis(self.pong_wait_ms),
            max_message_size: self.max_message_size,
            outbound_capacity: self.outbound_capacity,
            otp_retention: Duration::from_millis(self.otp_retention_ms),
            otp_sweep_interval: Duration::from_millis(self.otp_sweep_interval_ms),
            allowed_origins: self.allowed_origins.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = args.config();
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 1. Credential store and its expiry sweep
    let clock = Arc::new(SystemClock);
    let credentials = Arc::new(InMemoryCredentialStore::new(
        config.otp_retention,
        clock.clone(),
    ));
    let shutdown = CancellationToken::new();
    let sweep = spawn_retention_sweep(
        credentials.clone(),
        config.otp_sweep_interval,
        shutdown.clone(),
    );

    // 2. AppState (registry, router, usecases)
    let authenticator = Arc::new(StaticAuthenticator::new(&args.username, &args.password));
    let state = Arc::new(AppState::new(config, credentials, authenticator, clock));

    // 3. Shutdown on Ctrl+C / SIGTERM
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            shutdown.cancel();
        }
    });

    // 4. Run the server
    let result = Server::new(state)
        .run(args.host, args.port, shutdown.clone())
        .await;

    shutdown.cancel();
    if let Err(e) = sweep.await {
        tracing::warn!("OTP retention sweep ended abnormally: {}", e);
    }

    if let Err(e) = result {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
