//! Interactive chat client for the relay server.
//!
//! Logs in with a username and password, connects with the issued one-time
//! password and joins a room. Lines typed at the prompt are sent as chat
//! messages; `/join <room>` switches rooms and `/quit` exits.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relay-client -- --username admin --password admin --room lobby
//! ```

use clap::Parser;

use relay_client::{SessionOptions, run_session};
use relay_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "relay-client")]
#[command(about = "Chat client for the relay server", long_about = None)]
struct Args {
    /// HTTP base URL of the relay server
    #[arg(short = 's', long, default_value = "http://127.0.0.1:8080")]
    server: String,

    #[arg(short = 'u', long, default_value = "admin")]
    username: String,

    #[arg(short = 'p', long, default_value = "admin")]
    password: String,

    /// Room to join after connecting
    #[arg(short = 'r', long, default_value = "general")]
    room: String,

    /// Origin header sent with the WebSocket upgrade
    #[arg(long, default_value = "http://localhost:8080")]
    origin: String,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let options = SessionOptions {
        server: args.server,
        username: args.username,
        password: args.password,
        room: args.room,
        origin: args.origin,
    };

    if let Err(e) = run_session(options).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
