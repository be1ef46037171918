//! Terminal chat client for a Tuganire server.
//!
//! Keeps a WebSocket open to the server (reconnecting every 3 seconds after
//! a close), prints incoming messages of the current room, and offers user
//! search and room navigation through slash commands.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tuganire-client -- --token <jwt> --room 1 --user-id 4
//! TUGANIRE_TOKEN=<jwt> cargo run --bin tuganire-client -- -s https://chat.example.com/app
//! ```

use std::path::PathBuf;

use clap::Parser;

use tuganire_client::{
    config::ClientConfig,
    domain::{RoomId, UserId},
    ui::run_client,
};
use tuganire_shared::{logger::setup_logger, paths::preferences_file};

#[derive(Parser, Debug)]
#[command(name = "tuganire-client")]
#[command(about = "Terminal chat client for Tuganire", long_about = None)]
struct Args {
    /// Server URL including the context path
    #[arg(short = 's', long, default_value = "http://127.0.0.1:8080")]
    server: String,

    /// Session token (the `token` cookie issued at login)
    #[arg(short = 't', long, env = "TUGANIRE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Room to open at startup
    #[arg(short = 'r', long)]
    room: Option<i64>,

    /// Your user id, used to mark your own messages and ignore your own typing
    #[arg(short = 'u', long)]
    user_id: Option<i64>,

    /// Preferences file [default: $XDG_CONFIG_HOME/tuganire/preferences.json]
    #[arg(long)]
    preferences: Option<PathBuf>,

    /// Give up after this many consecutive failed reconnects (unlimited if unset)
    #[arg(long)]
    max_reconnects: Option<u32>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = match ClientConfig::new(
        &args.server,
        args.token,
        args.room.map(RoomId::new),
        args.user_id.map(UserId::new),
        args.preferences.unwrap_or_else(preferences_file),
        args.max_reconnects,
    ) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
