//! Main entry point for the Hypeboard service
//!
//! Wires the SQLite store into the board components and serves the HTTP API.

use std::sync::Arc;

use anyhow::Result;
use hypeboard::board::SqliteBoard;
use hypeboard::config::Config;
use hypeboard::web::server;
use hypeboard::web::AppState;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = Config::from_env();
    info!("Starting Hypeboard (database: {})", config.database_url);

    let storage = Arc::new(SqliteBoard::connect(&config.database_url).await?);
    let state = Arc::new(AppState::new(storage));

    server::serve(&config, state).await
}
