//! Axum server lifecycle
//!
//! Startup, bind and graceful termination on ctrl-c.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::web::routes::{create_router, AppState};

/// Start the HTTP API and block until shutdown.
pub async fn serve(config: &Config, state: Arc<AppState>) -> Result<()> {
    let app = create_router(state);

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen_addr))?;

    let addr = listener
        .local_addr()
        .context("Failed to read local listen address")?;
    info!("Hypeboard listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Hypeboard stopped gracefully");

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received shutdown signal, stopping...");
    }
}
