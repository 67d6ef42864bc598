//! HTTP transport layer (axum)
//!
//! Thin wrapper around the board components: routes, error mapping and
//! server lifecycle.

pub mod routes;
pub mod server;

// Re-export main types
pub use routes::{create_router, ApiError, AppState};
