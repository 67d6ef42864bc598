//! Route handlers and shared application state for the HTTP API.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::board::storage::BoardStorage;
use crate::board::types::{BoardError, Leaderboard};
use crate::board::{LeaderboardBuilder, Recorder};
use crate::types::ObservationInput;

/// Shared state handed to every handler.
pub struct AppState {
    pub recorder: Recorder,
    pub leaderboard: LeaderboardBuilder,
    pub storage: Arc<dyn BoardStorage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn BoardStorage>) -> Self {
        Self {
            recorder: Recorder::new(Arc::clone(&storage)),
            leaderboard: LeaderboardBuilder::new(Arc::clone(&storage)),
            storage,
        }
    }
}

/// Success envelope for `/record` and `/health`.
#[derive(Debug, Serialize)]
struct OkBody {
    ok: bool,
}

/// Error envelope shared by every failure response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
}

/// Maps domain failures onto an HTTP status plus the JSON error envelope.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::InvalidAddress => ApiError::new(StatusCode::BAD_REQUEST, err.to_string()),
            BoardError::Store(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            ok: false,
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Build the application router with all routes and the CORS layer.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/record", post(record))
        .route("/leaderboard", get(leaderboard))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

#[derive(Debug, Deserialize)]
struct LeaderboardQuery {
    days: Option<String>,
}

/// POST /record - accept one observation.
async fn record(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ObservationInput>, JsonRejection>,
) -> Result<Json<OkBody>, ApiError> {
    let Json(input) = body.map_err(|rejection| {
        warn!("Rejected unreadable record body: {}", rejection);
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, rejection.body_text())
    })?;

    state.recorder.record(&input).await?;

    Ok(Json(OkBody { ok: true }))
}

/// GET /leaderboard?days=N - windowed ranked lists.
async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Leaderboard>, ApiError> {
    let days = query
        .days
        .as_deref()
        .and_then(|raw| raw.trim().parse::<f64>().ok());

    let board = state.leaderboard.build(days).await?;

    Ok(Json(board))
}

/// GET /health - storage reachability probe.
async fn health(State(state): State<Arc<AppState>>) -> Result<Json<OkBody>, ApiError> {
    match state.storage.health_check().await {
        Ok(true) => Ok(Json(OkBody { ok: true })),
        Ok(false) => Err(ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage unavailable",
        )),
        Err(err) => Err(ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            err.to_string(),
        )),
    }
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}
