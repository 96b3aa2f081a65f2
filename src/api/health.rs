//! Health check endpoint handler.

use crate::api::{AppState, HealthResponse};
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /health - Liveness only; upstream services are not probed.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
