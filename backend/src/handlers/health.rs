//! Health check handler

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{error::Result, state::AppState};

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    /// Status indicator (always "ok")
    pub status: String,
}

/// GET /health
///
/// Round-trips the store. 200 `{"status":"ok"}` when it answers, 500 when it
/// does not.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthCheckResponse>> {
    state.store.ping().await?;
    tracing::debug!("health check ok");

    Ok(Json(HealthCheckResponse {
        status: "ok".to_string(),
    }))
}
