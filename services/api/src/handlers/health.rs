//! Health check handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET /health - Liveness probe (fast, no dependencies)
pub async fn health() -> Json<ProbeResponse> {
    Json(ProbeResponse {
        status: "healthy",
        service: "jobtrack-api",
    })
}

/// GET /ready - Readiness probe.
///
/// The ledgers are the only backing dependency, so readiness is a
/// single round trip to Postgres. 503 until the pool answers.
pub async fn ready(State(state): State<AppState>) -> Result<Json<ProbeResponse>, StatusCode> {
    sqlx::query("SELECT 1")
        .fetch_one(&*state.pool)
        .await
        .map_err(|e| {
            tracing::warn!("readiness probe failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    Ok(Json(ProbeResponse {
        status: "ready",
        service: "jobtrack-api",
    }))
}
