//! Liveness endpoint.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// Liveness probe: `GET /health`
pub async fn health() -> Json<HealthResponse> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    Json(HealthResponse {
        status: "ok",
        timestamp,
    })
}
