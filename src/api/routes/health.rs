//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (data source is readable)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 if the data source can deliver a snapshot.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match check_source(&state).await {
        Some(_) => StatusCode::OK,
        None => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with data source details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let record_count = check_source(&state).await;

    Json(HealthResponse {
        status: if record_count.is_some() { "healthy" } else { "unhealthy" }.to_string(),
        data_source: state.analysis.source_name().to_string(),
        record_count,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fetch a snapshot; `None` if the source is unavailable
async fn check_source(state: &AppState) -> Option<usize> {
    match state.analysis.snapshot().await {
        Ok(records) => Some(records.len()),
        Err(e) => {
            tracing::warn!(error = %e, "Data source health check failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
