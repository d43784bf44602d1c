//! Insight Routes
//!
//! - GET /api/v1/insights - Human-readable insights from the correlation run

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::InsightsResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/insights
pub async fn get_insights(State(state): State<Arc<AppState>>) -> ApiResult<Json<InsightsResponse>> {
    let result = state.analysis.correlations().await?;

    Ok(Json(InsightsResponse {
        insights: result.insights,
        record_count: result.record_count,
    }))
}
