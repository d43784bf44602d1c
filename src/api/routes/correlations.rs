//! Correlation Routes
//!
//! - GET /api/v1/correlations - Correlations for the fixed attribute pairs

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::analysis::CorrelationResult;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/correlations
///
/// Pearson coefficients with sample sizes, plus the generated insights.
/// Responds 422 when the data set has fewer than 10 records.
pub async fn get_correlations(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CorrelationResult>> {
    let result = state.analysis.correlations().await?;
    Ok(Json(result))
}
