//! Year Routes
//!
//! Endpoints for calendar-year statistics.
//!
//! - GET /api/v1/years - Years present in the data
//! - GET /api/v1/years/:year - Statistics for one year
//! - GET /api/v1/compare?first=&second= - Two years side by side

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::analysis::{YearComparisonResult, YearStatistics};
use crate::api::dto::{CompareParams, YearsResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// Accepted year range for API requests
const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2200;

fn validate_year(year: i32) -> ApiResult<i32> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(ApiError::Validation(format!(
            "year must be between {} and {}",
            MIN_YEAR, MAX_YEAR
        )))
    }
}

/// GET /api/v1/years
pub async fn list_years(State(state): State<Arc<AppState>>) -> ApiResult<Json<YearsResponse>> {
    let years = state.analysis.available_years().await?;
    Ok(Json(YearsResponse { years }))
}

/// GET /api/v1/years/:year
///
/// Every calendar date is included; days without records count as zero.
pub async fn get_year(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
) -> ApiResult<Json<YearStatistics>> {
    let year = validate_year(year)?;
    Ok(Json(state.analysis.year_statistics(year).await?))
}

/// GET /api/v1/compare?first=2023&second=2024
///
/// Deltas are `second - first`.
pub async fn compare_years(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompareParams>,
) -> ApiResult<Json<YearComparisonResult>> {
    let first = validate_year(params.first)?;
    let second = validate_year(params.second)?;
    Ok(Json(state.analysis.compare_years(first, second).await?))
}
