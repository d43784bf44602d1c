//! Weather Routes
//!
//! - GET /api/v1/weather - Activity and step averages per weather condition

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::analysis::WeatherPatternResult;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/weather
pub async fn get_weather_patterns(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<WeatherPatternResult>> {
    Ok(Json(state.analysis.weather_patterns().await?))
}
