//! Daylog REST API
//!
//! Read-only HTTP API over the analysis engine, built with Axum.
//!
//! # Endpoints
//!
//! ## Analysis
//! - `GET /api/v1/correlations` - Pearson correlations for the fixed attribute pairs
//! - `GET /api/v1/insights` - Insights derived from those correlations
//! - `GET /api/v1/weather` - Activity and steps per weather condition
//!
//! ## Years
//! - `GET /api/v1/years` - Years present in the data
//! - `GET /api/v1/years/:year` - Calendar-year statistics
//! - `GET /api/v1/compare?first=&second=` - Two years side by side
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use daylog::api::{serve, AppState};
//! use daylog::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let state = AppState::new(config.data.open_source(), config.api.clone());
//!     serve(state, &config.api).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use crate::config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/correlations", get(routes::correlations::get_correlations))
        .route("/insights", get(routes::insights::get_insights))
        .route("/weather", get(routes::weather::get_weather_patterns))
        .route("/years", get(routes::years::list_years))
        .route("/years/:year", get(routes::years::get_year))
        .route("/compare", get(routes::years::compare_years));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config);
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Any origin when none are configured, otherwise the listed ones
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let source = state.analysis.source_name().to_string();
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(source = %source, "Daylog API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Daylog API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{DailyRecord, JsonSource, MemorySource};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    fn sample_records() -> Vec<DailyRecord> {
        (1..=12)
            .map(|day| {
                DailyRecord::new(format!("2024-03-{:02}", day))
                    .temperature(10.0 + day as f64)
                    .humidity(40.0 + (day % 3) as f64)
                    .activity(20.0 + day as f64 * 4.0)
                    .steps(3000 + day * 400)
                    .weather(if day % 2 == 0 { "Sunny" } else { "Rain" })
            })
            .chain(std::iter::once(
                DailyRecord::new("2023-07-04").activity(50.0).steps(9000),
            ))
            .collect()
    }

    fn create_test_app(records: Vec<DailyRecord>) -> Router {
        let state = AppState::new(Arc::new(MemorySource::new(records)), ApiConfig::default());
        build_router(state)
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get(create_test_app(Vec::new()), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let response = get(create_test_app(sample_records()), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_missing_source() {
        let state = AppState::new(
            Arc::new(JsonSource::new("/nonexistent/daylog/records.json")),
            ApiConfig::default(),
        );
        let response = get(build_router(state), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = get(create_test_app(sample_records()), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["record_count"], 13);
    }

    #[tokio::test]
    async fn test_correlations() {
        let response = get(create_test_app(sample_records()), "/api/v1/correlations").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["record_count"], 13);
        assert_eq!(body["correlations"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_correlations_insufficient_data() {
        let records = sample_records().into_iter().take(3).collect();
        let response = get(create_test_app(records), "/api/v1/correlations").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INSUFFICIENT_DATA");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_insights() {
        let response = get(create_test_app(sample_records()), "/api/v1/insights").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert!(body["insights"].is_array());
    }

    #[tokio::test]
    async fn test_weather() {
        let response = get(create_test_app(sample_records()), "/api/v1/weather").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["buckets"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_years() {
        let response = get(create_test_app(sample_records()), "/api/v1/years").await;
        let body = json_body(response).await;
        assert_eq!(body["years"], serde_json::json!([2023, 2024]));
    }

    #[tokio::test]
    async fn test_year_statistics() {
        let response = get(create_test_app(sample_records()), "/api/v1/years/2024").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["total_days"], 366);
        assert_eq!(body["data_available_days"], 12);
    }

    #[tokio::test]
    async fn test_year_out_of_range() {
        let response = get(create_test_app(sample_records()), "/api/v1/years/12").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compare_years() {
        let response = get(
            create_test_app(sample_records()),
            "/api/v1/compare?first=2023&second=2024",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["first"]["year"], 2023);
        assert_eq!(body["second"]["year"], 2024);
    }

    #[tokio::test]
    async fn test_compare_missing_param() {
        let response = get(create_test_app(sample_records()), "/api/v1/compare?first=2023").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
