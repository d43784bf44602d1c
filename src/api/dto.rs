//! Data Transfer Objects
//!
//! Request parameters and response envelopes for the API endpoints.
//! Analysis results are serialized as-is; only the wrappers live here.

use serde::{Deserialize, Serialize};

use crate::analysis::Insight;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// Data source description
    pub data_source: String,
    /// Records in the current snapshot, if it could be fetched
    pub record_count: Option<usize>,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Insights response
#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub insights: Vec<Insight>,
    pub record_count: usize,
}

/// Years with data
#[derive(Debug, Serialize)]
pub struct YearsResponse {
    pub years: Vec<i32>,
}

/// Year comparison query parameters
#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub first: i32,
    pub second: i32,
}
