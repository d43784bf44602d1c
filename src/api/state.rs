//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::analysis::AnalysisService;
use crate::config::ApiConfig;
use crate::records::DataSource;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Analysis entry points over the configured data source
    pub analysis: Arc<AnalysisService>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState reading from `source`
    pub fn new(source: Arc<dyn DataSource>, config: ApiConfig) -> Self {
        Self {
            analysis: Arc::new(AnalysisService::new(source)),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
