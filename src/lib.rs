//! # Daylog
//!
//! Daily Life Analytics - statistics over a personal daily-record dataset.
//!
//! Each record is one calendar day of environment readings (temperature,
//! humidity, UV, air quality, weather) and behaviour measures (activity
//! score, steps, screen time, media, places visited).
//!
//! ## Features
//!
//! - **Correlations**: Pearson coefficients over fixed attribute pairs
//! - **Insights**: threshold-gated, human-readable interpretations
//! - **Weather patterns**: activity and steps per weather condition
//! - **Year statistics**: zero-filled calendar years with streaks, seasons and weekdays
//! - **Year comparison**: two years side by side
//!
//! ## Modules
//!
//! - [`records`]: Record model and read-only data sources
//! - [`analysis`]: The statistical engine
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use daylog::analysis::AnalysisService;
//! use daylog::records::CsvSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = AnalysisService::new(Arc::new(CsvSource::new("records.csv")));
//!
//!     let result = service.correlations().await?;
//!     for insight in &result.insights {
//!         println!("{}: {}", insight.title, insight.description);
//!     }
//!
//!     let year = service.year_statistics(2024).await?;
//!     println!("{} active days out of {}", year.active_days, year.total_days);
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod logging;
pub mod records;

// Re-export top-level types for convenience
pub use records::{
    Attribute, CsvParseResult, CsvSource, DailyRecord, DataSource, JsonSource, MemorySource,
    SourceError, SourceResult,
};

pub use analysis::{
    AnalysisError, AnalysisResult, AnalysisService, Correlation, CorrelationEngine,
    CorrelationPair, CorrelationResult, Insight, InsightGenerator, WeatherPatternAnalyzer,
    WeatherPatternResult, YearAggregator, YearComparator, YearComparisonResult, YearStatistics,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, DataConfig, DataFormat, LoggingConfig};
