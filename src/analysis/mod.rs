//! Statistical Analysis Engine
//!
//! Derives statistics from a snapshot of daily records.
//!
//! ## Components
//!
//! - **CorrelationEngine**: Pearson correlation over fixed attribute pairs
//! - **InsightGenerator**: threshold-gated, human-readable insights
//! - **WeatherPatternAnalyzer**: per-condition activity and step averages
//! - **YearAggregator**: calendar-year totals, streaks, seasons and weekdays
//! - **YearComparator**: two years side by side with deltas
//! - **AnalysisService**: async entry points over an injected `DataSource`
//!
//! ## Data Flow
//!
//! 1. `AnalysisService` fetches one snapshot from the `DataSource`
//! 2. The computation runs on a blocking worker over that snapshot
//! 3. An immutable result (or `AnalysisError`) is returned to the caller

mod compare;
mod correlations;
mod error;
mod insights;
mod service;
mod weather;
mod year;

pub use compare::{YearComparator, YearComparisonResult, YearDeltas};
pub use correlations::{
    correlate, pearson_correlation, Correlation, CorrelationEngine, CorrelationPair,
    CorrelationResult, CorrelationStatus, PairCorrelation, MIN_PAIR_SAMPLES, MIN_RECORDS,
};
pub use error::{AnalysisError, AnalysisResult};
pub use insights::{Insight, InsightCategory, InsightGenerator, Strength};
pub use service::AnalysisService;
pub use weather::{WeatherBucket, WeatherPatternAnalyzer, WeatherPatternResult};
pub use year::{
    days_in_year, Season, YearAggregator, YearStatistics, ACTIVE_SCORE_THRESHOLD,
    ACTIVE_STEPS_THRESHOLD,
};
