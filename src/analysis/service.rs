//! Analysis Service
//!
//! Async entry points over an injected data source. Each call fetches one
//! snapshot, runs the numeric work on a blocking worker and returns the
//! result. Calls share no mutable state and may run concurrently.

use crate::analysis::compare::YearComparisonResult;
use crate::analysis::correlations::{CorrelationEngine, CorrelationResult};
use crate::analysis::error::AnalysisResult;
use crate::analysis::weather::{WeatherPatternAnalyzer, WeatherPatternResult};
use crate::analysis::year::{YearAggregator, YearStatistics};
use crate::records::{DailyRecord, DataSource};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Runs analyses against a data source
#[derive(Clone)]
pub struct AnalysisService {
    source: Arc<dyn DataSource>,
    correlations: CorrelationEngine,
    weather: WeatherPatternAnalyzer,
    years: YearAggregator,
}

impl AnalysisService {
    /// Create a service reading from `source`
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            correlations: CorrelationEngine::new(),
            weather: WeatherPatternAnalyzer::new(),
            years: YearAggregator::new(),
        }
    }

    /// Name of the underlying data source
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch the current record snapshot
    pub async fn snapshot(&self) -> AnalysisResult<Arc<Vec<DailyRecord>>> {
        let records = self.source.fetch_all().await?;
        tracing::debug!(source = %self.source.name(), records = records.len(), "Fetched snapshot");
        Ok(Arc::new(records))
    }

    /// Correlate the fixed attribute pairs and generate insights
    pub async fn correlations(&self) -> AnalysisResult<CorrelationResult> {
        let records = self.snapshot().await?;
        let engine = self.correlations.clone();
        tokio::task::spawn_blocking(move || engine.analyze(&records)).await?
    }

    /// Average activity and steps per weather condition
    pub async fn weather_patterns(&self) -> AnalysisResult<WeatherPatternResult> {
        let records = self.snapshot().await?;
        let analyzer = self.weather;
        Ok(tokio::task::spawn_blocking(move || analyzer.analyze(&records)).await?)
    }

    /// Aggregate one calendar year
    pub async fn year_statistics(&self, year: i32) -> AnalysisResult<YearStatistics> {
        let records = self.snapshot().await?;
        let aggregator = self.years;
        tokio::task::spawn_blocking(move || aggregator.aggregate(&records, year)).await?
    }

    /// Compare two years; both aggregations run concurrently on one snapshot
    pub async fn compare_years(&self, first: i32, second: i32) -> AnalysisResult<YearComparisonResult> {
        let records = self.snapshot().await?;
        let aggregator = self.years;

        let first_records = Arc::clone(&records);
        let first_task =
            tokio::task::spawn_blocking(move || aggregator.aggregate(&first_records, first));
        let second_task =
            tokio::task::spawn_blocking(move || aggregator.aggregate(&records, second));

        let (first, second) = tokio::try_join!(first_task, second_task)?;
        Ok(YearComparisonResult::new(first?, second?))
    }

    /// Distinct years present in the data, ascending
    pub async fn available_years(&self) -> AnalysisResult<Vec<i32>> {
        let records = self.snapshot().await?;
        let years: BTreeSet<i32> = records.iter().filter_map(DailyRecord::year).collect();
        Ok(years.into_iter().collect())
    }
}
