//! Correlation Engine
//!
//! Calculates population Pearson correlation coefficients for a fixed set of
//! environment/behavior attribute pairs and hands them to the insight generator.

use crate::analysis::error::{AnalysisError, AnalysisResult};
use crate::analysis::insights::{Insight, InsightGenerator};
use crate::records::{Attribute, DailyRecord};
use serde::Serialize;

/// Minimum record count for a correlation run
pub const MIN_RECORDS: usize = 10;

/// Minimum number of valid (non-zero, non-NaN) pairs for a coefficient
pub const MIN_PAIR_SAMPLES: usize = 5;

/// The attribute pairs evaluated on every run, in evaluation order
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationPair {
    TemperatureActivity,
    TemperatureSteps,
    HumidityActivity,
    UvActivity,
    AirQualityActivity,
    TemperatureScreenTime,
    TemperatureMedia,
}

impl CorrelationPair {
    /// All pairs in evaluation order
    pub fn all() -> &'static [CorrelationPair] {
        &[
            CorrelationPair::TemperatureActivity,
            CorrelationPair::TemperatureSteps,
            CorrelationPair::HumidityActivity,
            CorrelationPair::UvActivity,
            CorrelationPair::AirQualityActivity,
            CorrelationPair::TemperatureScreenTime,
            CorrelationPair::TemperatureMedia,
        ]
    }

    /// The (x, y) attributes of this pair
    pub fn attributes(self) -> (Attribute, Attribute) {
        match self {
            CorrelationPair::TemperatureActivity => {
                (Attribute::Temperature, Attribute::ActivityScore)
            }
            CorrelationPair::TemperatureSteps => (Attribute::Temperature, Attribute::StepCount),
            CorrelationPair::HumidityActivity => (Attribute::Humidity, Attribute::ActivityScore),
            CorrelationPair::UvActivity => (Attribute::UvIndex, Attribute::ActivityScore),
            CorrelationPair::AirQualityActivity => {
                (Attribute::AirQualityIndex, Attribute::ActivityScore)
            }
            CorrelationPair::TemperatureScreenTime => {
                (Attribute::Temperature, Attribute::ScreenTimeMinutes)
            }
            CorrelationPair::TemperatureMedia => {
                (Attribute::Temperature, Attribute::TotalMediaMinutes)
            }
        }
    }
}

impl std::fmt::Display for CorrelationPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (x, y) = self.attributes();
        write!(f, "{} ↔ {}", x, y)
    }
}

/// How a coefficient was arrived at
///
/// Distinguishes a measured 0.0 from the two neutral fallbacks.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStatus {
    Computed,
    InsufficientSamples,
    ZeroVariance,
}

/// Correlation between two attributes
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Correlation {
    pub attribute_x: Attribute,
    pub attribute_y: Attribute,
    /// Pearson correlation coefficient (-1 to 1)
    pub coefficient: f64,
    /// Number of record pairs that survived filtering
    pub sample_size: usize,
    pub status: CorrelationStatus,
}

/// Correlation for one of the fixed pairs
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PairCorrelation {
    pub pair: CorrelationPair,
    #[serde(flatten)]
    pub correlation: Correlation,
}

/// Output of a correlation run
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationResult {
    /// Number of records in the analyzed snapshot
    pub record_count: usize,
    /// One entry per fixed pair, in evaluation order
    pub correlations: Vec<PairCorrelation>,
    /// Threshold-gated insights, in evaluation order
    pub insights: Vec<Insight>,
}

impl CorrelationResult {
    /// Look up the correlation for a pair
    pub fn get(&self, pair: CorrelationPair) -> Option<&Correlation> {
        self.correlations
            .iter()
            .find(|c| c.pair == pair)
            .map(|c| &c.correlation)
    }

    /// Coefficient for a pair (0.0 when absent)
    pub fn coefficient(&self, pair: CorrelationPair) -> f64 {
        self.get(pair).map(|c| c.coefficient).unwrap_or(0.0)
    }
}

/// Runs the fixed correlation pairs and generates insights
#[derive(Debug, Clone, Default)]
pub struct CorrelationEngine {
    insights: InsightGenerator,
}

impl CorrelationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Correlate every fixed pair and derive insights
    ///
    /// Fails with `InsufficientData` when fewer than [`MIN_RECORDS`] records
    /// are supplied. Individual pairs never fail.
    pub fn analyze(&self, records: &[DailyRecord]) -> AnalysisResult<CorrelationResult> {
        if records.len() < MIN_RECORDS {
            return Err(AnalysisError::InsufficientData {
                required: MIN_RECORDS,
                actual: records.len(),
            });
        }

        let correlations = self.correlate_pairs(records);
        let insights = self.insights.generate(&correlations);

        tracing::debug!(
            records = records.len(),
            computed = correlations
                .iter()
                .filter(|c| c.correlation.status == CorrelationStatus::Computed)
                .count(),
            insights = insights.len(),
            "Correlation analysis complete"
        );

        Ok(CorrelationResult {
            record_count: records.len(),
            correlations,
            insights,
        })
    }

    /// Correlate every fixed pair, without the record-count guard
    pub fn correlate_pairs(&self, records: &[DailyRecord]) -> Vec<PairCorrelation> {
        CorrelationPair::all()
            .iter()
            .map(|&pair| {
                let (x, y) = pair.attributes();
                let correlation = correlate(records, x, y);
                tracing::trace!(
                    pair = %pair,
                    r = correlation.coefficient,
                    samples = correlation.sample_size,
                    "Correlated pair"
                );
                PairCorrelation { pair, correlation }
            })
            .collect()
    }
}

/// Correlate two attributes across a record set
///
/// Records where either value is NaN or exactly zero are dropped: zero is the
/// "no data" sentinel, so real zero readings are discarded too. Fewer than
/// [`MIN_PAIR_SAMPLES`] surviving pairs, or no variance, yields 0.0.
pub fn correlate(records: &[DailyRecord], x: Attribute, y: Attribute) -> Correlation {
    let (xs, ys): (Vec<f64>, Vec<f64>) = records
        .iter()
        .map(|r| (x.extract(r), y.extract(r)))
        .filter(|&(a, b)| is_present(a) && is_present(b))
        .unzip();

    let sample_size = xs.len();
    let (coefficient, status) = if sample_size < MIN_PAIR_SAMPLES {
        (0.0, CorrelationStatus::InsufficientSamples)
    } else {
        match pearson(&xs, &ys) {
            Some(r) => (r, CorrelationStatus::Computed),
            None => (0.0, CorrelationStatus::ZeroVariance),
        }
    };

    Correlation {
        attribute_x: x,
        attribute_y: y,
        coefficient,
        sample_size,
        status,
    }
}

fn is_present(value: f64) -> bool {
    !value.is_nan() && value != 0.0
}

/// Calculate the population Pearson correlation coefficient
///
/// Returns a value between -1 and 1:
/// - 1: perfect positive correlation
/// - 0: no correlation (also returned for empty, mismatched or constant input)
/// - -1: perfect negative correlation
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    pearson(x, y).unwrap_or(0.0)
}

/// Pearson r from deviations about the mean; `None` when the denominator is zero
fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.is_empty() {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sum_xy += dx * dy;
        sum_x2 += dx * dx;
        sum_y2 += dy * dy;
    }

    let denominator = (sum_x2 * sum_y2).sqrt();
    if denominator == 0.0 {
        None
    } else {
        Some((sum_xy / denominator).clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::insights::Strength;

    fn records_from(temps: &[f64], activity: &[f64]) -> Vec<DailyRecord> {
        temps
            .iter()
            .zip(activity)
            .enumerate()
            .map(|(i, (&t, &a))| {
                DailyRecord::new(format!("2024-05-{:02}", i + 1))
                    .temperature(t)
                    .activity(a)
            })
            .collect()
    }

    #[test]
    fn test_pearson_correlation_perfect_positive() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let r = pearson_correlation(&x, &y);
        assert!((r - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_pearson_correlation_perfect_negative() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![10.0, 8.0, 6.0, 4.0, 2.0];
        let r = pearson_correlation(&x, &y);
        assert!((r + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_pearson_correlation_empty() {
        let x: Vec<f64> = vec![];
        let y: Vec<f64> = vec![];
        assert_eq!(pearson_correlation(&x, &y), 0.0);
    }

    #[test]
    fn test_temperature_activity_scenario() {
        let records = records_from(
            &[10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 15.0, 20.0, 25.0, 30.0],
            &[20.0, 25.0, 35.0, 40.0, 55.0, 65.0, 28.0, 38.0, 42.0, 58.0],
        );

        let c = correlate(&records, Attribute::Temperature, Attribute::ActivityScore);
        assert!(c.coefficient > 0.9, "Expected strong positive, got {}", c.coefficient);
        assert_eq!(c.sample_size, 10);
        assert_eq!(c.status, CorrelationStatus::Computed);
    }

    #[test]
    fn test_correlation_is_symmetric() {
        let records = records_from(
            &[3.0, 9.5, 1.2, 7.7, 4.4, 8.1, 2.9, 6.3],
            &[12.0, 4.0, 33.0, 8.5, 21.0, 5.5, 19.0, 11.0],
        );

        let xy = correlate(&records, Attribute::Temperature, Attribute::ActivityScore);
        let yx = correlate(&records, Attribute::ActivityScore, Attribute::Temperature);
        assert_eq!(xy.coefficient, yx.coefficient);
        assert!(xy.coefficient >= -1.0 && xy.coefficient <= 1.0);
    }

    #[test]
    fn test_constant_series_is_zero_variance() {
        let records = records_from(&[20.0; 8], &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0]);

        let c = correlate(&records, Attribute::Temperature, Attribute::ActivityScore);
        assert_eq!(c.coefficient, 0.0);
        assert_eq!(c.status, CorrelationStatus::ZeroVariance);
    }

    #[test]
    fn test_zero_and_nan_values_are_dropped() {
        let records = records_from(
            &[10.0, 0.0, 20.0, f64::NAN, 30.0, 40.0, 50.0, 60.0],
            &[1.0, 2.0, 0.0, 4.0, 3.0, 4.0, 5.0, 6.0],
        );

        let c = correlate(&records, Attribute::Temperature, Attribute::ActivityScore);
        assert_eq!(c.sample_size, 5);
        assert_eq!(c.status, CorrelationStatus::Computed);
    }

    #[test]
    fn test_too_few_pairs_is_neutral() {
        let records = records_from(
            &[10.0, 20.0, 30.0, 40.0, 0.0, 0.0],
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        );

        let c = correlate(&records, Attribute::Temperature, Attribute::ActivityScore);
        assert_eq!(c.coefficient, 0.0);
        assert_eq!(c.sample_size, 4);
        assert_eq!(c.status, CorrelationStatus::InsufficientSamples);
    }

    #[test]
    fn test_analyze_requires_ten_records() {
        let records = records_from(&[1.0; 9], &[1.0; 9]);
        let err = CorrelationEngine::new().analyze(&records).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientData {
                required: 10,
                actual: 9
            }
        ));
    }

    #[test]
    fn test_analyze_evaluates_every_pair_independently() {
        let records = records_from(
            &[10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 15.0, 20.0, 25.0, 30.0],
            &[20.0, 25.0, 35.0, 40.0, 55.0, 65.0, 28.0, 38.0, 42.0, 58.0],
        );

        let result = CorrelationEngine::new().analyze(&records).unwrap();

        let pairs: Vec<CorrelationPair> = result.correlations.iter().map(|c| c.pair).collect();
        assert_eq!(pairs, CorrelationPair::all());
        assert!(result.coefficient(CorrelationPair::TemperatureActivity) > 0.9);

        // No step or humidity data: neutral, not an error
        let steps = result.get(CorrelationPair::TemperatureSteps).unwrap();
        assert_eq!(steps.status, CorrelationStatus::InsufficientSamples);
        assert_eq!(result.coefficient(CorrelationPair::HumidityActivity), 0.0);

        assert_eq!(result.insights.len(), 1);
        assert_eq!(result.insights[0].strength, Strength::VeryStrong);
    }

    #[test]
    fn test_coefficients_within_bounds() {
        let records: Vec<DailyRecord> = (0..60)
            .map(|i| {
                let f = i as f64;
                DailyRecord::new(format!("2024-{:02}-{:02}", i / 28 + 1, i % 28 + 1))
                    .temperature(10.0 + (f * 0.7).sin() * 12.0)
                    .humidity(50.0 + (f * 1.3).cos() * 30.0)
                    .uv_index((i % 11) as i32 + 1)
                    .air_quality((i * 7 % 90) as i32 + 10)
                    .activity(30.0 + (f * 0.4).sin() * 25.0)
                    .steps(3000 + (i * 977 % 9000) as u32)
                    .screen_time(60 + (i * 13 % 300) as u32)
                    .media(20 + (i * 31 % 200) as u32)
            })
            .collect();

        let result = CorrelationEngine::new().analyze(&records).unwrap();
        for c in &result.correlations {
            assert!(
                (-1.0..=1.0).contains(&c.correlation.coefficient),
                "{} out of bounds: {}",
                c.pair,
                c.correlation.coefficient
            );
        }
    }

    #[test]
    fn test_correlation_serializes() {
        let corr = PairCorrelation {
            pair: CorrelationPair::UvActivity,
            correlation: Correlation {
                attribute_x: Attribute::UvIndex,
                attribute_y: Attribute::ActivityScore,
                coefficient: 0.42,
                sample_size: 30,
                status: CorrelationStatus::Computed,
            },
        };

        let json = serde_json::to_string(&corr).unwrap();
        assert!(json.contains("\"pair\":\"uv_activity\""));
        assert!(json.contains("\"coefficient\":0.42"));
        assert!(json.contains("\"status\":\"computed\""));
    }
}
