//! Weather Pattern Analyzer
//!
//! Groups records by weather condition and averages activity and steps per
//! condition. Unlike the correlation engine, zeros are kept: these are gross
//! exposure averages, not a linear association.

use crate::records::DailyRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Records sharing one weather condition
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherBucket {
    /// Condition label ("Unknown" for records without one)
    pub condition: String,
    pub record_count: usize,
    /// Raw activity scores of the member records
    pub activity_scores: Vec<f64>,
    /// Raw step counts of the member records
    pub step_counts: Vec<u32>,
    pub avg_activity: f64,
    pub avg_steps: f64,
}

/// Per-condition averages, ordered by condition label
#[derive(Debug, Clone, Serialize, Default)]
pub struct WeatherPatternResult {
    pub buckets: Vec<WeatherBucket>,
}

impl WeatherPatternResult {
    /// Look up a bucket by condition label
    pub fn bucket(&self, condition: &str) -> Option<&WeatherBucket> {
        self.buckets.iter().find(|b| b.condition == condition)
    }

    /// Condition with the highest average activity
    pub fn most_active_condition(&self) -> Option<&WeatherBucket> {
        self.buckets
            .iter()
            .filter(|b| b.avg_activity.is_finite())
            .max_by(|a, b| a.avg_activity.total_cmp(&b.avg_activity))
    }
}

#[derive(Default)]
struct Accumulator {
    activity: Vec<f64>,
    steps: Vec<u32>,
}

/// Buckets records by categorical weather condition
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherPatternAnalyzer;

impl WeatherPatternAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, records: &[DailyRecord]) -> WeatherPatternResult {
        let mut groups: BTreeMap<String, Accumulator> = BTreeMap::new();

        for record in records {
            let group = groups.entry(record.condition_label().to_string()).or_default();
            // NaN is "no data"; a zero keeps the mean finite
            group.activity.push(if record.activity_score.is_nan() {
                0.0
            } else {
                record.activity_score
            });
            group.steps.push(record.step_count);
        }

        let buckets: Vec<WeatherBucket> = groups
            .into_iter()
            .map(|(condition, acc)| {
                let n = acc.activity.len() as f64;
                let avg_activity = acc.activity.iter().sum::<f64>() / n;
                let avg_steps = acc.steps.iter().map(|&s| s as f64).sum::<f64>() / n;
                WeatherBucket {
                    condition,
                    record_count: acc.activity.len(),
                    activity_scores: acc.activity,
                    step_counts: acc.steps,
                    avg_activity,
                    avg_steps,
                }
            })
            .collect();

        tracing::debug!(
            records = records.len(),
            conditions = buckets.len(),
            "Weather pattern analysis complete"
        );

        WeatherPatternResult { buckets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_by_condition() {
        let records = vec![
            DailyRecord::new("2024-01-01").weather("Rain").activity(10.0).steps(2000),
            DailyRecord::new("2024-01-02").weather("Clear").activity(50.0).steps(9000),
            DailyRecord::new("2024-01-03").weather("Rain").activity(20.0).steps(4000),
            DailyRecord::new("2024-01-04").weather("Clear").activity(0.0).steps(0),
        ];

        let result = WeatherPatternAnalyzer::new().analyze(&records);

        assert_eq!(result.buckets.len(), 2);
        let rain = result.bucket("Rain").unwrap();
        assert_eq!(rain.record_count, 2);
        assert_eq!(rain.avg_activity, 15.0);
        assert_eq!(rain.avg_steps, 3000.0);

        // Zeros count toward the mean
        let clear = result.bucket("Clear").unwrap();
        assert_eq!(clear.avg_activity, 25.0);
        assert_eq!(clear.step_counts, vec![9000, 0]);
    }

    #[test]
    fn test_empty_conditions_share_unknown_bucket() {
        let records = vec![
            DailyRecord::new("2024-01-01").activity(10.0),
            DailyRecord::new("2024-01-02").weather("").activity(30.0),
            DailyRecord::new("2024-01-03").weather("Snow").activity(5.0),
        ];

        let result = WeatherPatternAnalyzer::new().analyze(&records);

        let unknown = result.bucket("Unknown").unwrap();
        assert_eq!(unknown.record_count, 2);
        assert_eq!(unknown.avg_activity, 20.0);
        assert_eq!(result.buckets.len(), 2);
    }

    #[test]
    fn test_single_record_bucket() {
        let records = vec![DailyRecord::new("2024-01-01").weather("Fog").activity(33.0).steps(1234)];

        let result = WeatherPatternAnalyzer::new().analyze(&records);
        let fog = result.bucket("Fog").unwrap();

        assert_eq!(fog.avg_activity, 33.0);
        assert_eq!(fog.avg_steps, 1234.0);
        assert_eq!(result.most_active_condition().unwrap().condition, "Fog");
    }

    #[test]
    fn test_null_activity_reads_as_zero() {
        let json = r#"[
            {"date": "2024-02-01", "activity_score": null, "weather_condition": "Rain"},
            {"date": "2024-02-02", "activity_score": 30.0, "weather_condition": "Rain"},
            {"date": "2024-02-03", "activity_score": 80.0, "weather_condition": "Clear"}
        ]"#;
        let records: Vec<DailyRecord> = serde_json::from_str(json).unwrap();

        let result = WeatherPatternAnalyzer::new().analyze(&records);
        let rain = result.bucket("Rain").unwrap();

        assert_eq!(rain.avg_activity, 15.0);
        assert_eq!(rain.activity_scores, vec![0.0, 30.0]);
        assert_eq!(result.most_active_condition().unwrap().condition, "Clear");

        let body = serde_json::to_value(&result).unwrap();
        assert_eq!(body["buckets"][1]["avg_activity"], 15.0);
    }

    #[test]
    fn test_most_active_skips_non_finite_averages() {
        let result = WeatherPatternResult {
            buckets: vec![
                WeatherBucket {
                    condition: "Clear".to_string(),
                    record_count: 1,
                    activity_scores: vec![80.0],
                    step_counts: vec![9000],
                    avg_activity: 80.0,
                    avg_steps: 9000.0,
                },
                WeatherBucket {
                    condition: "Rain".to_string(),
                    record_count: 1,
                    activity_scores: vec![f64::NAN],
                    step_counts: vec![0],
                    avg_activity: f64::NAN,
                    avg_steps: 0.0,
                },
            ],
        };

        assert_eq!(result.most_active_condition().unwrap().condition, "Clear");
    }

    #[test]
    fn test_empty_input() {
        let result = WeatherPatternAnalyzer::new().analyze(&[]);
        assert!(result.buckets.is_empty());
        assert!(result.most_active_condition().is_none());
    }
}
