//! Year-over-year comparison

use crate::analysis::error::AnalysisResult;
use crate::analysis::year::{YearAggregator, YearStatistics};
use crate::records::DailyRecord;
use serde::Serialize;

/// Differences between two years (second minus first)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearDeltas {
    pub activity: f64,
    pub steps: f64,
    pub places: f64,
    pub screen_time_minutes: f64,
    pub media_minutes: f64,
    pub active_days: i64,
    pub longest_active_streak: i64,
}

impl YearDeltas {
    fn between(first: &YearStatistics, second: &YearStatistics) -> Self {
        Self {
            activity: second.avg_activity - first.avg_activity,
            steps: second.avg_steps - first.avg_steps,
            places: second.avg_places - first.avg_places,
            screen_time_minutes: second.avg_screen_time_minutes - first.avg_screen_time_minutes,
            media_minutes: second.avg_media_minutes - first.avg_media_minutes,
            active_days: second.active_days as i64 - first.active_days as i64,
            longest_active_streak: second.longest_active_streak as i64
                - first.longest_active_streak as i64,
        }
    }
}

/// Statistics for two years side by side
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearComparisonResult {
    pub first: YearStatistics,
    pub second: YearStatistics,
    pub deltas: YearDeltas,
}

impl YearComparisonResult {
    /// Combine two independently aggregated years
    pub fn new(first: YearStatistics, second: YearStatistics) -> Self {
        let deltas = YearDeltas::between(&first, &second);
        Self {
            first,
            second,
            deltas,
        }
    }

    /// Change in mean daily activity score
    pub fn activity_delta(&self) -> f64 {
        self.deltas.activity
    }

    /// Change in mean daily steps
    pub fn steps_delta(&self) -> f64 {
        self.deltas.steps
    }

    /// Change in mean daily places visited
    pub fn places_delta(&self) -> f64 {
        self.deltas.places
    }
}

/// Runs the year aggregator for two years
#[derive(Debug, Clone, Copy, Default)]
pub struct YearComparator {
    aggregator: YearAggregator,
}

impl YearComparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `first` against `second`; deltas are `second - first`
    ///
    /// Means are per calendar day already, so no leap-year adjustment is made.
    pub fn compare(
        &self,
        records: &[DailyRecord],
        first: i32,
        second: i32,
    ) -> AnalysisResult<YearComparisonResult> {
        let first = self.aggregator.aggregate(records, first)?;
        let second = self.aggregator.aggregate(records, second)?;
        Ok(YearComparisonResult::new(first, second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deltas_are_second_minus_first() {
        let records = vec![
            DailyRecord::new("2023-06-01").activity(365.0).steps(365_000).places(730),
            DailyRecord::new("2024-06-01").activity(732.0).steps(366_000).places(366),
        ];

        let result = YearComparator::new().compare(&records, 2023, 2024).unwrap();

        assert_eq!(result.first.total_days, 365);
        assert_eq!(result.second.total_days, 366);
        assert_eq!(result.activity_delta(), 1.0);
        assert_eq!(result.steps_delta(), 0.0);
        assert_eq!(result.places_delta(), -1.0);
        assert_eq!(result.deltas.active_days, 0);
    }

    #[test]
    fn test_compare_same_year_is_zero() {
        let records = vec![DailyRecord::new("2023-02-01").activity(50.0).steps(5000)];
        let result = YearComparator::new().compare(&records, 2023, 2023).unwrap();

        assert_eq!(result.first, result.second);
        assert_eq!(result.activity_delta(), 0.0);
        assert_eq!(result.deltas.longest_active_streak, 0);
    }

    #[test]
    fn test_compare_invalid_year_fails() {
        assert!(YearComparator::new().compare(&[], 2023, i32::MIN).is_err());
    }
}
