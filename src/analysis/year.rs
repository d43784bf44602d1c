//! Year Aggregator
//!
//! Builds a complete calendar-year view of the record set and computes
//! totals, per-day averages, maxima, activity streaks, and seasonal and
//! day-of-week activity averages.
//!
//! Every calendar date of the year is present in the view; dates without a
//! record are zero-filled, so averages are always per calendar day.

use crate::analysis::error::{AnalysisError, AnalysisResult};
use crate::records::DailyRecord;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

/// Activity score above which a day counts as active
pub const ACTIVE_SCORE_THRESHOLD: f64 = 20.0;

/// Step count above which a day counts as active
pub const ACTIVE_STEPS_THRESHOLD: u32 = 1000;

/// Northern-Hemisphere meteorological seasons
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Get all seasons in bucket order
    pub fn all() -> &'static [Season] {
        &[Season::Spring, Season::Summer, Season::Fall, Season::Winter]
    }

    /// Season of a calendar month (1-12)
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    /// Bucket index in `YearStatistics::seasonal_activity`
    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Spring => write!(f, "Spring"),
            Season::Summer => write!(f, "Summer"),
            Season::Fall => write!(f, "Fall"),
            Season::Winter => write!(f, "Winter"),
        }
    }
}

/// Number of days in a calendar year, or `None` outside the supported range
pub fn days_in_year(year: i32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, 12, 31).map(|d| d.ordinal())
}

/// Aggregated statistics for one calendar year
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearStatistics {
    pub year: i32,
    /// 365, or 366 in leap years
    pub total_days: u32,
    pub active_days: u32,
    pub data_available_days: u32,

    pub total_activity: f64,
    pub total_steps: u64,
    pub total_places: u64,
    pub total_screen_time_minutes: u64,
    pub total_media_minutes: u64,

    /// Per calendar day (sum / total_days)
    pub avg_activity: f64,
    pub avg_steps: f64,
    pub avg_places: f64,
    pub avg_screen_time_minutes: f64,
    pub avg_media_minutes: f64,

    pub max_activity: f64,
    pub max_steps: u32,
    pub max_places: u32,
    pub max_screen_time_minutes: u32,
    pub max_media_minutes: u32,
    /// First date reaching `max_activity`; `None` if no day had activity
    /// or the maximum came from a record with an unparseable date
    pub peak_activity_date: Option<NaiveDate>,
    /// First date reaching `max_steps`, same rules as `peak_activity_date`
    pub peak_steps_date: Option<NaiveDate>,

    pub longest_active_streak: u32,
    pub longest_inactive_streak: u32,
    /// Active streak trailing the last date of the year
    pub current_streak: u32,

    /// Mean activity per season, indexed Spring, Summer, Fall, Winter
    pub seasonal_activity: [f64; 4],
    pub season_day_counts: [u32; 4],
    /// Mean activity per weekday, indexed Sunday (0) to Saturday (6)
    pub day_of_week_activity: [f64; 7],
    pub day_of_week_counts: [u32; 7],

    /// Records dated in this year whose date could not be parsed. They are
    /// included in totals, maxima and day counts, but not in streaks,
    /// seasons or weekdays.
    pub skipped_records: usize,
}

impl YearStatistics {
    /// Season with the highest mean activity
    pub fn most_active_season(&self) -> Season {
        let idx = argmax(&self.seasonal_activity);
        Season::all()[idx]
    }

    /// Weekday with the highest mean activity
    pub fn most_active_weekday(&self) -> Weekday {
        const WEEK: [Weekday; 7] = [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ];
        WEEK[argmax(&self.day_of_week_activity)]
    }

    /// Share of calendar days that were active
    pub fn active_day_ratio(&self) -> f64 {
        self.active_days as f64 / self.total_days as f64
    }

    /// Fold one day into the sums, maxima and day counts
    fn accumulate(&mut self, day: &DayTotals, date: Option<NaiveDate>) {
        self.total_activity += day.activity;
        self.total_steps += day.steps as u64;
        self.total_places += day.places as u64;
        self.total_screen_time_minutes += day.screen_time as u64;
        self.total_media_minutes += day.media as u64;

        if day.activity > self.max_activity {
            self.max_activity = day.activity;
            self.peak_activity_date = date;
        }
        if day.steps > self.max_steps {
            self.max_steps = day.steps;
            self.peak_steps_date = date;
        }
        self.max_places = self.max_places.max(day.places);
        self.max_screen_time_minutes = self.max_screen_time_minutes.max(day.screen_time);
        self.max_media_minutes = self.max_media_minutes.max(day.media);

        if day.has_data() {
            self.data_available_days += 1;
        }
        if day.is_active() {
            self.active_days += 1;
        }
    }
}

/// Index of the largest value; first wins on ties
fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, max), (i, &v)| {
            if v > max {
                (i, v)
            } else {
                (best, max)
            }
        })
        .0
}

/// One calendar day in the year view
#[derive(Debug, Clone, Copy, Default)]
struct DayTotals {
    activity: f64,
    steps: u32,
    places: u32,
    screen_time: u32,
    media: u32,
}

impl DayTotals {
    fn is_active(&self) -> bool {
        self.activity > ACTIVE_SCORE_THRESHOLD || self.steps > ACTIVE_STEPS_THRESHOLD
    }

    fn has_data(&self) -> bool {
        self.activity > 0.0
            || self.steps > 0
            || self.places > 0
            || self.screen_time > 0
            || self.media > 0
    }
}

impl From<&DailyRecord> for DayTotals {
    fn from(record: &DailyRecord) -> Self {
        Self {
            // NaN is "no data"; a zero keeps the sums finite
            activity: if record.activity_score.is_nan() {
                0.0
            } else {
                record.activity_score
            },
            steps: record.step_count,
            places: record.places_visited,
            screen_time: record.screen_time_minutes,
            media: record.total_media_minutes,
        }
    }
}

/// Aggregates a record set into per-year statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct YearAggregator;

impl YearAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate every calendar date of `year`
    pub fn aggregate(&self, records: &[DailyRecord], year: i32) -> AnalysisResult<YearStatistics> {
        let (days, unplaced) = build_year_view(records, year)?;
        let total_days = days.len() as u32;

        let mut stats = YearStatistics {
            year,
            total_days,
            active_days: 0,
            data_available_days: 0,
            total_activity: 0.0,
            total_steps: 0,
            total_places: 0,
            total_screen_time_minutes: 0,
            total_media_minutes: 0,
            avg_activity: 0.0,
            avg_steps: 0.0,
            avg_places: 0.0,
            avg_screen_time_minutes: 0.0,
            avg_media_minutes: 0.0,
            max_activity: 0.0,
            max_steps: 0,
            max_places: 0,
            max_screen_time_minutes: 0,
            max_media_minutes: 0,
            peak_activity_date: None,
            peak_steps_date: None,
            longest_active_streak: 0,
            longest_inactive_streak: 0,
            current_streak: 0,
            seasonal_activity: [0.0; 4],
            season_day_counts: [0; 4],
            day_of_week_activity: [0.0; 7],
            day_of_week_counts: [0; 7],
            skipped_records: unplaced.len(),
        };

        let mut active_run = 0u32;
        let mut inactive_run = 0u32;
        let mut season_sums = [0.0f64; 4];
        let mut weekday_sums = [0.0f64; 7];

        // BTreeMap iteration is ascending calendar order
        for (date, day) in &days {
            stats.accumulate(day, Some(*date));

            if day.is_active() {
                active_run += 1;
                inactive_run = 0;
                stats.longest_active_streak = stats.longest_active_streak.max(active_run);
            } else {
                inactive_run += 1;
                active_run = 0;
                stats.longest_inactive_streak = stats.longest_inactive_streak.max(inactive_run);
            }

            let season = Season::from_month(date.month()).index();
            season_sums[season] += day.activity;
            stats.season_day_counts[season] += 1;

            let weekday = date.weekday().num_days_from_sunday() as usize;
            weekday_sums[weekday] += day.activity;
            stats.day_of_week_counts[weekday] += 1;
        }

        stats.current_streak = active_run;

        // Undated entries count toward scalars but have no calendar position
        for day in &unplaced {
            stats.accumulate(day, None);
        }

        let n = total_days as f64;
        stats.avg_activity = stats.total_activity / n;
        stats.avg_steps = stats.total_steps as f64 / n;
        stats.avg_places = stats.total_places as f64 / n;
        stats.avg_screen_time_minutes = stats.total_screen_time_minutes as f64 / n;
        stats.avg_media_minutes = stats.total_media_minutes as f64 / n;

        stats.seasonal_activity = bucket_means(season_sums, stats.season_day_counts);
        stats.day_of_week_activity = bucket_means(weekday_sums, stats.day_of_week_counts);

        tracing::debug!(
            year,
            total_days,
            active_days = stats.active_days,
            data_available_days = stats.data_available_days,
            longest_active_streak = stats.longest_active_streak,
            "Year aggregation complete"
        );

        Ok(stats)
    }
}

/// Zero-filled map of every date in `year`, overlaid with matching records
///
/// Also returns the year-prefixed records whose date did not parse. They
/// are reported and kept out of the map.
fn build_year_view(
    records: &[DailyRecord],
    year: i32,
) -> AnalysisResult<(BTreeMap<NaiveDate, DayTotals>, Vec<DayTotals>)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(AnalysisError::InvalidYear(year))?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(AnalysisError::InvalidYear(year))?;

    let mut days: BTreeMap<NaiveDate, DayTotals> = first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|d| (d, DayTotals::default()))
        .collect();

    let mut unplaced = Vec::new();
    for record in records.iter().filter(|r| r.in_year(year)) {
        match record.parsed_date() {
            Ok(date) => {
                if let Some(slot) = days.get_mut(&date) {
                    *slot = DayTotals::from(record);
                }
            }
            Err(e) => {
                unplaced.push(DayTotals::from(record));
                tracing::warn!(date = %record.date, error = %e, "Skipping record with unparseable date");
            }
        }
    }

    Ok((days, unplaced))
}

fn bucket_means<const N: usize>(sums: [f64; N], counts: [u32; N]) -> [f64; N] {
    let mut means = [0.0; N];
    for i in 0..N {
        if counts[i] > 0 {
            means[i] = sums[i] / counts[i] as f64;
        }
    }
    means
}
