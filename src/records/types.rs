//! Core data types for daily records
//!
//! This module defines the input types consumed by the analysis engine:
//! - `DailyRecord`: one calendar day's measurement bundle
//! - `Attribute`: a named numeric field of a record, used as a selector

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Date format used for record keys
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Label for records without a weather condition
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// One calendar day of environmental and behavioral measurements
///
/// Zero (and NaN for the real-valued readings) is the "no data" sentinel
/// used by the producers of these records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRecord {
    /// ISO date (`YYYY-MM-DD`), unique across a record set
    pub date: String,
    /// Outside temperature
    #[serde(default, deserialize_with = "nullable_f64")]
    pub temperature: f64,
    /// Relative humidity
    #[serde(default, deserialize_with = "nullable_f64")]
    pub humidity: f64,
    #[serde(default)]
    pub uv_index: i32,
    #[serde(default)]
    pub air_quality_index: i32,
    /// Derived daily activity score
    #[serde(default, deserialize_with = "nullable_f64")]
    pub activity_score: f64,
    #[serde(default)]
    pub step_count: u32,
    #[serde(default)]
    pub screen_time_minutes: u32,
    #[serde(default)]
    pub total_media_minutes: u32,
    #[serde(default)]
    pub places_visited: u32,
    /// Categorical weather label ("Clear", "Rain", ...)
    #[serde(default)]
    pub weather_condition: Option<String>,
}

/// JSON `null` is "absent" for real-valued readings, same as NaN
fn nullable_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl DailyRecord {
    /// Create an empty record for a date
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            temperature: 0.0,
            humidity: 0.0,
            uv_index: 0,
            air_quality_index: 0,
            activity_score: 0.0,
            step_count: 0,
            screen_time_minutes: 0,
            total_media_minutes: 0,
            places_visited: 0,
            weather_condition: None,
        }
    }

    /// Create an empty record for a calendar date
    pub fn for_date(date: NaiveDate) -> Self {
        Self::new(date.format(DATE_FORMAT).to_string())
    }

    /// Builder: set temperature
    pub fn temperature(mut self, value: f64) -> Self {
        self.temperature = value;
        self
    }

    /// Builder: set humidity
    pub fn humidity(mut self, value: f64) -> Self {
        self.humidity = value;
        self
    }

    /// Builder: set UV index
    pub fn uv_index(mut self, value: i32) -> Self {
        self.uv_index = value;
        self
    }

    /// Builder: set air quality index
    pub fn air_quality(mut self, value: i32) -> Self {
        self.air_quality_index = value;
        self
    }

    /// Builder: set activity score
    pub fn activity(mut self, value: f64) -> Self {
        self.activity_score = value;
        self
    }

    /// Builder: set step count
    pub fn steps(mut self, value: u32) -> Self {
        self.step_count = value;
        self
    }

    /// Builder: set screen time
    pub fn screen_time(mut self, minutes: u32) -> Self {
        self.screen_time_minutes = minutes;
        self
    }

    /// Builder: set media minutes
    pub fn media(mut self, minutes: u32) -> Self {
        self.total_media_minutes = minutes;
        self
    }

    /// Builder: set places visited
    pub fn places(mut self, count: u32) -> Self {
        self.places_visited = count;
        self
    }

    /// Builder: set weather condition
    pub fn weather(mut self, condition: impl Into<String>) -> Self {
        self.weather_condition = Some(condition.into());
        self
    }

    /// Parse the date key
    pub fn parsed_date(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
    }

    /// Year of this record, if the date parses
    pub fn year(&self) -> Option<i32> {
        self.parsed_date().ok().map(|d| d.year())
    }

    /// Whether the date key starts with the given year
    pub fn in_year(&self, year: i32) -> bool {
        self.date
            .strip_prefix(&year.to_string())
            .is_some_and(|rest| rest.starts_with('-'))
    }

    /// Weather condition with null/empty normalized to "Unknown"
    pub fn condition_label(&self) -> &str {
        match self.weather_condition.as_deref() {
            Some(c) if !c.trim().is_empty() => c.trim(),
            _ => UNKNOWN_CONDITION,
        }
    }
}

/// A numeric field of a [`DailyRecord`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Temperature,
    Humidity,
    UvIndex,
    AirQualityIndex,
    ActivityScore,
    StepCount,
    ScreenTimeMinutes,
    TotalMediaMinutes,
    PlacesVisited,
}

impl Attribute {
    /// Get all attributes for iteration
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::Temperature,
            Attribute::Humidity,
            Attribute::UvIndex,
            Attribute::AirQualityIndex,
            Attribute::ActivityScore,
            Attribute::StepCount,
            Attribute::ScreenTimeMinutes,
            Attribute::TotalMediaMinutes,
            Attribute::PlacesVisited,
        ]
    }

    /// Read this attribute from a record
    pub fn extract(self, record: &DailyRecord) -> f64 {
        match self {
            Attribute::Temperature => record.temperature,
            Attribute::Humidity => record.humidity,
            Attribute::UvIndex => record.uv_index as f64,
            Attribute::AirQualityIndex => record.air_quality_index as f64,
            Attribute::ActivityScore => record.activity_score,
            Attribute::StepCount => record.step_count as f64,
            Attribute::ScreenTimeMinutes => record.screen_time_minutes as f64,
            Attribute::TotalMediaMinutes => record.total_media_minutes as f64,
            Attribute::PlacesVisited => record.places_visited as f64,
        }
    }

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Temperature => "temperature",
            Attribute::Humidity => "humidity",
            Attribute::UvIndex => "UV index",
            Attribute::AirQualityIndex => "air quality index",
            Attribute::ActivityScore => "activity",
            Attribute::StepCount => "steps",
            Attribute::ScreenTimeMinutes => "screen time",
            Attribute::TotalMediaMinutes => "media time",
            Attribute::PlacesVisited => "places visited",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
