//! Data Sources
//!
//! Read-only providers of daily records. The analysis engine receives a
//! `DataSource` at construction and fetches one snapshot per analysis run.
//!
//! - `MemorySource`: an in-memory record set
//! - `CsvSource`: a CSV export with a header row
//! - `JsonSource`: a JSON array of records

use super::error::{SourceError, SourceResult};
use super::types::{Attribute, DailyRecord};
use async_trait::async_trait;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Provider of the full daily record set
///
/// No ordering guarantee is implied for the returned records.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short description for logs and health output
    fn name(&self) -> &str;

    /// Fetch every available record
    async fn fetch_all(&self) -> SourceResult<Vec<DailyRecord>>;
}

/// In-memory record set; every fetch returns a copy
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<DailyRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<DailyRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DataSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_all(&self) -> SourceResult<Vec<DailyRecord>> {
        Ok(self.records.clone())
    }
}

/// JSON file containing an array of records
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
    name: String,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("json:{}", path.display());
        Self { path, name }
    }
}

#[async_trait]
impl DataSource for JsonSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_all(&self) -> SourceResult<Vec<DailyRecord>> {
        if !self.path.exists() {
            return Err(SourceError::NotFound(self.path.clone()));
        }
        let content = tokio::fs::read(&self.path).await?;
        let records: Vec<DailyRecord> = serde_json::from_slice(&content)?;

        tracing::debug!(path = %self.path.display(), records = records.len(), "Loaded JSON records");
        Ok(records)
    }
}

/// CSV file with one record per row
///
/// Headers are matched case-insensitively, ignoring `_`, `-` and spaces, so
/// `activityScore`, `activity_score` and `Activity Score` name the same column.
/// Empty numeric cells are read as zero (no data).
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    name: String,
}

/// Result of parsing a CSV export
#[derive(Debug)]
pub struct CsvParseResult {
    pub records: Vec<DailyRecord>,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

/// What a CSV column holds
#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    Date,
    Weather,
    Value(Attribute),
    Ignored,
}

impl Column {
    fn from_header(header: &str) -> Self {
        let key: String = header
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "date" | "day" => Column::Date,
            "weathercondition" | "weather" | "condition" => Column::Weather,
            "temperature" | "temp" => Column::Value(Attribute::Temperature),
            "humidity" => Column::Value(Attribute::Humidity),
            "uvindex" | "uv" => Column::Value(Attribute::UvIndex),
            "airqualityindex" | "airquality" | "aqi" => Column::Value(Attribute::AirQualityIndex),
            "activityscore" | "activity" => Column::Value(Attribute::ActivityScore),
            "stepcount" | "steps" => Column::Value(Attribute::StepCount),
            "screentimeminutes" | "screentime" => Column::Value(Attribute::ScreenTimeMinutes),
            "totalmediaminutes" | "mediaminutes" | "media" => {
                Column::Value(Attribute::TotalMediaMinutes)
            }
            "placesvisited" | "places" => Column::Value(Attribute::PlacesVisited),
            _ => Column::Ignored,
        }
    }
}

/// Write a parsed cell into the matching record field
fn assign(record: &mut DailyRecord, attribute: Attribute, value: f64) {
    match attribute {
        Attribute::Temperature => record.temperature = value,
        Attribute::Humidity => record.humidity = value,
        Attribute::UvIndex => record.uv_index = value as i32,
        Attribute::AirQualityIndex => record.air_quality_index = value as i32,
        Attribute::ActivityScore => record.activity_score = value,
        // Saturating casts: negative counters read as zero
        Attribute::StepCount => record.step_count = value as u32,
        Attribute::ScreenTimeMinutes => record.screen_time_minutes = value as u32,
        Attribute::TotalMediaMinutes => record.total_media_minutes = value as u32,
        Attribute::PlacesVisited => record.places_visited = value as u32,
    }
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("csv:{}", path.display());
        Self { path, name }
    }

    /// Parse a CSV file from disk
    pub fn parse_file(path: &Path) -> SourceResult<CsvParseResult> {
        if !path.exists() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }
        let file = std::fs::File::open(path)?;
        Self::parse_reader(file, path)
    }

    /// Parse CSV from a string (useful for testing)
    pub fn parse_str(csv_data: &str) -> SourceResult<CsvParseResult> {
        Self::parse_reader(csv_data.as_bytes(), Path::new("<string>"))
    }

    fn parse_reader<R: Read>(reader: R, origin: &Path) -> SourceResult<CsvParseResult> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<Column> = reader.headers()?.iter().map(Column::from_header).collect();
        let date_column = columns
            .iter()
            .position(|c| *c == Column::Date)
            .ok_or_else(|| SourceError::MissingDateColumn(origin.to_path_buf()))?;

        let mut records = Vec::new();
        let mut rows_failed = 0;
        let mut errors = Vec::new();

        'rows: for (line_num, result) in reader.records().enumerate() {
            // +2: one for the header row, one for 1-based line numbers
            let line = line_num + 2;

            let row = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(format!("Line {}: {}", line, e));
                    rows_failed += 1;
                    continue;
                }
            };

            let date = row.get(date_column).unwrap_or_default();
            if date.is_empty() {
                errors.push(format!("Line {}: missing date", line));
                rows_failed += 1;
                continue;
            }

            let mut record = DailyRecord::new(date);
            for (idx, column) in columns.iter().enumerate() {
                let cell = row.get(idx).unwrap_or_default();
                match column {
                    Column::Weather if !cell.is_empty() => {
                        record.weather_condition = Some(cell.to_string());
                    }
                    Column::Value(attribute) if !cell.is_empty() => match cell.parse::<f64>() {
                        Ok(value) => assign(&mut record, *attribute, value),
                        Err(_) => {
                            errors.push(format!(
                                "Line {}: invalid {} value {:?}",
                                line, attribute, cell
                            ));
                            rows_failed += 1;
                            continue 'rows;
                        }
                    },
                    _ => {}
                }
            }

            records.push(record);
        }

        if rows_failed > 0 {
            tracing::warn!(
                origin = %origin.display(),
                rows_failed,
                first_error = %errors.first().map(String::as_str).unwrap_or_default(),
                "Skipped malformed CSV rows"
            );
        }

        // Truncate errors if too many
        if errors.len() > 100 {
            let total = errors.len();
            errors.truncate(100);
            errors.push(format!("... and {} more errors", total - 100));
        }

        Ok(CsvParseResult {
            records,
            rows_failed,
            errors,
        })
    }
}

#[async_trait]
impl DataSource for CsvSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_all(&self) -> SourceResult<Vec<DailyRecord>> {
        let path = self.path.clone();
        let parsed = tokio::task::spawn_blocking(move || CsvSource::parse_file(&path))
            .await
            .map_err(|e| SourceError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;

        tracing::debug!(
            path = %self.path.display(),
            records = parsed.records.len(),
            rows_failed = parsed.rows_failed,
            "Loaded CSV records"
        );
        Ok(parsed.records)
    }
}
