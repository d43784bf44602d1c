//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::records::{CsvSource, DataSource, JsonSource};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// File format of the record export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Csv,
    Json,
}

impl std::str::FromStr for DataFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(DataFormat::Csv),
            "json" => Ok(DataFormat::Json),
            other => Err(ConfigError::Invalid(format!(
                "unknown data format '{}', expected csv or json",
                other
            ))),
        }
    }
}

/// Record data source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: String,

    /// Inferred from the file extension when omitted
    #[serde(default)]
    pub format: Option<DataFormat>,
}

fn default_data_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("daylog").join("records.csv").to_string_lossy().to_string())
        .unwrap_or_else(|| "./records.csv".to_string())
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            format: None,
        }
    }
}

impl DataConfig {
    /// Format to read the file as
    pub fn resolved_format(&self) -> DataFormat {
        self.format.unwrap_or_else(|| {
            match Path::new(&self.path)
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_lowercase)
                .as_deref()
            {
                Some("json") => DataFormat::Json,
                _ => DataFormat::Csv,
            }
        })
    }

    /// Build the configured data source
    pub fn open_source(&self) -> Arc<dyn DataSource> {
        let path = expand_home(&self.path);
        match self.resolved_format() {
            DataFormat::Csv => Arc::new(CsvSource::new(path)),
            DataFormat::Json => Arc::new(JsonSource::new(path)),
        }
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8083
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("daylog").join("config.toml")),
            Some(PathBuf::from("/etc/daylog/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Data overrides
        if let Ok(path) = std::env::var("DAYLOG_DATA_PATH") {
            self.data.path = path;
        }
        if let Ok(format) = std::env::var("DAYLOG_DATA_FORMAT") {
            match format.parse() {
                Ok(f) => self.data.format = Some(f),
                Err(e) => tracing::warn!("Ignoring DAYLOG_DATA_FORMAT: {}", e),
            }
        }

        // API overrides
        if let Ok(host) = std::env::var("DAYLOG_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("DAYLOG_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("DAYLOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DAYLOG_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Daylog Configuration
#
# Environment variables override these settings:
# - DAYLOG_DATA_PATH
# - DAYLOG_DATA_FORMAT
# - DAYLOG_API_HOST
# - DAYLOG_API_PORT
# - DAYLOG_LOG_LEVEL
# - DAYLOG_LOG_FORMAT

[data]
# Daily record export to analyze (read-only)
path = "~/.local/share/daylog/records.csv"

# File format: csv or json (inferred from the extension when omitted)
format = "csv"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8083

# Allowed CORS origins (empty = any origin)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();

        assert_eq!(config.api.port, 8083);
        assert_eq!(config.data.format, Some(DataFormat::Csv));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[api]\nport = 9000\n").unwrap();

        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.data.format, None);
    }

    #[test]
    fn test_format_inferred_from_extension() {
        let json = DataConfig {
            path: "/tmp/records.JSON".to_string(),
            format: None,
        };
        assert_eq!(json.resolved_format(), DataFormat::Json);

        let csv = DataConfig {
            path: "/tmp/export".to_string(),
            format: None,
        };
        assert_eq!(csv.resolved_format(), DataFormat::Csv);

        let explicit = DataConfig {
            path: "/tmp/records.json".to_string(),
            format: Some(DataFormat::Csv),
        };
        assert_eq!(explicit.resolved_format(), DataFormat::Csv);
    }

    #[test]
    fn test_open_source_name() {
        let config = DataConfig {
            path: "/tmp/records.json".to_string(),
            format: None,
        };
        assert!(config.open_source().name().starts_with("json:"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[data]\npath = \"/srv/records.json\"\n[logging]\nformat = \"json\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.data.path, "/srv/records.json");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nport = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == file.path()));
    }

    #[test]
    fn test_data_format_from_str() {
        assert_eq!("JSON".parse::<DataFormat>().unwrap(), DataFormat::Json);
        assert!("xml".parse::<DataFormat>().is_err());
    }
}
