//! Daylog API Server
//!
//! Run with: cargo run --bin daylog-api
//!
//! # Configuration
//!
//! Read from the first config file found (`~/.config/daylog/config.toml`,
//! `/etc/daylog/config.toml`, `./config.toml`), then overridden by:
//! - `DAYLOG_DATA_PATH`: Record file to analyze
//! - `DAYLOG_DATA_FORMAT`: `csv` or `json` (default: from extension)
//! - `DAYLOG_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `DAYLOG_API_PORT`: Port to listen on (default: 8083)
//! - `DAYLOG_LOG_LEVEL` / `DAYLOG_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Full filter directive, takes precedence over the level

use daylog::api::{serve, AppState};
use daylog::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    daylog::logging::init(&config.logging);

    tracing::info!("Starting Daylog API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data file: {} ({:?})",
        config.data.path,
        config.data.resolved_format()
    );

    let state = AppState::new(config.data.open_source(), config.api.clone());

    // Records are re-read per request; an unreadable file is reported, not fatal
    match state.analysis.snapshot().await {
        Ok(records) => tracing::info!("Data source readable: {} records", records.len()),
        Err(e) => tracing::warn!("Data source not readable yet: {}", e),
    }

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("Daylog API server stopped");
    Ok(())
}
