//! Daylog CLI
//!
//! Command-line interface for the analysis engine:
//! - Correlations and insights
//! - Weather patterns
//! - Calendar-year statistics and comparisons
//! - Default config generation

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use daylog::analysis::{
    AnalysisService, CorrelationResult, CorrelationStatus, Season, WeatherPatternResult,
    YearComparisonResult, YearStatistics,
};
use daylog::config::{generate_default_config, Config};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "daylog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Statistics over a personal daily-record dataset")]
#[command(long_about = "Daylog reads an exported daily-record dataset and reports correlations,\nweather patterns and calendar-year statistics.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Record file to analyze (overrides the config)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Correlations between environment and behaviour attributes
    Correlations,

    /// Insights derived from the correlations
    Insights,

    /// Average activity and steps per weather condition
    Weather,

    /// Statistics for one calendar year
    Year {
        /// Calendar year, e.g. 2024
        year: i32,
    },

    /// Compare two calendar years
    Compare {
        first: i32,
        second: i32,
    },

    /// List years present in the data
    Years,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::load_default(),
    };
    if let Some(data) = &cli.data {
        config.data.path = data.to_string_lossy().to_string();
    }

    daylog::logging::init(&config.logging);

    let service = AnalysisService::new(config.data.open_source());
    tracing::debug!(source = %service.source_name(), "Using data source");

    match cli.command {
        Commands::Correlations => {
            let result = service.correlations().await?;
            emit(cli.format, &result, print_correlations)?;
        }

        Commands::Insights => {
            let result = service.correlations().await?;
            emit(cli.format, &result.insights, |_| print_insights(&result))?;
        }

        Commands::Weather => {
            let result = service.weather_patterns().await?;
            emit(cli.format, &result, print_weather)?;
        }

        Commands::Year { year } => {
            let stats = service.year_statistics(year).await?;
            emit(cli.format, &stats, print_year)?;
        }

        Commands::Compare { first, second } => {
            let result = service.compare_years(first, second).await?;
            emit(cli.format, &result, print_comparison)?;
        }

        Commands::Years => {
            let years = service.available_years().await?;
            emit(cli.format, &years, |years| {
                if years.is_empty() {
                    println!("No dated records found");
                }
                for year in years {
                    println!("{}", year);
                }
            })?;
        }

        // Written before the config was loaded
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Print as pretty JSON or through the table printer
fn emit<T: Serialize>(format: OutputFormat, value: &T, table: impl FnOnce(&T)) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => table(value),
    }
    Ok(())
}

fn print_correlations(result: &CorrelationResult) {
    println!("Records analyzed: {}", result.record_count);
    println!();
    println!("{:<44} {:>12} {:>8}  {}", "Pair", "Coefficient", "Samples", "Status");
    println!("{}", "-".repeat(80));

    for entry in &result.correlations {
        let c = &entry.correlation;
        let status = match c.status {
            CorrelationStatus::Computed => "",
            CorrelationStatus::InsufficientSamples => "too few samples",
            CorrelationStatus::ZeroVariance => "no variance",
        };
        println!(
            "{:<44} {:>12.3} {:>8}  {}",
            entry.pair.to_string(),
            c.coefficient,
            c.sample_size,
            status
        );
    }

    if !result.insights.is_empty() {
        println!();
        print_insights(result);
    }
}

fn print_insights(result: &CorrelationResult) {
    if result.insights.is_empty() {
        println!("No notable correlations in {} records.", result.record_count);
        return;
    }

    println!("Insights:");
    for insight in &result.insights {
        println!(
            "  {} (r = {:.2}, {})",
            insight.title, insight.coefficient, insight.strength
        );
        println!("    {}", insight.description);
    }
}

fn print_weather(result: &WeatherPatternResult) {
    if result.buckets.is_empty() {
        println!("No data");
        return;
    }

    println!("{:<20} {:>8} {:>14} {:>12}", "Condition", "Days", "Avg activity", "Avg steps");
    println!("{}", "-".repeat(57));
    for bucket in &result.buckets {
        println!(
            "{:<20} {:>8} {:>14.1} {:>12.0}",
            bucket.condition, bucket.record_count, bucket.avg_activity, bucket.avg_steps
        );
    }

    if let Some(best) = result.most_active_condition() {
        println!();
        println!("Most active condition: {}", best.condition);
    }
}

fn print_year(stats: &YearStatistics) {
    println!("Year {}", stats.year);
    println!("{}", "-".repeat(40));
    println!(
        "  Days with data:   {} / {}",
        stats.data_available_days, stats.total_days
    );
    println!(
        "  Active days:      {} ({:.0}%)",
        stats.active_days,
        stats.active_day_ratio() * 100.0
    );
    println!("  Avg activity:     {:.1}", stats.avg_activity);
    println!("  Avg steps:        {:.0}", stats.avg_steps);
    println!("  Avg places:       {:.2}", stats.avg_places);
    println!("  Avg screen time:  {:.0} min", stats.avg_screen_time_minutes);
    println!("  Avg media:        {:.0} min", stats.avg_media_minutes);
    println!("  Total steps:      {}", stats.total_steps);

    if let Some(date) = stats.peak_activity_date {
        println!("  Peak activity:    {:.1} on {}", stats.max_activity, date);
    }
    if let Some(date) = stats.peak_steps_date {
        println!("  Peak steps:       {} on {}", stats.max_steps, date);
    }

    println!();
    println!("Streaks:");
    println!("  Longest active:   {} days", stats.longest_active_streak);
    println!("  Longest inactive: {} days", stats.longest_inactive_streak);
    println!("  Current:          {} days", stats.current_streak);

    println!();
    println!("Seasons (mean activity):");
    for season in Season::all() {
        println!(
            "  {:<8} {:>6.1}",
            season.to_string(),
            stats.seasonal_activity[season.index()]
        );
    }
    println!("  Most active season:  {}", stats.most_active_season());
    println!("  Most active weekday: {}", stats.most_active_weekday());

    if stats.skipped_records > 0 {
        println!();
        println!("Skipped {} records with unparseable dates", stats.skipped_records);
    }
}

fn print_comparison(result: &YearComparisonResult) {
    let (a, b, d) = (&result.first, &result.second, &result.deltas);

    println!("{:<22} {:>10} {:>10} {:>10}", "", a.year, b.year, "Change");
    println!("{}", "-".repeat(55));
    println!(
        "{:<22} {:>10.1} {:>10.1} {:>+10.1}",
        "Avg activity", a.avg_activity, b.avg_activity, d.activity
    );
    println!(
        "{:<22} {:>10.0} {:>10.0} {:>+10.0}",
        "Avg steps", a.avg_steps, b.avg_steps, d.steps
    );
    println!(
        "{:<22} {:>10.2} {:>10.2} {:>+10.2}",
        "Avg places", a.avg_places, b.avg_places, d.places
    );
    println!(
        "{:<22} {:>10.0} {:>10.0} {:>+10.0}",
        "Avg screen time (min)", a.avg_screen_time_minutes, b.avg_screen_time_minutes, d.screen_time_minutes
    );
    println!(
        "{:<22} {:>10.0} {:>10.0} {:>+10.0}",
        "Avg media (min)", a.avg_media_minutes, b.avg_media_minutes, d.media_minutes
    );
    println!(
        "{:<22} {:>10} {:>10} {:>+10}",
        "Active days", a.active_days, b.active_days, d.active_days
    );
    println!(
        "{:<22} {:>10} {:>10} {:>+10}",
        "Longest active streak", a.longest_active_streak, b.longest_active_streak, d.longest_active_streak
    );
}
