use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub dataset: DatasetSettings,
    pub report: ReportSettings,
    pub logging: LoggingSettings,
}

/// Where the sales data lives and how to read it.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    /// Path to the sales CSV export.
    pub path: PathBuf,
    /// `chrono` formats tried in order when parsing the order date column.
    pub date_formats: Vec<String>,
}

/// Contains parameters for rendering reports.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    /// Prefix for money values (e.g., "$").
    pub currency_symbol: String,
    /// Decimal places shown for money and percentages.
    pub decimals: u32,
    /// Category selected when a session starts. Falls back to the first category in the data.
    #[serde(default)]
    pub default_category: Option<String>,
    pub format: OutputFormat,
    /// Number of records shown by the overview table.
    pub overview_rows: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// Log to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Table,
    Json,
}
