//! # Inflation Report
//!
//! `inflation_report` compares monthly HICP inflation of Austria with
//! Germany and the euro area and adds a near-term forecast per region.
//!
//! ## Pipeline
//!
//! - **Load**: Eurostat export (wide CSV), tidy CSV or seeded sample data
//! - **Forecast**: per-region forecasts from [`inflation_forecast`]
//! - **Analyse**: statistics, month-by-month comparison, extremes
//! - **Write**: German text and HTML report, forecast table as CSV and JSON
//!
//! ## Usage Example
//!
//! ```no_run
//! use inflation_report::{run_report, DataSource, ReportConfig};
//!
//! let config = ReportConfig::default();
//! let artifacts = run_report(&config, &DataSource::Sample { seed: 42 }).unwrap();
//! println!("Report written to {}", artifacts.report_path.display());
//! ```

use inflation_forecast::ForecastError;
use thiserror::Error;

pub mod analysis;
pub mod config;
pub mod constants;
pub mod html;
pub mod pipeline;
pub mod report;
pub mod source;

pub use analysis::{
    calculate_statistics, compare_regions, identify_trends, ComparisonRow, RegionComparison,
    RegionStatistics, RegionTrend,
};
pub use config::{ReportConfig, ReportSettings};
pub use html::{render_html_report, write_html_report};
pub use pipeline::{run_report, ReportArtifacts};
pub use report::{format_summary, print_summary, render_text_report, ReportContext};
pub use source::DataSource;

/// Errors that can occur while building a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
