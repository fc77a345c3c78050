//! # Inflation Report Workspace
//!
//! Facade over the workspace crates.
//!
//! ## Example
//!
//! ```
//! use inflation_report_workspace::forecast::{forecast_inflation, TimeSeriesPoint, YearMonth};
//!
//! let mut date = YearMonth::new(2024, 1).unwrap();
//! let mut points = Vec::new();
//! for value in [2.9, 2.8, 2.6, 2.5, 2.4] {
//!     points.push(TimeSeriesPoint::new(date, "DE", "Deutschland", value));
//!     date = date.succ();
//! }
//!
//! let run = forecast_inflation(&points, 3).unwrap();
//! assert_eq!(run.len(), 3);
//! ```

/// Numeric kernels
pub use inflation_math as math;

/// Per-region forecasting
pub use inflation_forecast as forecast;

/// Data loading, analysis and the text report
pub use inflation_report as report;

/// Returns the version of the workspace
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
