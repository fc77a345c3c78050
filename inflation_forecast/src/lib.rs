//! # Inflation Forecast
//!
//! Near-term inflation forecasts for monthly, region-partitioned series.
//!
//! ## Features
//!
//! - Calendar-month time series (`YearMonth`, `TimeSeriesPoint`, `RegionSeries`)
//! - Damped-trend exponential smoothing as the primary model
//! - Linear trend on month offsets as the fallback for short windows or failed fits
//! - Confidence bands that widen with the forecast step
//! - Export of history and forecasts as a polars `DataFrame`, CSV or JSON
//!
//! ## Model Selection
//!
//! Each region is forecast on its own:
//!
//! - **Primary**: the trailing 24 months (or fewer) feed a damped-trend model,
//!   provided at least 12 months are available
//! - **Fallback**: the trailing 12 months feed a least-squares line when the
//!   primary model is not applicable or cannot be fitted
//!
//! The chosen method and window size are recorded on every forecast point.
//!
//! ## Quick Start
//!
//! ```rust
//! use inflation_forecast::{ForecastConfig, ForecastEngine, TimeSeriesPoint, YearMonth};
//!
//! let mut date = YearMonth::new(2023, 1).unwrap();
//! let mut points = Vec::new();
//! for i in 0..18 {
//!     points.push(TimeSeriesPoint::new(date, "AT", "Österreich", 6.0 - 0.2 * i as f64));
//!     date = date.succ();
//! }
//!
//! let engine = ForecastEngine::new(ForecastConfig::with_horizon(6)).unwrap();
//! let run = engine.forecast(&points).unwrap();
//!
//! assert_eq!(run.len(), 6);
//! for point in run.points() {
//!     assert!(point.lower_bound <= point.point_estimate);
//!     assert!(point.point_estimate <= point.upper_bound);
//! }
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{partition_by_region, Region, RegionSeries, TimeSeriesPoint, YearMonth};
pub use crate::engine::{
    forecast_inflation, ForecastEngine, ForecastPoint, ForecastRun, RegionForecast,
};
pub use crate::error::{ForecastError, Result};
pub use crate::export::ForecastTable;
pub use crate::models::{FitFailure, FittedTrend, ForecastMethod, TrendModel};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
