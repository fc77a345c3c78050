//! Trend models for monthly inflation series
//!
//! A model is fitted on a training window and either yields a fitted trend
//! or a typed [`FitFailure`]. Callers decide what to do on failure; the
//! engine uses it to switch to the linear fallback.

use crate::data::TimeSeriesPoint;
use inflation_math::dispersion::{population_std_dev, residuals};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

pub mod damped_trend;
pub mod linear_trend;

pub use damped_trend::{DampedTrend, FittedDampedTrend};
pub use linear_trend::{FittedLinearTrend, LinearTrend};

/// Which model produced a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForecastMethod {
    /// Additive damped-trend exponential smoothing
    DampedTrend,
    /// Ordinary least squares on month offsets
    LinearTrend,
}

impl ForecastMethod {
    /// Stable label for tables and logs
    pub fn label(&self) -> &'static str {
        match self {
            ForecastMethod::DampedTrend => "damped_trend",
            ForecastMethod::LinearTrend => "linear_trend",
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a model could not be fitted
#[derive(Debug, Clone, PartialEq)]
pub enum FitFailure {
    /// The window is shorter than the model requires
    InsufficientData { required: usize, available: usize },
    /// The fitting procedure failed numerically
    Numerical(String),
}

impl fmt::Display for FitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitFailure::InsufficientData {
                required,
                available,
            } => write!(
                f,
                "insufficient data: need {} observations, have {}",
                required, available
            ),
            FitFailure::Numerical(msg) => write!(f, "numerical failure: {}", msg),
        }
    }
}

impl std::error::Error for FitFailure {}

/// A model fitted on one region's training window
pub trait FittedTrend: Debug {
    /// Method that produced this fit
    fn method(&self) -> ForecastMethod;

    /// Observations the model was fitted on
    fn observed(&self) -> &[f64];

    /// In-sample fitted values aligned with [`observed`](Self::observed)
    fn fitted_values(&self) -> Vec<f64>;

    /// Point forecasts for the next `horizon` months
    fn forecast(&self, horizon: usize) -> Vec<f64>;

    /// Number of observations in the training window
    fn window_size(&self) -> usize {
        self.observed().len()
    }

    /// Residual standard deviation, `observed - fitted`
    fn std_error(&self) -> f64 {
        population_std_dev(&residuals(self.observed(), &self.fitted_values()))
    }
}

/// A trend model that can be fitted on a training window
pub trait TrendModel: Debug {
    /// The type of fitted model produced
    type Fitted: FittedTrend;

    /// Fit on chronologically ordered points of a single region
    fn fit(&self, window: &[TimeSeriesPoint]) -> Result<Self::Fitted, FitFailure>;

    /// Method tag of the fits this model produces
    fn method(&self) -> ForecastMethod;
}
