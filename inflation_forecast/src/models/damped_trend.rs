//! Damped-trend exponential smoothing model

use crate::data::TimeSeriesPoint;
use crate::models::{FitFailure, FittedTrend, ForecastMethod, TrendModel};
use inflation_math::{optimize_damped, MathError, SmoothingFit, SmoothingGrid};
use log::debug;

/// Additive damped-trend smoothing without seasonality.
///
/// Smoothing constants are picked by grid search on each fit.
#[derive(Debug, Clone)]
pub struct DampedTrend {
    /// Name of the model
    name: String,
    /// Shortest window this model accepts
    min_observations: usize,
    /// Parameter candidates
    grid: SmoothingGrid,
}

/// Trained damped-trend model
#[derive(Debug, Clone)]
pub struct FittedDampedTrend {
    observed: Vec<f64>,
    fit: SmoothingFit,
    alpha: f64,
    beta: f64,
}

impl DampedTrend {
    /// Create the model with the default parameter grid
    pub fn new(min_observations: usize) -> Self {
        Self::with_grid(min_observations, SmoothingGrid::default())
    }

    pub fn with_grid(min_observations: usize, grid: SmoothingGrid) -> Self {
        Self {
            name: format!("Damped Trend (min_obs={})", min_observations),
            min_observations,
            grid,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_observations(&self) -> usize {
        self.min_observations
    }
}

impl Default for DampedTrend {
    fn default() -> Self {
        Self::new(12)
    }
}

impl TrendModel for DampedTrend {
    type Fitted = FittedDampedTrend;

    fn fit(&self, window: &[TimeSeriesPoint]) -> Result<Self::Fitted, FitFailure> {
        let min_required = self.min_observations.max(2);
        if window.len() < min_required {
            return Err(FitFailure::InsufficientData {
                required: min_required,
                available: window.len(),
            });
        }

        let observed: Vec<f64> = window.iter().map(|p| p.value).collect();
        let best = optimize_damped(&observed, &self.grid).map_err(|err| match err {
            MathError::InsufficientData(_) => FitFailure::InsufficientData {
                required: min_required,
                available: observed.len(),
            },
            other => FitFailure::Numerical(other.to_string()),
        })?;

        debug!(
            "{}: alpha={:.2} beta={:.2} phi={:.2} sse={:.4} ({} candidates)",
            self.name,
            best.smoother.alpha(),
            best.smoother.beta(),
            best.smoother.phi(),
            best.fit.sse,
            best.evaluated
        );

        Ok(FittedDampedTrend {
            observed,
            alpha: best.smoother.alpha(),
            beta: best.smoother.beta(),
            fit: best.fit,
        })
    }

    fn method(&self) -> ForecastMethod {
        ForecastMethod::DampedTrend
    }
}

impl FittedDampedTrend {
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn phi(&self) -> f64 {
        self.fit.state.phi
    }
}

impl FittedTrend for FittedDampedTrend {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::DampedTrend
    }

    fn observed(&self) -> &[f64] {
        &self.observed
    }

    fn fitted_values(&self) -> Vec<f64> {
        self.fit.fitted.clone()
    }

    fn forecast(&self, horizon: usize) -> Vec<f64> {
        self.fit.state.forecast_path(horizon)
    }
}
