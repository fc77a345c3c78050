//! Linear trend model fitted on calendar month offsets

use crate::data::{TimeSeriesPoint, YearMonth};
use crate::models::{FitFailure, FittedTrend, ForecastMethod, TrendModel};
use inflation_math::{LinearRegression, MathError};

/// Ordinary least squares of value on month offset.
///
/// Offsets count calendar months from the first point of the window, so
/// gaps in the series are honoured.
#[derive(Debug, Clone, Default)]
pub struct LinearTrend;

/// Trained linear-trend model
#[derive(Debug, Clone)]
pub struct FittedLinearTrend {
    regression: LinearRegression,
    observed: Vec<f64>,
    /// Offset of the last observation relative to the window start
    last_offset: i64,
}

impl LinearTrend {
    pub fn new() -> Self {
        Self
    }
}

impl TrendModel for LinearTrend {
    type Fitted = FittedLinearTrend;

    fn fit(&self, window: &[TimeSeriesPoint]) -> Result<Self::Fitted, FitFailure> {
        let first: YearMonth = match window.first() {
            Some(point) => point.date,
            None => {
                return Err(FitFailure::InsufficientData {
                    required: 1,
                    available: 0,
                })
            }
        };

        let offsets: Vec<i64> = window.iter().map(|p| p.date.months_since(first)).collect();
        let xs: Vec<f64> = offsets.iter().map(|&o| o as f64).collect();
        let observed: Vec<f64> = window.iter().map(|p| p.value).collect();

        let regression = match LinearRegression::fit(&xs, &observed) {
            Ok(regression) => regression,
            // A single month leaves no slope to estimate
            Err(MathError::CalculationError(_)) => LinearRegression::constant(&xs, &observed)
                .map_err(|e| FitFailure::Numerical(e.to_string()))?,
            Err(e) => return Err(FitFailure::Numerical(e.to_string())),
        };

        if !regression.slope().is_finite() || !regression.intercept().is_finite() {
            return Err(FitFailure::Numerical(
                "Regression coefficients are not finite".to_string(),
            ));
        }

        Ok(FittedLinearTrend {
            regression,
            observed,
            last_offset: offsets.last().copied().unwrap_or(0),
        })
    }

    fn method(&self) -> ForecastMethod {
        ForecastMethod::LinearTrend
    }
}

impl FittedLinearTrend {
    pub fn slope(&self) -> f64 {
        self.regression.slope()
    }

    pub fn intercept(&self) -> f64 {
        self.regression.intercept()
    }
}

impl FittedTrend for FittedLinearTrend {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::LinearTrend
    }

    fn observed(&self) -> &[f64] {
        &self.observed
    }

    fn fitted_values(&self) -> Vec<f64> {
        self.regression.fitted()
    }

    fn forecast(&self, horizon: usize) -> Vec<f64> {
        (1..=horizon as i64)
            .map(|step| self.regression.predict((self.last_offset + step) as f64))
            .collect()
    }
}
