//! Forecasting kernels for trend extrapolation
//!
//! Contains:
//! - Linear Regression over explicit abscissae
//! - Damped-trend exponential smoothing (Holt's additive damped method)

use crate::{MathError, Result};

/// Ordinary least squares fit of `y = slope * x + intercept`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    slope: f64,
    intercept: f64,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearRegression {
    /// Fit the regression to paired observations
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(MathError::InvalidInput(format!(
                "x and y lengths differ ({} vs {})",
                xs.len(),
                ys.len()
            )));
        }
        if xs.is_empty() {
            return Err(MathError::InsufficientData(
                "Linear regression needs at least 1 point".to_string(),
            ));
        }

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        if denominator.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        Ok(Self {
            slope,
            intercept,
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// A horizontal line through the mean of `ys`.
    ///
    /// Used when the abscissae cannot support a slope (a single point).
    pub fn constant(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if ys.is_empty() || xs.len() != ys.len() {
            return Err(MathError::InsufficientData(
                "Constant fit needs matching, non-empty inputs".to_string(),
            ));
        }
        let mean = ys.iter().sum::<f64>() / ys.len() as f64;
        Ok(Self {
            slope: 0.0,
            intercept: mean,
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Predicted value at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// In-sample predictions for the training abscissae
    pub fn fitted(&self) -> Vec<f64> {
        self.xs.iter().map(|&x| self.predict(x)).collect()
    }

    /// Get the slope (trend direction and strength)
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Get the intercept
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Get the R-squared value (coefficient of determination)
    pub fn r_squared(&self) -> Result<f64> {
        let y_mean = self.ys.iter().sum::<f64>() / self.ys.len() as f64;

        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;
        for (&x, &y) in self.xs.iter().zip(self.ys.iter()) {
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - self.predict(x)).powi(2);
        }

        if ss_total.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate R-squared: total sum of squares is too small".to_string(),
            ));
        }

        Ok(1.0 - (ss_residual / ss_total))
    }
}

/// Damped-trend exponential smoothing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedTrendSmoothing {
    alpha: f64,
    beta: f64,
    phi: f64,
}

/// Level and trend after the last observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedState {
    pub level: f64,
    pub trend: f64,
    pub phi: f64,
}

/// Output of running the smoothing recursion over a series
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingFit {
    /// One-step-ahead fitted values, same length as the input
    pub fitted: Vec<f64>,
    /// Sum of squared one-step errors
    pub sse: f64,
    /// Final state, used for multi-step forecasts
    pub state: DampedState,
}

impl DampedTrendSmoothing {
    /// Create the smoother. `alpha` and `beta` must lie in (0, 1), `phi` in (0, 1].
    pub fn new(alpha: f64, beta: f64, phi: f64) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(MathError::InvalidInput(
                "Alpha must be between 0 and 1 (exclusive)".to_string(),
            ));
        }
        if beta <= 0.0 || beta >= 1.0 {
            return Err(MathError::InvalidInput(
                "Beta must be between 0 and 1 (exclusive)".to_string(),
            ));
        }
        if phi <= 0.0 || phi > 1.0 {
            return Err(MathError::InvalidInput(
                "Phi must be in (0, 1]".to_string(),
            ));
        }

        Ok(Self { alpha, beta, phi })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Run the recursion over `values`.
    ///
    /// The level starts at the first observation and the trend at the first
    /// difference. The first fitted value equals the first observation.
    pub fn filter(&self, values: &[f64]) -> Result<SmoothingFit> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData(
                "Damped trend smoothing needs at least 2 points".to_string(),
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Series contains non-finite values".to_string(),
            ));
        }

        let mut level = values[0];
        let mut trend = values[1] - values[0];
        let mut fitted = Vec::with_capacity(values.len());
        let mut sse = 0.0;
        fitted.push(values[0]);

        for &value in &values[1..] {
            let prediction = level + self.phi * trend;
            fitted.push(prediction);
            sse += (value - prediction).powi(2);

            let new_level = self.alpha * value + (1.0 - self.alpha) * prediction;
            let new_trend =
                self.beta * (new_level - level) + (1.0 - self.beta) * self.phi * trend;
            level = new_level;
            trend = new_trend;
        }

        if !level.is_finite() || !trend.is_finite() || !sse.is_finite() {
            return Err(MathError::CalculationError(
                "Smoothing state diverged".to_string(),
            ));
        }

        Ok(SmoothingFit {
            fitted,
            sse,
            state: DampedState {
                level,
                trend,
                phi: self.phi,
            },
        })
    }
}

impl DampedState {
    /// Forecast `h` steps ahead (h >= 1)
    pub fn forecast(&self, h: usize) -> f64 {
        let mut damping = 0.0;
        let mut power = 1.0;
        for _ in 0..h {
            power *= self.phi;
            damping += power;
        }
        self.level + damping * self.trend
    }

    /// Forecasts for steps 1..=horizon
    pub fn forecast_path(&self, horizon: usize) -> Vec<f64> {
        (1..=horizon).map(|h| self.forecast(h)).collect()
    }
}
