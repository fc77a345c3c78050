//! Forecast engine configuration

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Settings for [`ForecastEngine`](crate::engine::ForecastEngine).
///
/// Can be embedded as a `[forecast]` table in a TOML file; every field has
/// a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of future months to forecast
    pub horizon: usize,
    /// Longest trailing window used to fit the primary model
    pub max_training_window: usize,
    /// Minimum window length for the damped-trend model
    pub min_primary_observations: usize,
    /// Trailing window used by the linear-trend fallback
    pub fallback_window: usize,
    /// Normal quantile for the confidence band
    pub z_score: f64,
    /// Band half-width grows as `sqrt(1 + step / widening_steps)`
    pub widening_steps: f64,
    /// Floor for lower bounds and point estimates; `None` disables it
    pub lower_floor: Option<f64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 12,
            max_training_window: 24,
            min_primary_observations: 12,
            fallback_window: 12,
            z_score: 1.96,
            widening_steps: 6.0,
            lower_floor: Some(0.0),
        }
    }
}

impl ForecastConfig {
    /// Default settings with a different horizon
    pub fn with_horizon(horizon: usize) -> Self {
        Self {
            horizon,
            ..Self::default()
        }
    }

    /// Parse from a TOML document containing the fields at top level
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ForecastConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings can drive a forecast
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be at least 1 month".to_string(),
            ));
        }
        if self.max_training_window == 0 || self.fallback_window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Training windows must be positive".to_string(),
            ));
        }
        if self.min_primary_observations < 2 {
            return Err(ForecastError::InvalidParameter(
                "Damped trend needs at least 2 observations".to_string(),
            ));
        }
        if self.min_primary_observations > self.max_training_window {
            return Err(ForecastError::InvalidParameter(format!(
                "min_primary_observations ({}) exceeds max_training_window ({})",
                self.min_primary_observations, self.max_training_window
            )));
        }
        if !(self.z_score.is_finite() && self.z_score > 0.0) {
            return Err(ForecastError::InvalidParameter(
                "z_score must be positive".to_string(),
            ));
        }
        if !(self.widening_steps.is_finite() && self.widening_steps > 0.0) {
            return Err(ForecastError::InvalidParameter(
                "widening_steps must be positive".to_string(),
            ));
        }
        if let Some(floor) = self.lower_floor {
            if !floor.is_finite() {
                return Err(ForecastError::InvalidParameter(
                    "lower_floor must be finite".to_string(),
                ));
            }
        }
        Ok(())
    }
}
