//! Per-region forecast engine
//!
//! For every region the engine fits the damped-trend model on the trailing
//! training window. If that window is too short or the fit fails, the
//! region falls back to a linear trend on a shorter window. Regions never
//! share state; one region's data cannot change another region's output.

use crate::config::ForecastConfig;
use crate::data::{partition_by_region, RegionSeries, TimeSeriesPoint, YearMonth};
use crate::error::{ForecastError, Result};
use crate::models::{
    DampedTrend, FitFailure, FittedTrend, ForecastMethod, LinearTrend, TrendModel,
};
use crate::utils::{band_half_width, bounded_interval, future_months};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// One forecast month for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: YearMonth,
    pub region_code: String,
    pub region_name: String,
    /// Model output, raised to the configured floor if it fell below it
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub method: ForecastMethod,
    pub std_error: f64,
    pub training_window_size: usize,
}

impl ForecastPoint {
    /// `upper_bound - lower_bound`
    pub fn band_width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// Forecast of a single region together with how it was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionForecast {
    pub region_code: String,
    pub region_name: String,
    pub method: ForecastMethod,
    pub std_error: f64,
    pub training_window_size: usize,
    /// Why the primary model was not used, if it was not
    pub fallback_reason: Option<String>,
    pub points: Vec<ForecastPoint>,
}

/// Forecasts of all regions of one run, in input region order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastRun {
    regions: Vec<RegionForecast>,
    /// Regions that had no observations
    skipped: Vec<String>,
    /// Regions where neither model could be fitted, with the reason
    failed: Vec<(String, String)>,
}

impl ForecastRun {
    pub fn regions(&self) -> &[RegionForecast] {
        &self.regions
    }

    /// Codes of regions skipped for lack of data
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Regions without a forecast because both models failed, as
    /// `(code, reason)`
    pub fn failed(&self) -> &[(String, String)] {
        &self.failed
    }

    /// Forecast of region `code`, if it was forecast
    pub fn region(&self, code: &str) -> Option<&RegionForecast> {
        self.regions.iter().find(|r| r.region_code == code)
    }

    /// All forecast points, region by region
    pub fn points(&self) -> impl Iterator<Item = &ForecastPoint> {
        self.regions.iter().flat_map(|r| r.points.iter())
    }

    /// Points for region `code` (empty if the region was skipped)
    pub fn points_for<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a ForecastPoint> + 'a {
        self.points().filter(move |p| p.region_code == code)
    }

    /// Total number of forecast points
    pub fn len(&self) -> usize {
        self.regions.iter().map(|r| r.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Produces fixed-horizon forecasts with confidence bands per region
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    config: ForecastConfig,
    primary: DampedTrend,
    fallback: LinearTrend,
}

impl ForecastEngine {
    /// Create an engine; fails if the configuration is invalid
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            primary: DampedTrend::new(config.min_primary_observations),
            fallback: LinearTrend::new(),
            config,
        })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast every region found in a flat table of observations
    pub fn forecast(&self, points: &[TimeSeriesPoint]) -> Result<ForecastRun> {
        let series = partition_by_region(points, &[])?;
        self.forecast_regions(&series)
    }

    /// Forecast each region independently.
    ///
    /// A region where both models fail is recorded in
    /// [`ForecastRun::failed`]; the remaining regions are still forecast.
    pub fn forecast_regions(&self, series: &[RegionSeries]) -> Result<ForecastRun> {
        let mut run = ForecastRun::default();

        for region_series in series {
            let code = &region_series.region().code;
            match self.forecast_region(region_series) {
                Ok(Some(forecast)) => run.regions.push(forecast),
                Ok(None) => run.skipped.push(code.clone()),
                Err(ForecastError::ModelFit(reason)) => {
                    warn!("{}: no forecast, {}", code, reason);
                    run.failed.push((code.clone(), reason));
                }
                Err(err) => return Err(err),
            }
        }

        Ok(run)
    }

    /// Forecast one region; `None` when the region has no observations.
    ///
    /// Fails with [`ForecastError::ModelFit`] when the fallback model cannot
    /// be fitted either.
    pub fn forecast_region(&self, series: &RegionSeries) -> Result<Option<RegionForecast>> {
        let region = series.region();
        let last_date = match series.last_date() {
            Some(date) => date,
            None => {
                warn!("{}: no observations, skipping forecast", region.code);
                return Ok(None);
            }
        };

        let primary_window = series.tail(self.config.max_training_window);
        let (fitted, fallback_reason): (Box<dyn FittedTrend>, Option<String>) =
            match self.primary.fit(primary_window) {
                Ok(fitted) => (Box::new(fitted) as Box<dyn FittedTrend>, None),
                Err(failure) => {
                    let fallback_window = series.tail(self.config.fallback_window);
                    let fitted = self.fallback.fit(fallback_window).map_err(|e| {
                        ForecastError::ModelFit(format!(
                            "{}: primary failed ({}); fallback failed ({})",
                            region.code, failure, e
                        ))
                    })?;
                    log_fallback(&region.code, &failure);
                    (Box::new(fitted) as Box<dyn FittedTrend>, Some(failure.to_string()))
                }
            };

        let method = fitted.method();
        let std_error = fitted.std_error();
        let window_size = fitted.window_size();
        let estimates = fitted.forecast(self.config.horizon);
        let dates = future_months(last_date, self.config.horizon);

        info!(
            "{}: {} on {} months, std error {:.3}",
            region.code, method, window_size, std_error
        );

        let points = dates
            .into_iter()
            .zip(estimates)
            .enumerate()
            .map(|(step, (date, estimate))| {
                let half_width = band_half_width(
                    std_error,
                    self.config.z_score,
                    step,
                    self.config.widening_steps,
                );
                let (point_estimate, lower_bound, upper_bound) =
                    bounded_interval(estimate, half_width, self.config.lower_floor);
                ForecastPoint {
                    date,
                    region_code: region.code.clone(),
                    region_name: region.name.clone(),
                    point_estimate,
                    lower_bound,
                    upper_bound,
                    method,
                    std_error,
                    training_window_size: window_size,
                }
            })
            .collect();

        Ok(Some(RegionForecast {
            region_code: region.code.clone(),
            region_name: region.name.clone(),
            method,
            std_error,
            training_window_size: window_size,
            fallback_reason,
            points,
        }))
    }
}

fn log_fallback(code: &str, failure: &FitFailure) {
    match failure {
        FitFailure::InsufficientData { .. } => {
            info!("{}: using linear trend ({})", code, failure)
        }
        FitFailure::Numerical(_) => {
            warn!("{}: damped trend failed, using linear trend ({})", code, failure)
        }
    }
}

/// Forecast with default settings except for the horizon
pub fn forecast_inflation(points: &[TimeSeriesPoint], horizon: usize) -> Result<ForecastRun> {
    ForecastEngine::new(ForecastConfig::with_horizon(horizon))?.forecast(points)
}
