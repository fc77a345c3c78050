//! End-to-end report generation

use crate::analysis::{
    calculate_statistics, compare_regions, identify_trends, RegionStatistics, RegionTrend,
};
use crate::config::ReportConfig;
use crate::html::{render_html_report, write_html_report};
use crate::report::{render_text_report, write_text_report, ReportContext};
use crate::source::DataSource;
use crate::{ReportError, Result};
use inflation_forecast::export::forecast_points_json;
use inflation_forecast::{partition_by_region, ForecastEngine, ForecastRun, ForecastTable};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

/// File name of the combined history and forecast table
pub const FORECAST_CSV: &str = "forecast.csv";

/// File name of the forecast points as JSON
pub const FORECAST_JSON: &str = "forecast.json";

const STEPS: usize = 6;

/// Files written by [`run_report`] and the results they were built from
#[derive(Debug, Clone)]
pub struct ReportArtifacts {
    pub report_path: PathBuf,
    pub html_path: PathBuf,
    pub forecast_csv: PathBuf,
    pub forecast_json: PathBuf,
    /// Observations loaded from the source
    pub observations: usize,
    pub statistics: Vec<RegionStatistics>,
    pub trends: Vec<RegionTrend>,
    pub forecast: ForecastRun,
}

fn step(n: usize, message: &str) {
    info!("[{}/{}] {}", n, STEPS, message);
}

/// Load, forecast, analyse and write the report files.
///
/// Fails on invalid configuration, unreadable or malformed input, and
/// when the source has no observations for any configured country.
pub fn run_report(config: &ReportConfig, source: &DataSource) -> Result<ReportArtifacts> {
    config.validate()?;
    let settings = &config.report;

    step(1, &format!("Loading data from {}", source));
    let points = source.load(settings)?;
    if points.is_empty() {
        return Err(ReportError::MalformedInput(format!(
            "No observations for {} from {} on",
            settings.countries.join(", "),
            settings.historical_start
        )));
    }

    step(2, "Splitting observations by region");
    let series = partition_by_region(&points, &settings.regions())?;
    for region in series.iter().filter(|s| s.is_empty()) {
        warn!("{}: no observations in source", region.region().code);
    }

    step(3, &format!("Forecasting {} months", config.forecast.horizon));
    let engine = ForecastEngine::new(config.forecast.clone())?;
    let forecast = engine.forecast_regions(&series)?;

    step(4, "Computing statistics and comparison");
    let statistics = calculate_statistics(&points, settings.statistics_start)?;
    let trends = identify_trends(&points)?;
    let comparison = compare_regions(&points, &settings.primary_region, &settings.benchmark_region);

    step(5, "Rendering text and HTML report");
    let ctx = ReportContext {
        settings,
        points: &points,
        statistics: &statistics,
        trends: &trends,
        comparison: &comparison,
        forecast: &forecast,
        generated_at: chrono::Local::now().naive_local(),
    };
    let report_path = write_text_report(&render_text_report(&ctx), &settings.output_dir)?;
    let html_path = write_html_report(&render_html_report(&ctx), &settings.output_dir)?;

    step(6, "Exporting forecast tables");
    let forecast_csv = settings.output_dir.join(FORECAST_CSV);
    ForecastTable::with_history(&points, &forecast).write_csv(&forecast_csv)?;
    let forecast_json = settings.output_dir.join(FORECAST_JSON);
    fs::write(&forecast_json, forecast_points_json(&forecast)?)?;

    info!(
        "Report complete: {} regions forecast, {} skipped, {} failed",
        forecast.regions().len(),
        forecast.skipped().len(),
        forecast.failed().len()
    );

    Ok(ReportArtifacts {
        report_path,
        html_path,
        forecast_csv,
        forecast_json,
        observations: points.len(),
        statistics,
        trends,
        forecast,
    })
}
