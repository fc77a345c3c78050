use inflation_forecast::{ForecastMethod, ForecastPoint};
use inflation_report::pipeline::{FORECAST_CSV, FORECAST_JSON};
use inflation_report::html::HTML_REPORT_FILE;
use inflation_report::report::REPORT_FILE;
use inflation_report::{run_report, DataSource, ReportConfig, ReportError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn config_for(output_dir: &Path, horizon: usize) -> ReportConfig {
    let mut config = ReportConfig::default();
    config.report.output_dir = output_dir.to_path_buf();
    config.forecast.horizon = horizon;
    config
}

#[test]
fn test_sample_report_writes_all_files() {
    let dir = tempdir().unwrap();
    let config = config_for(dir.path(), 12);

    let artifacts = run_report(&config, &DataSource::Sample { seed: 42 }).unwrap();

    assert_eq!(artifacts.report_path, dir.path().join(REPORT_FILE));
    assert_eq!(artifacts.html_path, dir.path().join(HTML_REPORT_FILE));
    assert_eq!(artifacts.forecast_csv, dir.path().join(FORECAST_CSV));
    assert_eq!(artifacts.forecast_json, dir.path().join(FORECAST_JSON));
    assert_eq!(artifacts.observations, 102);

    // Three regions, 12 months each, all after the last sample month
    assert_eq!(artifacts.forecast.regions().len(), 3);
    assert_eq!(artifacts.forecast.len(), 36);
    for point in artifacts.forecast.points() {
        assert_eq!(point.method, ForecastMethod::DampedTrend);
        assert_eq!(point.training_window_size, 24);
        assert!(point.date.to_string().as_str() >= "2025-11");
        assert!(point.lower_bound >= 0.0);
        assert!(point.lower_bound <= point.point_estimate);
        assert!(point.point_estimate <= point.upper_bound);
    }

    let report = fs::read_to_string(&artifacts.report_path).unwrap();
    assert!(report.starts_with(&"=".repeat(80)));
    assert!(report.contains("Österreich - Aktuelle Inflationsrate (Okt 2025)"));
    assert!(report.contains("Methode: damped_trend"));
    assert!(report.trim_end().ends_with(&"=".repeat(80)));

    let html = fs::read_to_string(&artifacts.html_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Datenstand:</span> <strong>Okt 2025"));
    assert!(html.contains("Statistische Kennzahlen (seit 2020)"));
    assert!(html.contains("Inflationsprognose"));
    assert_eq!(html.matches("<th>Konfidenzintervall</th>").count(), 3);

    let csv = fs::read_to_string(&artifacts.forecast_csv).unwrap();
    assert_eq!(csv.lines().count(), 1 + 102 + 36);
    assert!(csv.lines().next().unwrap().starts_with("date,region_code,region_name"));

    let json = fs::read_to_string(&artifacts.forecast_json).unwrap();
    let parsed: Vec<ForecastPoint> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), 36);
}

#[rstest]
#[case(1)]
#[case(6)]
#[case(18)]
fn test_horizon_is_respected(#[case] horizon: usize) {
    let dir = tempdir().unwrap();
    let artifacts =
        run_report(&config_for(dir.path(), horizon), &DataSource::Sample { seed: 7 }).unwrap();

    for region in artifacts.forecast.regions() {
        assert_eq!(region.points.len(), horizon);
    }
}

#[test]
fn test_missing_region_is_skipped() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("rates.csv");
    let mut content = String::from("date,geo,value\n");
    for month in 1..=12 {
        content.push_str(&format!("2024-{:02},AT,{}\n", month, 4.0 - 0.1 * month as f64));
    }
    for month in 1..=6 {
        content.push_str(&format!("2024-{:02},DE,{}\n", month, 3.0));
    }
    fs::write(&input, content).unwrap();

    let artifacts = run_report(
        &config_for(&dir.path().join("out"), 3),
        &DataSource::TidyCsv(input),
    )
    .unwrap();

    let forecast = &artifacts.forecast;
    assert_eq!(forecast.skipped().to_vec(), vec!["EA20".to_string()]);
    assert_eq!(forecast.region("AT").unwrap().method, ForecastMethod::DampedTrend);
    assert_eq!(forecast.region("DE").unwrap().method, ForecastMethod::LinearTrend);

    let report = fs::read_to_string(&artifacts.report_path).unwrap();
    assert!(report.contains("Eurozone: keine Daten, keine Prognose"));
    assert!(report.contains("Keine gemeinsamen Monate"));
}

#[test]
fn test_malformed_input_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("rates.csv");
    fs::write(&input, "date,geo,value\n2024-01,AT,2.0\n2024-01,AT,2.1\n").unwrap();

    let result = run_report(&config_for(dir.path(), 3), &DataSource::TidyCsv(input));
    assert!(matches!(result, Err(ReportError::Forecast(_))));
    assert!(!dir.path().join(REPORT_FILE).exists());
}

#[test]
fn test_empty_source_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("rates.csv");
    fs::write(&input, "date,geo,value\n2024-01,FR,2.0\n").unwrap();

    let result = run_report(&config_for(dir.path(), 3), &DataSource::TidyCsv(input));
    assert!(matches!(result, Err(ReportError::MalformedInput(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let source = DataSource::EurostatCsv(dir.path().join("missing.csv"));
    let result = run_report(&config_for(dir.path(), 3), &source);
    assert!(matches!(result, Err(ReportError::Io(_))));
}
