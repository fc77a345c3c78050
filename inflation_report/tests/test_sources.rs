use inflation_report::{DataSource, ReportSettings};
use inflation_forecast::YearMonth;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_eurostat_file_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prc_hicp_manr.csv");
    fs::write(
        &path,
        "freq,unit,coicop,geo\\TIME_PERIOD,2019-12,2020-01,2020-02\n\
         M,RCH_A,CP00,DE,1.5,1.6,1.7\n\
         M,RCH_A,CP00,AT,1.8,2.2,2.2\n\
         M,RCH_A,CP00,EA20,1.3,1.4,:\n",
    )
    .unwrap();

    let settings = ReportSettings {
        historical_start: YearMonth::january(2020),
        ..ReportSettings::default()
    };
    let points = DataSource::EurostatCsv(path).load(&settings).unwrap();

    assert_eq!(points.len(), 5);
    let dates: Vec<String> = points.iter().map(|p| p.date.to_string()).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert!(points.iter().all(|p| p.date >= settings.historical_start));
}

#[test]
fn test_sample_source_respects_countries() {
    let settings = ReportSettings {
        countries: vec!["AT".to_string(), "EA20".to_string()],
        ..ReportSettings::default()
    };
    let points = DataSource::Sample { seed: 42 }.load(&settings).unwrap();

    assert_eq!(points.len(), 68);
    assert!(points.iter().all(|p| p.region_code != "DE"));
}

#[test]
fn test_source_display() {
    assert_eq!(DataSource::Sample { seed: 3 }.to_string(), "sample data (seed 3)");
}
