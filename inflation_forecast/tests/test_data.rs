use inflation_forecast::data::{partition_by_region, Region, RegionSeries, TimeSeriesPoint, YearMonth};
use inflation_forecast::ForecastError;
use rstest::rstest;

fn point(date: &str, code: &str, value: f64) -> TimeSeriesPoint {
    TimeSeriesPoint::new(date.parse().unwrap(), code, code, value)
}

#[rstest]
#[case("2023-01", 2023, 1)]
#[case("2023-12-01", 2023, 12)]
#[case(" 2024-07 ", 2024, 7)]
#[case("2025M02", 2025, 2)]
fn test_year_month_formats(#[case] input: &str, #[case] year: i32, #[case] month: u32) {
    let parsed: YearMonth = input.parse().unwrap();
    assert_eq!(parsed.year(), year);
    assert_eq!(parsed.month(), month);
}

#[rstest]
#[case("2023-00")]
#[case("2023-13")]
#[case("23/01/2023")]
#[case("")]
fn test_year_month_rejects(#[case] input: &str) {
    assert!(matches!(
        input.parse::<YearMonth>(),
        Err(ForecastError::MalformedInput(_))
    ));
}

#[test]
fn test_year_month_serde() {
    let month = YearMonth::new(2024, 9).unwrap();
    let json = serde_json::to_string(&month).unwrap();
    assert_eq!(json, "\"2024-09\"");

    let back: YearMonth = serde_json::from_str(&json).unwrap();
    assert_eq!(back, month);
    assert!(serde_json::from_str::<YearMonth>("\"2024-19\"").is_err());
}

#[test]
fn test_series_rejects_foreign_region() {
    let points = vec![point("2024-01", "AT", 1.0), point("2024-02", "DE", 1.0)];
    let result = RegionSeries::new(Region::new("AT", "Österreich"), points);
    assert!(matches!(result, Err(ForecastError::MalformedInput(_))));
}

#[test]
fn test_partition_uses_latest_name() {
    let points = vec![
        TimeSeriesPoint::new("2024-01".parse().unwrap(), "EA20", "Euro area", 2.0),
        TimeSeriesPoint::new("2024-02".parse().unwrap(), "EA20", "Eurozone", 2.1),
    ];
    let parts = partition_by_region(&points, &[]).unwrap();
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].region().name, "Eurozone");
}

#[test]
fn test_partition_propagates_malformed_input() {
    let points = vec![point("2024-01", "AT", 1.0), point("2024-01", "AT", 1.1)];
    assert!(partition_by_region(&points, &[]).is_err());
}
