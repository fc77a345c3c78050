//! Monthly time series data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month. Ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a month; `month` is 1-based
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::MalformedInput(format!(
                "Month out of range: {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// January of `year`
    pub const fn january(year: i32) -> Self {
        Self { year, month: 1 }
    }

    /// Month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month; December rolls into January
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Whole months from `earlier` to `self` (negative if `earlier` is later)
    pub fn months_since(&self, earlier: YearMonth) -> i64 {
        (self.year as i64 - earlier.year as i64) * 12 + (self.month as i64 - earlier.month as i64)
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // Month is validated on construction, so day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ForecastError;

    /// Accepts `YYYY-MM`, `YYYY-MM-DD` and Eurostat's `YYYYMmm` period codes
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }

        let (year, month) = s
            .split_once('-')
            .or_else(|| s.split_once('M'))
            .ok_or_else(|| ForecastError::MalformedInput(format!("Invalid month: '{}'", s)))?;

        let year: i32 = year
            .parse()
            .map_err(|_| ForecastError::MalformedInput(format!("Invalid year in '{}'", s)))?;
        let month: u32 = month
            .parse()
            .map_err(|_| ForecastError::MalformedInput(format!("Invalid month in '{}'", s)))?;

        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = ForecastError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// A region over which forecasts are computed independently
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Short code, e.g. `AT` or `EA20`
    pub code: String,
    /// Display name
    pub name: String,
}

impl Region {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// One observed inflation rate for one region in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: YearMonth,
    pub region_code: String,
    pub region_name: String,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(
        date: YearMonth,
        region_code: impl Into<String>,
        region_name: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            date,
            region_code: region_code.into(),
            region_name: region_name.into(),
            value,
        }
    }
}

/// All observations of a single region, in chronological order
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSeries {
    region: Region,
    points: Vec<TimeSeriesPoint>,
}

impl RegionSeries {
    /// Build a region series.
    ///
    /// Points are sorted by month. Points from other regions, non-finite
    /// values and repeated months are rejected as malformed input.
    pub fn new(region: Region, mut points: Vec<TimeSeriesPoint>) -> Result<Self> {
        if let Some(foreign) = points.iter().find(|p| p.region_code != region.code) {
            return Err(ForecastError::MalformedInput(format!(
                "Point for region '{}' in series for '{}'",
                foreign.region_code, region.code
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.value.is_finite()) {
            return Err(ForecastError::MalformedInput(format!(
                "Non-finite value {} for {} in {}",
                bad.value, region.code, bad.date
            )));
        }

        points.sort_by_key(|p| p.date);
        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(ForecastError::MalformedInput(format!(
                "Duplicate observation for {} in {}",
                region.code, pair[0].date
            )));
        }

        Ok(Self { region, points })
    }

    /// A region with no observations
    pub fn empty(region: Region) -> Self {
        Self {
            region,
            points: Vec::new(),
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Latest observed month, if any
    pub fn last_date(&self) -> Option<YearMonth> {
        self.points.last().map(|p| p.date)
    }

    /// The most recent `size` observations (or all of them if fewer)
    pub fn tail(&self, size: usize) -> &[TimeSeriesPoint] {
        let start = self.points.len().saturating_sub(size);
        &self.points[start..]
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Split a flat table into per-region series.
///
/// Regions keep the order in which they first appear; any region in
/// `expected` without observations is appended as an empty series. The
/// display name comes from the region's most recent point.
pub fn partition_by_region(
    points: &[TimeSeriesPoint],
    expected: &[Region],
) -> Result<Vec<RegionSeries>> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: std::collections::HashMap<String, Vec<TimeSeriesPoint>> =
        std::collections::HashMap::new();

    for point in points {
        if !grouped.contains_key(&point.region_code) {
            order.push(point.region_code.clone());
        }
        grouped
            .entry(point.region_code.clone())
            .or_default()
            .push(point.clone());
    }

    let mut result = Vec::with_capacity(order.len() + expected.len());
    for code in order {
        let region_points = grouped.remove(&code).unwrap_or_default();
        let name = region_points
            .iter()
            .max_by_key(|p| p.date)
            .map(|p| p.region_name.clone())
            .unwrap_or_else(|| code.clone());
        result.push(RegionSeries::new(Region::new(code, name), region_points)?);
    }

    for region in expected {
        if !result.iter().any(|s| s.region.code == region.code) {
            result.push(RegionSeries::empty(region.clone()));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn test_year_month_parsing() {
        assert_eq!(ym("2024-03"), YearMonth::new(2024, 3).unwrap());
        assert_eq!(ym("2024-03-01"), YearMonth::new(2024, 3).unwrap());
        assert_eq!(ym("2024M03"), YearMonth::new(2024, 3).unwrap());
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("March".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_arithmetic() {
        assert_eq!(ym("2024-12").succ(), ym("2025-01"));
        assert_eq!(ym("2024-05").succ(), ym("2024-06"));
        assert_eq!(ym("2025-02").months_since(ym("2023-11")), 15);
        assert_eq!(ym("2023-11").months_since(ym("2025-02")), -15);
        assert_eq!(ym("2024-02").to_string(), "2024-02");
        assert_eq!(
            ym("2024-02").first_day(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_region_series_sorts_and_validates() {
        let region = Region::new("AT", "Österreich");
        let points = vec![
            TimeSeriesPoint::new(ym("2024-02"), "AT", "Österreich", 2.0),
            TimeSeriesPoint::new(ym("2024-01"), "AT", "Österreich", 1.0),
        ];
        let series = RegionSeries::new(region.clone(), points).unwrap();
        assert_eq!(series.values(), vec![1.0, 2.0]);
        assert_eq!(series.last_date(), Some(ym("2024-02")));

        let dupes = vec![
            TimeSeriesPoint::new(ym("2024-01"), "AT", "Österreich", 1.0),
            TimeSeriesPoint::new(ym("2024-01"), "AT", "Österreich", 1.5),
        ];
        assert!(matches!(
            RegionSeries::new(region.clone(), dupes),
            Err(ForecastError::MalformedInput(_))
        ));

        let nan = vec![TimeSeriesPoint::new(ym("2024-01"), "AT", "Österreich", f64::NAN)];
        assert!(RegionSeries::new(region, nan).is_err());
    }

    #[test]
    fn test_tail() {
        let region = Region::new("DE", "Deutschland");
        let points = (1..=5)
            .map(|m| TimeSeriesPoint::new(YearMonth::new(2024, m).unwrap(), "DE", "Deutschland", m as f64))
            .collect();
        let series = RegionSeries::new(region, points).unwrap();
        assert_eq!(series.tail(3).len(), 3);
        assert_eq!(series.tail(3)[0].value, 3.0);
        assert_eq!(series.tail(10).len(), 5);
    }

    #[test]
    fn test_partition_keeps_order_and_expected_regions() {
        let points = vec![
            TimeSeriesPoint::new(ym("2024-01"), "DE", "Deutschland", 2.0),
            TimeSeriesPoint::new(ym("2024-01"), "AT", "Österreich", 3.0),
            TimeSeriesPoint::new(ym("2024-02"), "DE", "Deutschland", 2.1),
        ];
        let expected = vec![Region::new("AT", "Österreich"), Region::new("EA20", "Eurozone")];
        let parts = partition_by_region(&points, &expected).unwrap();

        let codes: Vec<&str> = parts.iter().map(|s| s.region().code.as_str()).collect();
        assert_eq!(codes, vec!["DE", "AT", "EA20"]);
        assert_eq!(parts[0].len(), 2);
        assert!(parts[2].is_empty());
    }
}
