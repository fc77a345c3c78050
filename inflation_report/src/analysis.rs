//! Descriptive statistics and cross-region comparison

use crate::Result;
use inflation_forecast::{partition_by_region, TimeSeriesPoint, YearMonth};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};
use std::collections::BTreeMap;

/// Summary statistics of one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStatistics {
    pub region_code: String,
    pub region_name: String,
    /// Number of months covered
    pub observations: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation; `0.0` for a single observation
    pub std_dev: f64,
    /// Most recent value and its month
    pub latest: f64,
    pub latest_date: YearMonth,
}

/// Highest and lowest rate of one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTrend {
    pub region_code: String,
    pub region_name: String,
    pub highest: f64,
    pub highest_date: YearMonth,
    pub lowest: f64,
    pub lowest_date: YearMonth,
}

/// Rates of all regions for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub date: YearMonth,
    /// Rate by region code
    pub values: BTreeMap<String, f64>,
    /// Primary minus benchmark, when both are present
    pub difference: Option<f64>,
}

impl ComparisonRow {
    pub fn value(&self, region_code: &str) -> Option<f64> {
        self.values.get(region_code).copied()
    }

    /// Whether the primary region had the higher rate this month
    pub fn primary_higher(&self) -> Option<bool> {
        self.difference.map(|d| d > 0.0)
    }
}

/// Month-by-month comparison of a primary region against a benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionComparison {
    pub primary: String,
    pub benchmark: String,
    /// One row per month, oldest first
    pub rows: Vec<ComparisonRow>,
}

impl RegionComparison {
    /// Mean of the monthly differences, if any month has both regions
    pub fn average_difference(&self) -> Option<f64> {
        let diffs: Vec<f64> = self.rows.iter().filter_map(|r| r.difference).collect();
        if diffs.is_empty() {
            None
        } else {
            Some(diffs.iter().mean())
        }
    }

    /// Months in which both regions have a rate
    pub fn months_compared(&self) -> usize {
        self.rows.iter().filter(|r| r.difference.is_some()).count()
    }

    /// Months in which the primary region was strictly higher
    pub fn months_higher(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.primary_higher() == Some(true))
            .count()
    }

    /// The most recent `n` rows
    pub fn last(&self, n: usize) -> &[ComparisonRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }
}

/// Per-region statistics over the months from `since` on.
///
/// Regions appear in the order of the input; a region without
/// observations in the period is left out.
pub fn calculate_statistics(
    points: &[TimeSeriesPoint],
    since: YearMonth,
) -> Result<Vec<RegionStatistics>> {
    let recent: Vec<TimeSeriesPoint> = points.iter().filter(|p| p.date >= since).cloned().collect();
    let mut stats = Vec::new();

    for series in partition_by_region(&recent, &[])? {
        let (latest, latest_date) = match series.points().last() {
            Some(point) => (point.value, point.date),
            None => continue,
        };
        let values = series.values();
        let std_dev = if values.len() > 1 {
            Statistics::std_dev(values.iter())
        } else {
            0.0
        };

        stats.push(RegionStatistics {
            region_code: series.region().code.clone(),
            region_name: series.region().name.clone(),
            observations: values.len(),
            mean: Statistics::mean(values.iter()),
            median: Data::new(values.clone()).median(),
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
            std_dev,
            latest,
            latest_date,
        });
    }

    Ok(stats)
}

/// Compare `primary` against `benchmark` for every month in the data
pub fn compare_regions(
    points: &[TimeSeriesPoint],
    primary: &str,
    benchmark: &str,
) -> RegionComparison {
    let mut by_month: BTreeMap<YearMonth, BTreeMap<String, f64>> = BTreeMap::new();
    for point in points {
        by_month
            .entry(point.date)
            .or_default()
            .insert(point.region_code.clone(), point.value);
    }

    let rows = by_month
        .into_iter()
        .map(|(date, values)| {
            let difference = match (values.get(primary), values.get(benchmark)) {
                (Some(p), Some(b)) => Some(p - b),
                _ => None,
            };
            ComparisonRow {
                date,
                values,
                difference,
            }
        })
        .collect();

    RegionComparison {
        primary: primary.to_string(),
        benchmark: benchmark.to_string(),
        rows,
    }
}

/// Highest and lowest rate per region; ties go to the earlier month
pub fn identify_trends(points: &[TimeSeriesPoint]) -> Result<Vec<RegionTrend>> {
    let mut trends = Vec::new();

    for series in partition_by_region(points, &[])? {
        let mut iter = series.points().iter();
        let first = match iter.next() {
            Some(point) => point,
            None => continue,
        };

        let (mut highest, mut lowest) = (first, first);
        for point in iter {
            if point.value > highest.value {
                highest = point;
            }
            if point.value < lowest.value {
                lowest = point;
            }
        }

        trends.push(RegionTrend {
            region_code: series.region().code.clone(),
            region_name: series.region().name.clone(),
            highest: highest.value,
            highest_date: highest.date,
            lowest: lowest.value,
            lowest_date: lowest.date,
        });
    }

    Ok(trends)
}
