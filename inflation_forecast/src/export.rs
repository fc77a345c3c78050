//! Combined history + forecast table for downstream renderers

use crate::data::TimeSeriesPoint;
use crate::engine::{ForecastPoint, ForecastRun};
use crate::error::Result;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Column names of the exported table, in order
pub const TABLE_COLUMNS: [&str; 10] = [
    "date",
    "region_code",
    "region_name",
    "point_estimate",
    "lower_bound",
    "upper_bound",
    "is_forecast",
    "method",
    "std_error",
    "training_window_size",
];

/// One row of the exported table
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub date: String,
    pub region_code: String,
    pub region_name: String,
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub is_forecast: bool,
    pub method: Option<&'static str>,
    pub std_error: Option<f64>,
    pub training_window_size: Option<i64>,
}

impl From<&TimeSeriesPoint> for TableRow {
    fn from(point: &TimeSeriesPoint) -> Self {
        Self {
            date: point.date.first_day().to_string(),
            region_code: point.region_code.clone(),
            region_name: point.region_name.clone(),
            point_estimate: point.value,
            lower_bound: point.value,
            upper_bound: point.value,
            is_forecast: false,
            method: None,
            std_error: None,
            training_window_size: None,
        }
    }
}

impl From<&ForecastPoint> for TableRow {
    fn from(point: &ForecastPoint) -> Self {
        Self {
            date: point.date.first_day().to_string(),
            region_code: point.region_code.clone(),
            region_name: point.region_name.clone(),
            point_estimate: point.point_estimate,
            lower_bound: point.lower_bound,
            upper_bound: point.upper_bound,
            is_forecast: true,
            method: Some(point.method.label()),
            std_error: Some(point.std_error),
            training_window_size: Some(point.training_window_size as i64),
        }
    }
}

/// History and forecast rows, history first
#[derive(Debug, Clone, Default)]
pub struct ForecastTable {
    rows: Vec<TableRow>,
}

impl ForecastTable {
    /// Forecast rows only
    pub fn from_run(run: &ForecastRun) -> Self {
        Self {
            rows: run.points().map(TableRow::from).collect(),
        }
    }

    /// Historical observations followed by forecast rows
    pub fn with_history(history: &[TimeSeriesPoint], run: &ForecastRun) -> Self {
        let mut rows: Vec<TableRow> = history.iter().map(TableRow::from).collect();
        rows.extend(run.points().map(TableRow::from));
        Self { rows }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build a polars DataFrame with [`TABLE_COLUMNS`]
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let rows = &self.rows;
        let columns = vec![
            Series::new(
                TABLE_COLUMNS[0],
                rows.iter().map(|r| r.date.as_str()).collect::<Vec<&str>>(),
            ),
            Series::new(
                TABLE_COLUMNS[1],
                rows.iter().map(|r| r.region_code.as_str()).collect::<Vec<&str>>(),
            ),
            Series::new(
                TABLE_COLUMNS[2],
                rows.iter().map(|r| r.region_name.as_str()).collect::<Vec<&str>>(),
            ),
            Series::new(
                TABLE_COLUMNS[3],
                rows.iter().map(|r| r.point_estimate).collect::<Vec<f64>>(),
            ),
            Series::new(
                TABLE_COLUMNS[4],
                rows.iter().map(|r| r.lower_bound).collect::<Vec<f64>>(),
            ),
            Series::new(
                TABLE_COLUMNS[5],
                rows.iter().map(|r| r.upper_bound).collect::<Vec<f64>>(),
            ),
            Series::new(
                TABLE_COLUMNS[6],
                rows.iter().map(|r| r.is_forecast).collect::<Vec<bool>>(),
            ),
            Series::new(
                TABLE_COLUMNS[7],
                rows.iter().map(|r| r.method).collect::<Vec<Option<&str>>>(),
            ),
            Series::new(
                TABLE_COLUMNS[8],
                rows.iter().map(|r| r.std_error).collect::<Vec<Option<f64>>>(),
            ),
            Series::new(
                TABLE_COLUMNS[9],
                rows.iter()
                    .map(|r| r.training_window_size)
                    .collect::<Vec<Option<i64>>>(),
            ),
        ];

        Ok(DataFrame::new(columns)?)
    }

    /// Write the table as CSV with a header row
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut df = self.to_dataframe()?;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).has_header(true).finish(&mut df)?;
        Ok(())
    }
}

/// Serialize forecast points as pretty JSON
pub fn forecast_points_json(run: &ForecastRun) -> Result<String> {
    let points: Vec<&ForecastPoint> = run.points().collect();
    Ok(serde_json::to_string_pretty(&points)?)
}
