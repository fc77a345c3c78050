//! Loading monthly HICP inflation rates
//!
//! Three sources produce the same tidy list of [`TimeSeriesPoint`]s:
//! a Eurostat export in wide layout (one column per month), a tidy CSV with
//! one observation per row, and seeded sample data for offline runs.

use crate::config::ReportSettings;
use crate::constants::{country_name, EURO_AREA, HEADLINE_COICOP, LEGACY_EURO_AREA};
use crate::{ReportError, Result};
use inflation_forecast::{TimeSeriesPoint, YearMonth};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Standard deviation of the noise added to sample data
const SAMPLE_NOISE_STD: f64 = 0.35;

/// Where inflation observations come from
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// Eurostat `prc_hicp_manr` export, one column per month
    EurostatCsv(PathBuf),
    /// `date,geo,value[,country]` rows
    TidyCsv(PathBuf),
    /// Deterministic sample data
    Sample { seed: u64 },
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::EurostatCsv(path) => write!(f, "Eurostat CSV {}", path.display()),
            DataSource::TidyCsv(path) => write!(f, "tidy CSV {}", path.display()),
            DataSource::Sample { seed } => write!(f, "sample data (seed {})", seed),
        }
    }
}

impl DataSource {
    /// Load observations for the configured countries from
    /// `historical_start` on, sorted by month
    pub fn load(&self, settings: &ReportSettings) -> Result<Vec<TimeSeriesPoint>> {
        let mut points = match self {
            DataSource::EurostatCsv(path) => read_eurostat_csv(File::open(path)?, settings)?,
            DataSource::TidyCsv(path) => read_tidy_csv(File::open(path)?)?,
            DataSource::Sample { seed } => sample_data(*seed)?,
        };

        points.retain(|p| {
            settings.countries.contains(&p.region_code) && p.date >= settings.historical_start
        });
        points.sort_by_key(|p| p.date);

        info!("Loaded {} observations from {}", points.len(), self);
        Ok(points)
    }
}

/// Read a Eurostat export in wide layout.
///
/// The region column may be called `geo` or `geo\TIME_PERIOD`. Only
/// headline (`CP00`) rows are kept. EA19 rows stand in for EA20 when the
/// export has no EA20 rows and are dropped otherwise. Cells that
/// are not numbers (`:` or flagged values) are skipped.
pub fn read_eurostat_csv<R: Read>(reader: R, settings: &ReportSettings) -> Result<Vec<TimeSeriesPoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let geo_idx = headers
        .iter()
        .position(|h| h == "geo" || h.starts_with("geo\\"))
        .ok_or_else(|| ReportError::MalformedInput("Missing 'geo' column".to_string()))?;
    let coicop_idx = headers.iter().position(|h| h == "coicop");

    let periods: Vec<(usize, YearMonth)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != geo_idx && Some(*idx) != coicop_idx)
        .filter_map(|(idx, header)| header.parse::<YearMonth>().ok().map(|date| (idx, date)))
        .collect();
    if periods.is_empty() {
        return Err(ReportError::MalformedInput(
            "No monthly period columns found".to_string(),
        ));
    }

    let mut wanted = settings.countries.clone();
    if wanted.iter().any(|c| c == EURO_AREA) {
        wanted.push(LEGACY_EURO_AREA.to_string());
    }

    let mut observations: Vec<(String, YearMonth, f64)> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let geo = record.get(geo_idx).unwrap_or_default();
        if !wanted.iter().any(|c| c == geo) {
            continue;
        }
        if let Some(idx) = coicop_idx {
            if record.get(idx) != Some(HEADLINE_COICOP) {
                continue;
            }
        }

        for &(idx, date) in &periods {
            if date < settings.historical_start {
                continue;
            }
            let value = record
                .get(idx)
                .and_then(|cell| cell.parse::<f64>().ok())
                .filter(|v| v.is_finite());
            if let Some(value) = value {
                observations.push((geo.to_string(), date, value));
            }
        }
    }

    if observations.iter().any(|(geo, _, _)| geo == EURO_AREA) {
        observations.retain(|(geo, _, _)| geo != LEGACY_EURO_AREA);
    } else {
        for (geo, _, _) in observations.iter_mut().filter(|(geo, _, _)| geo == LEGACY_EURO_AREA) {
            *geo = EURO_AREA.to_string();
        }
    }
    debug!("Eurostat export: {} numeric cells kept", observations.len());

    let mut points: Vec<TimeSeriesPoint> = observations
        .into_iter()
        .map(|(geo, date, value)| {
            let name = country_name(&geo).to_string();
            TimeSeriesPoint::new(date, geo, name, value)
        })
        .collect();
    points.sort_by_key(|p| p.date);
    Ok(points)
}

/// Read `date,geo,value` rows with an optional `country` column.
///
/// Every row must parse; the first bad row fails the whole read.
pub fn read_tidy_csv<R: Read>(reader: R) -> Result<Vec<TimeSeriesPoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReportError::MalformedInput(format!("Missing '{}' column", name)))
    };
    let date_idx = column("date")?;
    let geo_idx = column("geo")?;
    let value_idx = column("value")?;
    let country_idx = headers.iter().position(|h| h == "country");

    let mut points = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // Header is line 1
        let line = row + 2;

        let date: YearMonth = record
            .get(date_idx)
            .unwrap_or_default()
            .parse()
            .map_err(|e| ReportError::MalformedInput(format!("line {}: {}", line, e)))?;
        let geo = record.get(geo_idx).unwrap_or_default();
        if geo.is_empty() {
            return Err(ReportError::MalformedInput(format!(
                "line {}: empty region code",
                line
            )));
        }
        let raw_value = record.get(value_idx).unwrap_or_default();
        let value = raw_value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                ReportError::MalformedInput(format!("line {}: invalid value '{}'", line, raw_value))
            })?;
        let name = country_idx
            .and_then(|idx| record.get(idx))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| country_name(geo));

        points.push(TimeSeriesPoint::new(date, geo, name, value));
    }

    Ok(points)
}

/// Sample data for AT, DE and EA20 from 2023-01 to 2025-10.
///
/// Yearly base levels plus normal noise; the same seed always gives the
/// same series.
pub fn sample_data(seed: u64) -> Result<Vec<TimeSeriesPoint>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, SAMPLE_NOISE_STD)
        .map_err(|e| ReportError::Config(format!("Invalid sample noise: {}", e)))?;

    let regions = ["AT", "DE", EURO_AREA];
    let end = YearMonth::new(2025, 10)?;
    let mut date = YearMonth::january(2023);
    let mut points = Vec::new();

    while date <= end {
        let base = match date.year() {
            2023 => [6.8, 6.1, 6.1],
            2024 => [4.2, 3.8, 3.8],
            _ => [2.8, 2.3, 2.5],
        };
        for (code, level) in regions.iter().zip(base) {
            let value = level + noise.sample(&mut rng);
            points.push(TimeSeriesPoint::new(date, *code, country_name(code), value));
        }
        date = date.succ();
    }

    Ok(points)
}
