//! Report configuration file support.
//!
//! Settings are read from TOML with a `[report]` table and an optional
//! `[forecast]` table. Every field has a default, so an empty file is a
//! valid configuration.

use crate::constants::{DEFAULT_COUNTRIES, EURO_AREA};
use crate::{ReportError, Result};
use inflation_forecast::{ForecastConfig, Region, YearMonth};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up by [`ReportConfig::from_default_location`]
pub const DEFAULT_CONFIG_FILE: &str = "inflation_report.toml";

/// Complete report configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub forecast: ForecastConfig,
}

/// Region selection, time ranges and output location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Region codes to load and report on, in display order
    pub countries: Vec<String>,
    /// Observations before this month are discarded on load
    pub historical_start: YearMonth,
    /// First month included in the summary statistics
    pub statistics_start: YearMonth,
    /// Region compared against the benchmark
    pub primary_region: String,
    pub benchmark_region: String,
    /// Directory receiving the report files
    pub output_dir: PathBuf,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            countries: DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            historical_start: YearMonth::january(2015),
            statistics_start: YearMonth::january(2020),
            primary_region: "AT".to_string(),
            benchmark_region: EURO_AREA.to_string(),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl ReportSettings {
    /// Configured countries as regions with their display names
    pub fn regions(&self) -> Vec<Region> {
        self.countries
            .iter()
            .map(|code| Region::new(code.clone(), crate::constants::country_name(code)))
            .collect()
    }
}

impl ReportConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ReportConfig)` if the file was read, parsed and validated
    /// * `Err(ReportError::Config)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ReportConfig = toml::from_str(content)
            .map_err(|e| ReportError::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `inflation_report.toml` from the current directory, or the
    /// defaults if there is no such file.
    pub fn from_default_location() -> Result<Self> {
        let path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if path.exists() {
            log::info!("Loading configuration from {}", path.display());
            Self::from_file(&path)
        } else {
            log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    /// Check region selection and forecast settings
    pub fn validate(&self) -> Result<()> {
        let report = &self.report;

        if report.countries.is_empty() {
            return Err(ReportError::Config(
                "At least one country must be configured".to_string(),
            ));
        }

        for region in [&report.primary_region, &report.benchmark_region] {
            if !report.countries.contains(region) {
                return Err(ReportError::Config(format!(
                    "Region '{}' is not among the configured countries",
                    region
                )));
            }
        }

        if report.primary_region == report.benchmark_region {
            return Err(ReportError::Config(
                "Primary and benchmark region must differ".to_string(),
            ));
        }

        if report.output_dir.as_os_str().is_empty() {
            return Err(ReportError::Config("Output directory is empty".to_string()));
        }

        self.forecast
            .validate()
            .map_err(|e| ReportError::Config(e.to_string()))
    }
}
