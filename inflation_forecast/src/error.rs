//! Error types for the inflation_forecast crate

use inflation_math::MathError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the inflation_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Input violates the cleaned-data precondition (missing or non-finite
    /// values, duplicate months)
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A model could not be fitted and no fallback was available
    #[error("Model fit error: {0}")]
    ModelFit(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON or TOML (de)serialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ForecastError {
    fn from(err: toml::de::Error) -> Self {
        ForecastError::Serialization(err.to_string())
    }
}
