//! # Inflation Math
//!
//! Numeric building blocks for the inflation forecast.
//! This crate knows nothing about regions or calendars; it works on plain
//! `f64` slices.

use thiserror::Error;

pub mod dispersion;
pub mod forecasting;
pub mod optimize;

pub use dispersion::population_std_dev;
pub use forecasting::{DampedState, DampedTrendSmoothing, LinearRegression, SmoothingFit};
pub use optimize::{optimize_damped, OptimizedSmoothing, SmoothingGrid};

/// Errors that can occur in numeric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;
