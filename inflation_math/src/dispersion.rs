//! Dispersion measures used for forecast error estimates

use statrs::statistics::Statistics;

/// Population standard deviation (divides by `n`).
///
/// Returns `0.0` for an empty slice so that a model with no residuals
/// produces a zero-width band instead of NaN.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().population_std_dev()
}

/// Differences `observed - fitted`, element by element
pub fn residuals(observed: &[f64], fitted: &[f64]) -> Vec<f64> {
    observed
        .iter()
        .zip(fitted.iter())
        .map(|(o, f)| o - f)
        .collect()
}
