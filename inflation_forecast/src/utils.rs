//! Utility functions for the inflation_forecast crate

use crate::data::YearMonth;

/// The `horizon` calendar months following `last_observed`
pub fn future_months(last_observed: YearMonth, horizon: usize) -> Vec<YearMonth> {
    let mut months = Vec::with_capacity(horizon);
    let mut current = last_observed;

    for _ in 0..horizon {
        current = current.succ();
        months.push(current);
    }

    months
}

/// Half-width of the confidence band at 0-based forecast `step`.
///
/// `std_error * z * sqrt(1 + step / widening_steps)`
pub fn band_half_width(std_error: f64, z_score: f64, step: usize, widening_steps: f64) -> f64 {
    std_error * z_score * (1.0 + step as f64 / widening_steps).sqrt()
}

/// Band around `point` with an optional floor.
///
/// Returns `(point, lower, upper)`. With a floor, the point estimate and
/// the lower bound are both kept at or above it, so
/// `floor <= lower <= point <= upper` always holds.
pub fn bounded_interval(point: f64, half_width: f64, floor: Option<f64>) -> (f64, f64, f64) {
    let half_width = half_width.abs();
    match floor {
        Some(floor) => {
            let point = point.max(floor);
            let lower = (point - half_width).max(floor);
            let upper = point + half_width;
            (point, lower, upper)
        }
        None => (point, point - half_width, point + half_width),
    }
}
