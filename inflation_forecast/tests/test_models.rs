use approx::assert_abs_diff_eq;
use inflation_forecast::models::{
    DampedTrend, FitFailure, FittedTrend, ForecastMethod, LinearTrend, TrendModel,
};
use inflation_forecast::{TimeSeriesPoint, YearMonth};
use inflation_math::SmoothingGrid;

fn create_test_data(values: &[f64]) -> Vec<TimeSeriesPoint> {
    let mut date = YearMonth::new(2023, 1).unwrap();
    values
        .iter()
        .map(|&v| {
            let point = TimeSeriesPoint::new(date, "AT", "Österreich", v);
            date = date.succ();
            point
        })
        .collect()
}

#[test]
fn test_damped_trend() {
    let values: Vec<f64> = (0..18).map(|i| 7.0 - 0.25 * i as f64).collect();
    let model = DampedTrend::new(12);
    assert_eq!(model.method(), ForecastMethod::DampedTrend);

    let trained = model.fit(&create_test_data(&values)).unwrap();
    assert_eq!(trained.method(), ForecastMethod::DampedTrend);
    assert_eq!(trained.window_size(), 18);
    assert!(trained.phi() >= 0.8 && trained.phi() <= 0.98);

    // Falling series, damped: forecasts keep falling but flatten out
    let forecast = trained.forecast(24);
    let first_step = forecast[0] - forecast[1];
    let last_step = forecast[22] - forecast[23];
    assert!(first_step > 0.0);
    assert!(last_step < first_step);
}

#[test]
fn test_damped_trend_custom_grid() {
    let grid = SmoothingGrid {
        alphas: vec![0.5],
        betas: vec![0.2],
        phis: vec![0.9],
    };
    let model = DampedTrend::with_grid(4, grid);
    let trained = model
        .fit(&create_test_data(&[2.0, 2.5, 2.2, 2.8, 3.0]))
        .unwrap();

    assert_abs_diff_eq!(trained.alpha(), 0.5);
    assert_abs_diff_eq!(trained.beta(), 0.2);
    assert_abs_diff_eq!(trained.phi(), 0.9);
}

#[test]
fn test_damped_trend_numerical_failure() {
    let values = vec![1e308, -1e308, 1e308, -1e308, 1e308, -1e308];
    let result = DampedTrend::new(4).fit(&create_test_data(&values));
    assert!(matches!(result, Err(FitFailure::Numerical(_))));
}

#[test]
fn test_linear_trend() {
    let values = vec![2.0, 2.2, 2.4, 2.6, 2.8, 3.0, 3.2, 3.4];
    let trained = LinearTrend::new().fit(&create_test_data(&values)).unwrap();

    assert_eq!(trained.method(), ForecastMethod::LinearTrend);
    assert_abs_diff_eq!(trained.slope(), 0.2, epsilon = 1e-9);
    assert_abs_diff_eq!(trained.intercept(), 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(trained.std_error(), 0.0, epsilon = 1e-9);

    let forecast = trained.forecast(3);
    assert_abs_diff_eq!(forecast[0], 3.6, epsilon = 1e-9);
    assert_abs_diff_eq!(forecast[2], 4.0, epsilon = 1e-9);
}

#[test]
fn test_residual_std_error() {
    // Residuals alternate +0.1 / -0.1 around a flat line
    let values = vec![3.1, 2.9, 3.1, 2.9];
    let trained = LinearTrend::new().fit(&create_test_data(&values)).unwrap();

    let fitted = trained.fitted_values();
    assert_eq!(fitted.len(), 4);
    assert!(trained.std_error() > 0.0);
    assert!(trained.std_error() < 0.11);
}
