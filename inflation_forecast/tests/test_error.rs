use inflation_forecast::models::FitFailure;
use inflation_forecast::ForecastError;
use inflation_math::MathError;
use std::io;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    let math_error = MathError::CalculationError("Smoothing state diverged".to_string());
    let forecast_error = ForecastError::from(math_error);
    assert!(matches!(forecast_error, ForecastError::Math(_)));

    let json_error = serde_json::from_str::<f64>("not json").unwrap_err();
    let forecast_error = ForecastError::from(json_error);
    assert!(matches!(forecast_error, ForecastError::Serialization(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("Horizon must be at least 1 month".to_string());
    let error_string = format!("{}", error);
    assert!(error_string.contains("Invalid parameter"));
    assert!(error_string.contains("Horizon must be at least 1 month"));

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}

#[test]
fn test_fit_failure_is_an_error() {
    let failure: Box<dyn std::error::Error> = Box::new(FitFailure::Numerical(
        "No smoothing parameters converged".to_string(),
    ));
    assert_eq!(
        failure.to_string(),
        "numerical failure: No smoothing parameters converged"
    );
}
