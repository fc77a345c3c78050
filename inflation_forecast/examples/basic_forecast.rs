use inflation_forecast::models::{DampedTrend, FittedTrend, LinearTrend, TrendModel};
use inflation_forecast::{ForecastConfig, ForecastEngine, TimeSeriesPoint, YearMonth};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Inflation Forecast: Basic Forecasting Example");
    println!("=============================================\n");

    // Create sample data
    println!("Creating sample data...");
    let austria = create_sample_data("AT", "Österreich", 24, 7.5, -0.2)?;
    let germany = create_sample_data("DE", "Deutschland", 8, 3.0, -0.05)?;
    println!(
        "Sample data created: {} months for AT, {} months for DE\n",
        austria.len(),
        germany.len()
    );

    // Fit both models directly
    println!("Fitting models on AT...");
    let damped = DampedTrend::default().fit(&austria)?;
    println!(
        "Damped trend: alpha={:.2} beta={:.2} phi={:.2} std_error={:.3}",
        damped.alpha(),
        damped.beta(),
        damped.phi(),
        damped.std_error()
    );
    let linear = LinearTrend::new().fit(&austria[12..])?;
    println!(
        "Linear trend: slope={:.3} per month, std_error={:.3}\n",
        linear.slope(),
        linear.std_error()
    );

    // Let the engine choose per region
    println!("Running the forecast engine...");
    let mut points = austria;
    points.extend(germany);
    let engine = ForecastEngine::new(ForecastConfig::with_horizon(6))?;
    let run = engine.forecast(&points)?;

    for region in run.regions() {
        println!(
            "\n{} ({}), window {} months:",
            region.region_name, region.method, region.training_window_size
        );
        for point in &region.points {
            println!(
                "  {}: {:.2}% ({:.2} - {:.2})",
                point.date, point.point_estimate, point.lower_bound, point.upper_bound
            );
        }
    }

    println!("\nForecasting complete!");
    Ok(())
}

fn create_sample_data(
    code: &str,
    name: &str,
    months: usize,
    start: f64,
    step: f64,
) -> Result<Vec<TimeSeriesPoint>, Box<dyn std::error::Error>> {
    let mut date = YearMonth::new(2023, 1)?;
    let mut points = Vec::with_capacity(months);

    for i in 0..months {
        // Trend plus a small seasonal wobble
        let value = start + step * i as f64 + 0.15 * (i as f64 * 0.5).sin();
        points.push(TimeSeriesPoint::new(date, code, name, value));
        date = date.succ();
    }

    Ok(points)
}
