//! Command-line entry point for the inflation report

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use inflation_report::{print_summary, run_report, DataSource, ReportConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "inflation-report")]
#[command(version, about = "Inflation report for Austria, Germany and the euro area", long_about = None)]
struct Cli {
    /// Configuration file (default: ./inflation_report.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input CSV; sample data is used when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Layout of the input CSV
    #[arg(short, long, value_enum, default_value_t = InputFormat::Eurostat)]
    format: InputFormat,

    /// Seed for sample data
    #[arg(long, default_value_t = 42)]
    sample_seed: u64,

    /// Months to forecast, overrides the configuration
    #[arg(long)]
    horizon: Option<usize>,

    /// Output directory, overrides the configuration
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// Eurostat export with one column per month
    Eurostat,
    /// `date,geo,value` rows
    Tidy,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inflation_report=info,inflation_forecast=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ReportConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ReportConfig::from_default_location()?,
    };
    if let Some(horizon) = cli.horizon {
        config.forecast.horizon = horizon;
    }
    if let Some(dir) = cli.output_dir {
        config.report.output_dir = dir;
    }
    config.validate()?;

    let source = match cli.input {
        Some(path) => match cli.format {
            InputFormat::Eurostat => DataSource::EurostatCsv(path),
            InputFormat::Tidy => DataSource::TidyCsv(path),
        },
        None => DataSource::Sample {
            seed: cli.sample_seed,
        },
    };

    let artifacts = run_report(&config, &source).context("report generation failed")?;

    print_summary(&artifacts.statistics, &artifacts.trends);
    println!("Textbericht gespeichert unter: {}", artifacts.report_path.display());
    println!("HTML-Bericht gespeichert unter: {}", artifacts.html_path.display());
    println!("Prognosetabelle: {}", artifacts.forecast_csv.display());
    println!("Prognose (JSON): {}", artifacts.forecast_json.display());

    Ok(())
}
