//! Forecast the next price of an item from a price history file.

use clap::Parser;
use price_forecast::config::{ForecastConfig, SeedPolicy};
use price_forecast::data::HistoryLoader;
use price_forecast::error::{ForecastError, Result};
use price_forecast::logging::init_tracing;
use price_forecast::Forecaster;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "forecast_price")]
#[command(about = "Forecast the next price of an item from its price history", long_about = None)]
struct Cli {
    /// Price history file (CSV with date,price columns, or JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Forecaster configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fixed random seed, overrides the configured seed policy
    #[arg(short, long)]
    seed: Option<u64>,

    /// Current price, to report the expected direction of movement
    #[arg(long)]
    current_price: Option<f64>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn run(cli: &Cli) -> Result<()> {
    init_tracing(&cli.log_level)?;

    let mut config = match &cli.config {
        Some(path) => ForecastConfig::from_json_file(path)?,
        None => {
            let mut config = ForecastConfig::default();
            config.apply_env_overrides()?;
            config
        }
    };
    if let Some(seed) = cli.seed {
        config.seed_policy = SeedPolicy::Fixed { seed };
    }

    let forecaster = Forecaster::from_config(&config)?;
    let history = HistoryLoader::from_path(&cli.input)?;
    let result = forecaster.forecast_with_policy(&history)?;

    let mut output = serde_json::to_value(&result)?;
    if let Some(current) = cli.current_price {
        output["currentPrice"] = serde_json::json!(current);
        output["direction"] = serde_json::to_value(result.direction(current))?;
        output["percentChange"] = serde_json::json!(result.percent_change_from(current));
    }
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ForecastError::InsufficientHistory(err)) => {
            eprintln!(
                "Not enough price history yet: {} observations, need {}. Try again once more prices are recorded.",
                err.observed, err.required
            );
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
