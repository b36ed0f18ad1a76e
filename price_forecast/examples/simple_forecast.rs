use price_forecast::data::HistoryLoader;
use price_forecast::random::seeded;
use price_forecast::Forecaster;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load a price history from CSV
    let csv_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("examples")
        .join("csv")
        .join("headphones.csv");

    println!("Loading price history from: {}", csv_path.display());
    let history = HistoryLoader::from_csv(&csv_path)?;
    println!("Loaded {} observations", history.len());

    let current_price = history.latest().map(|o| o.price).unwrap_or_default();

    // Forecast with a fixed seed so the output is reproducible
    let forecaster = Forecaster::new();
    let result = forecaster.forecast(&history, &mut seeded(42))?;

    let basis = result.basis();
    println!("Level:     {:>8.2}", basis.level);
    println!("Trend:     {:>8.2}", basis.trend);
    println!("Seasonal:  {:>8.2}", basis.seasonal);
    println!(
        "Predicted: {:>8.2}  (band {:.2} - {:.2})",
        result.predicted_price(),
        result.band().low,
        result.band().high
    );
    println!(
        "Direction vs {:.2}: {:?}",
        current_price,
        result.direction(current_price)
    );

    Ok(())
}
