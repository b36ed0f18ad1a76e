use chrono::{Duration, Utc};
use price_forecast::catalog::{CatalogEntry, CatalogStore, InMemoryCatalog, PricePredictionService};
use price_forecast::error::ForecastError;
use price_forecast::{Forecaster, SeedPolicy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listed = Utc::now() - Duration::days(60);

    let mut catalog = InMemoryCatalog::new();
    catalog.save(CatalogEntry::new("kb-01", "Mechanical Keyboard", "peripherals", 89.5, listed))?;

    // Stable forecasts: only a price change produces a new draw
    let forecaster = Forecaster::new().with_seed_policy(SeedPolicy::HistoryDigest);
    let mut service = PricePredictionService::new(catalog, forecaster);

    // Too early: one observation only
    match service.predict("kb-01") {
        Err(ForecastError::InsufficientHistory(e)) => {
            println!("Not enough data yet ({} of {} observations)", e.observed, e.required)
        }
        other => println!("Unexpected: {other:?}"),
    }

    for (week, price) in [92.0, 87.0, 85.5, 88.0, 84.0].into_iter().enumerate() {
        service.update_price("kb-01", price, listed + Duration::weeks(week as i64 + 1))?;
    }

    let report = service.predict("kb-01")?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
