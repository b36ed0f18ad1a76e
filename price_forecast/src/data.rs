//! Loading price histories from files
//!
//! CSV files need a header with `date` and `price` columns. JSON documents
//! are arrays of `{ "price": .., "date": .. }` objects, the shape a catalog
//! document stores its history in.

use crate::error::{ForecastError, Result};
use crate::history::{PriceHistory, PriceObservation};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// One CSV row before its date is parsed
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    price: f64,
}

/// Loader for price histories
#[derive(Debug)]
pub struct HistoryLoader;

impl HistoryLoader {
    /// Load a price history from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<PriceHistory> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Load a price history from any CSV source
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<PriceHistory> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut history = PriceHistory::new();
        for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row?;
            let observed_at = parse_timestamp(&row.date).ok_or_else(|| {
                ForecastError::DataError(format!(
                    "Row {}: unrecognised date '{}'",
                    index + 1,
                    row.date
                ))
            })?;
            history.push(PriceObservation::new(row.price, observed_at));
        }

        debug!(observations = history.len(), "loaded price history from CSV");
        Ok(history)
    }

    /// Load a price history from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<PriceHistory> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse a price history from a JSON array
    pub fn from_json_str(json: &str) -> Result<PriceHistory> {
        let history: PriceHistory = serde_json::from_str(json)?;
        debug!(observations = history.len(), "loaded price history from JSON");
        Ok(history)
    }

    /// Load by file extension: `.json` is JSON, anything else CSV
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<PriceHistory> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path),
            _ => Self::from_csv(path),
        }
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
