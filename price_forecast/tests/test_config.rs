use pretty_assertions::assert_eq;
use price_forecast::config::{ForecastConfig, SeedPolicy, PRICE_DECIMALS_ENV, SEED_ENV};
use price_forecast::error::ForecastError;
use price_forecast::Forecaster;
use rstest::rstest;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = ForecastConfig::default();

    assert_eq!(config.min_history, 5);
    assert_eq!(config.level_window, 5);
    assert_eq!(config.trend_window, 10);
    assert_eq!(config.seasonal_amplitude, 0.02);
    assert_eq!(config.perturbation_amplitude, 0.03);
    assert_eq!(config.price_decimals, 2);
    assert_eq!(config.seed_policy, SeedPolicy::Entropy);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(ForecastConfig::from_json_str("{}").unwrap(), ForecastConfig::default());
}

#[test]
fn test_partial_json() {
    let config = ForecastConfig::from_json_str(
        r#"{"trend_window": 20, "price_decimals": 0, "seed_policy": {"kind": "fixed", "seed": 42}}"#,
    )
    .unwrap();

    assert_eq!(config.trend_window, 20);
    assert_eq!(config.price_decimals, 0);
    assert_eq!(config.seed_policy, SeedPolicy::Fixed { seed: 42 });
    assert_eq!(config.level_window, 5);
}

#[test]
fn test_history_digest_policy_json() {
    let config =
        ForecastConfig::from_json_str(r#"{"seed_policy": {"kind": "history_digest"}}"#).unwrap();

    assert_eq!(config.seed_policy, SeedPolicy::HistoryDigest);
}

#[rstest]
#[case(r#"{"min_history": 4}"#)]
#[case(r#"{"level_window": 0}"#)]
#[case(r#"{"trend_window": 1}"#)]
#[case(r#"{"seasonal_amplitude": -0.1}"#)]
#[case(r#"{"perturbation_amplitude": 1.0}"#)]
#[case(r#"{"price_decimals": 9}"#)]
fn test_invalid_values_rejected(#[case] json: &str) {
    let err = ForecastConfig::from_json_str(json).unwrap_err();

    assert!(matches!(err, ForecastError::InvalidParameter(_)));
}

#[test]
fn test_malformed_json() {
    let err = ForecastConfig::from_json_str("{not json").unwrap_err();

    assert!(matches!(err, ForecastError::JsonError(_)));
}

#[test]
fn test_raising_min_history_is_allowed() {
    let config = ForecastConfig::from_json_str(r#"{"min_history": 8}"#).unwrap();
    let forecaster = Forecaster::from_config(&config).unwrap();

    assert_eq!(forecaster.min_history(), 8);
}

#[test]
fn test_overrides() {
    let vars: HashMap<&str, &str> = [(SEED_ENV, "7"), (PRICE_DECIMALS_ENV, " 0 ")].into();
    let mut config = ForecastConfig::default();

    config
        .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
        .unwrap();

    assert_eq!(config.seed_policy, SeedPolicy::Fixed { seed: 7 });
    assert_eq!(config.price_decimals, 0);
}

#[test]
fn test_bad_override() {
    let mut config = ForecastConfig::default();

    let err = config
        .apply_overrides(|key| (key == SEED_ENV).then(|| "seven".to_string()))
        .unwrap_err();

    assert!(matches!(err, ForecastError::InvalidParameter(msg) if msg.contains(SEED_ENV)));
}

#[test]
fn test_no_overrides_leaves_config_untouched() {
    let mut config = ForecastConfig::default();
    config.apply_overrides(|_| None).unwrap();

    assert_eq!(config, ForecastConfig::default());
}

#[test]
fn test_from_json_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"level_window": 3, "seasonal_amplitude": 0.0}}"#).unwrap();

    let config = ForecastConfig::from_json_file(file.path()).unwrap();

    assert_eq!(config.level_window, 3);
    assert_eq!(config.seasonal_amplitude, 0.0);
}

#[test]
fn test_from_missing_file() {
    let err = ForecastConfig::from_json_file("/nonexistent/pricecast.json").unwrap_err();

    assert!(matches!(err, ForecastError::IoError(_)));
}

#[test]
fn test_config_round_trips_through_serde() {
    let config = ForecastConfig {
        seed_policy: SeedPolicy::HistoryDigest,
        ..ForecastConfig::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""kind":"history_digest""#));
    assert_eq!(ForecastConfig::from_json_str(&json).unwrap(), config);
}
