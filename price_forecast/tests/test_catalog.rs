use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use price_forecast::catalog::{
    CatalogEntry, CatalogFilter, CatalogStore, InMemoryCatalog, PricePredictionService,
};
use price_forecast::config::SeedPolicy;
use price_forecast::error::ForecastError;
use price_forecast::models::PriceDirection;
use price_forecast::Forecaster;

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap() + Duration::days(n)
}

fn catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    catalog
        .save(CatalogEntry::new("p1", "Wireless Headphones", "audio", 199.99, day(0)))
        .unwrap();
    catalog
        .save(CatalogEntry::new("p2", "Studio Monitor Headphones", "audio", 149.0, day(0)))
        .unwrap();
    catalog
        .save(CatalogEntry::new("p3", "Mechanical Keyboard", "peripherals", 89.5, day(0)))
        .unwrap();
    catalog
}

fn service(seed_policy: SeedPolicy) -> PricePredictionService<InMemoryCatalog> {
    PricePredictionService::new(catalog(), Forecaster::new().with_seed_policy(seed_policy))
}

#[test]
fn test_new_entry_starts_history_with_listing_price() {
    let entry = CatalogEntry::new("p9", "Desk Lamp", "home", 35.0, day(0));

    assert_eq!(entry.price_history().len(), 1);
    assert_eq!(entry.price_history().observations()[0].price, 35.0);
    assert_eq!(entry.predicted_price(), None);
}

#[test]
fn test_update_price_only_records_changes() {
    let mut entry = CatalogEntry::new("p9", "Desk Lamp", "home", 35.0, day(0));

    assert!(!entry.update_price(35.0, day(1)));
    assert_eq!(entry.price_history().len(), 1);

    assert!(entry.update_price(32.5, day(2)));
    assert_eq!(entry.price(), 32.5);
    assert_eq!(entry.price_history().len(), 2);
}

#[test]
fn test_list_with_filter() {
    let catalog = catalog();

    let all = catalog.list(&CatalogFilter::default()).unwrap();
    assert_eq!(all.len(), 3);

    let headphones = catalog
        .list(&CatalogFilter {
            keyword: Some("HEADPHONES".to_string()),
            category: None,
        })
        .unwrap();
    let ids: Vec<&str> = headphones.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);

    let peripherals = catalog
        .list(&CatalogFilter {
            keyword: None,
            category: Some("peripherals".to_string()),
        })
        .unwrap();
    assert_eq!(peripherals.len(), 1);
    assert_eq!(peripherals[0].name(), "Mechanical Keyboard");
}

#[test]
fn test_predict_unknown_item() {
    let mut service = service(SeedPolicy::Entropy);

    let err = service.predict("missing").unwrap_err();

    assert!(matches!(err, ForecastError::NotFound(_)));
}

#[test]
fn test_predict_without_enough_history() {
    let mut service = service(SeedPolicy::Entropy);

    let err = service.predict("p1").unwrap_err();

    match err {
        ForecastError::InsufficientHistory(e) => {
            assert_eq!(e.observed, 1);
            assert_eq!(e.required, 5);
        }
        other => panic!("Expected InsufficientHistory, got {other:?}"),
    }
    assert_eq!(service.store().fetch("p1").unwrap().unwrap().predicted_price(), None);
}

#[test]
fn test_predict_persists_forecast() {
    let mut service = service(SeedPolicy::Fixed { seed: 11 });
    for (i, price) in [189.99, 179.99, 184.5, 175.0, 169.99].into_iter().enumerate() {
        assert!(service.update_price("p1", price, day(i as i64 + 1)).unwrap());
    }

    let report = service.predict("p1").unwrap();

    assert_eq!(report.id, "p1");
    assert_eq!(report.current_price, 169.99);
    assert_eq!(report.price_history.len(), 6);
    assert!(report.band.contains(report.predicted_price));
    assert_eq!(
        report.direction,
        if report.predicted_price > 169.99 {
            PriceDirection::Rise
        } else if report.predicted_price < 169.99 {
            PriceDirection::Fall
        } else {
            PriceDirection::Flat
        }
    );

    let stored = service.store().fetch("p1").unwrap().unwrap();
    assert_eq!(stored.predicted_price(), Some(report.predicted_price));

    // A fixed seed gives the same forecast on every request
    let again = service.predict("p1").unwrap();
    assert_eq!(again, report);
}

#[test]
fn test_history_digest_policy_stabilizes_stored_forecast() {
    let mut service = service(SeedPolicy::HistoryDigest);
    for (i, price) in [88.0, 91.0, 87.5, 90.0, 92.5, 93.0].into_iter().enumerate() {
        service.update_price("p3", price, day(i as i64 + 1)).unwrap();
    }

    let first = service.predict("p3").unwrap().predicted_price;
    let second = service.predict("p3").unwrap().predicted_price;

    assert_eq!(first, second);
}

#[test]
fn test_update_price_rejects_invalid_price() {
    let mut service = service(SeedPolicy::Entropy);

    let err = service.update_price("p2", f64::NAN, day(1)).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidParameter(_)));

    let err = service.update_price("p2", -1.0, day(1)).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidParameter(_)));

    let err = service.update_price("p2", 1e307, day(1)).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidParameter(_)));
}

#[test]
fn test_unchanged_price_is_not_saved() {
    let mut service = service(SeedPolicy::Entropy);

    assert!(!service.update_price("p2", 149.0, day(1)).unwrap());

    let catalog = service.into_store();
    assert_eq!(catalog.fetch("p2").unwrap().unwrap().price_history().len(), 1);
}

#[test]
fn test_report_json_matches_storefront_shape() {
    let mut service = service(SeedPolicy::Fixed { seed: 3 });
    for (i, price) in [150.0, 145.0, 140.0, 147.0, 152.0].into_iter().enumerate() {
        service.update_price("p2", price, day(i as i64 + 1)).unwrap();
    }

    let json = serde_json::to_value(service.predict("p2").unwrap()).unwrap();

    assert_eq!(json["currentPrice"], 152.0);
    assert!(json["predictedPrice"].is_f64());
    assert!(json["priceHistory"].is_array());
    assert!(json["priceHistory"][0]["observedAt"].is_string());
}
