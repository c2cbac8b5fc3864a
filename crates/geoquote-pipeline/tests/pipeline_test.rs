//! Integration tests for the quote pipeline over fake ports.

use async_trait::async_trait;
use geoquote_core::error::{QuoteError, Result};
use geoquote_core::locale::{Catalog, EnCatalog};
use geoquote_core::models::{
    AddressCandidate, AddressKind, GeoPoint, LocationInput, LocationRole, PricingTier, RouteResult,
};
use geoquote_core::ports::{Geocoder, Router};
use geoquote_pipeline::{suggest, QuotePipeline};
use geoquote_providers::StraightLineRouter;
use std::collections::HashMap;
use std::sync::Arc;

/// Geocoder backed by a fixed query -> candidates table.
struct FakeGeocoder {
    results: HashMap<String, Vec<AddressCandidate>>,
}

impl FakeGeocoder {
    fn new() -> Self {
        let mut results = HashMap::new();
        results.insert(
            "Tverskaya 1".to_string(),
            vec![AddressCandidate::new(
                "Tverskaya St, 1, Moscow",
                GeoPoint::new(55.757, 37.614),
                AddressKind::House,
            )],
        );
        results.insert(
            "Arbat 10".to_string(),
            vec![
                AddressCandidate::new(
                    "Arbat St, 10, Moscow",
                    GeoPoint::new(55.750, 37.591),
                    AddressKind::House,
                ),
                AddressCandidate::new(
                    "Arbat district",
                    GeoPoint::new(55.749, 37.589),
                    AddressKind::District,
                ),
            ],
        );
        Self { results }
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<AddressCandidate>> {
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }

    async fn reverse(&self, point: GeoPoint) -> Result<Option<AddressCandidate>> {
        Ok(Some(AddressCandidate::new(
            "Somewhere",
            point,
            AddressKind::Other,
        )))
    }
}

/// Router that always reports the same road distance.
struct FixedRouter {
    distance_km: f64,
}

#[async_trait]
impl Router for FixedRouter {
    async fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteResult> {
        Ok(RouteResult::routed(self.distance_km, vec![from, to]))
    }
}

fn demo_tiers() -> Vec<PricingTier> {
    vec![
        PricingTier::new("0-3", 10.0),
        PricingTier::new("3-5", 20.0),
        PricingTier::new("5-10", 30.0),
        PricingTier::new("10+", 50.0),
    ]
}

fn catalog() -> Arc<dyn Catalog> {
    Arc::new(EnCatalog)
}

fn pipeline(distance_km: f64) -> QuotePipeline<FakeGeocoder, FixedRouter> {
    QuotePipeline::new(FakeGeocoder::new(), FixedRouter { distance_km }, catalog())
}

#[tokio::test]
async fn test_quote_matches_middle_tier() {
    let quote = pipeline(4.2)
        .calculate_price(
            LocationInput::Address("Tverskaya 1".to_string()),
            LocationInput::Address("Arbat 10".to_string()),
            &demo_tiers(),
        )
        .await
        .unwrap();

    assert_eq!(quote.distance_km, 4.2);
    assert_eq!(quote.price, 20.0);
    assert!(quote.explanation.contains("3-5"));
    assert!(!quote.is_estimate);
    assert_eq!(quote.geometry.len(), 2);
}

#[tokio::test]
async fn test_quote_overflow_applies_highest_tier() {
    let quote = pipeline(12.0)
        .calculate_price(
            LocationInput::Point(GeoPoint::new(55.757, 37.614)),
            LocationInput::Point(GeoPoint::new(55.750, 37.591)),
            &demo_tiers(),
        )
        .await
        .unwrap();

    assert_eq!(quote.price, 50.0);
    assert!(quote.explanation.contains("10+"));
}

#[tokio::test]
async fn test_quote_without_tiers_degrades_to_zero() {
    let quote = pipeline(4.2)
        .calculate_price(
            LocationInput::Point(GeoPoint::new(55.757, 37.614)),
            LocationInput::Point(GeoPoint::new(55.750, 37.591)),
            &[],
        )
        .await
        .unwrap();

    assert_eq!(quote.price, 0.0);
    assert!(quote.explanation.contains("No applicable"));
}

#[tokio::test]
async fn test_unknown_address_names_query_and_side() {
    let err = pipeline(4.2)
        .calculate_price(
            LocationInput::Address("Ftc".to_string()),
            LocationInput::Address("Arbat 10".to_string()),
            &demo_tiers(),
        )
        .await
        .unwrap_err();

    match err {
        QuoteError::AddressNotFound { query, role } => {
            assert_eq!(query, "Ftc");
            assert_eq!(role, LocationRole::Pickup);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_estimate_distance_and_marker() {
    // Two points ~10 km apart along a meridian; 1.3 circuity gives ~13 km.
    let pipeline = QuotePipeline::new(FakeGeocoder::new(), StraightLineRouter::new(1.3), catalog());
    let quote = pipeline
        .calculate_price(
            LocationInput::Point(GeoPoint::new(55.0, 37.0)),
            LocationInput::Point(GeoPoint::new(55.08993216, 37.0)),
            &demo_tiers(),
        )
        .await
        .unwrap();

    assert!(quote.is_estimate);
    assert!(quote.geometry.is_empty());
    assert!((quote.distance_km - 13.0).abs() < 0.05, "got {}", quote.distance_km);
    assert!(quote.explanation.starts_with("(estimated)"));
    // 13 km lands in the open-ended tier
    assert_eq!(quote.price, 50.0);
}

#[tokio::test]
async fn test_identical_calls_are_idempotent() {
    let pipeline = pipeline(4.2);
    let pickup = LocationInput::Address("Tverskaya 1".to_string());
    let dropoff = LocationInput::Address("Arbat 10".to_string());
    let tiers = demo_tiers();

    let first = pipeline
        .calculate_price(pickup.clone(), dropoff.clone(), &tiers)
        .await
        .unwrap();
    let second = pipeline.calculate_price(pickup, dropoff, &tiers).await.unwrap();

    assert_eq!(first.distance_km, second.distance_km);
    assert_eq!(first.price, second.price);
    assert_eq!(first.explanation, second.explanation);
}

#[tokio::test]
async fn test_first_candidate_wins() {
    // "Arbat 10" has two candidates; the provider-ranked first one is used.
    let pipeline = pipeline(1.0);
    let quote = pipeline
        .calculate_price(
            LocationInput::Address("Arbat 10".to_string()),
            LocationInput::Point(GeoPoint::new(55.757, 37.614)),
            &demo_tiers(),
        )
        .await
        .unwrap();
    assert_eq!(quote.geometry[0], GeoPoint::new(55.750, 37.591));
}

#[tokio::test]
async fn test_invalid_coordinates_rejected() {
    let err = pipeline(1.0)
        .calculate_price(
            LocationInput::Point(GeoPoint::new(f64::NAN, 37.0)),
            LocationInput::Point(GeoPoint::new(55.0, 37.0)),
            &demo_tiers(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, QuoteError::Validation { .. }));
}

#[tokio::test]
async fn test_suggest_short_query_is_empty_not_error() {
    let geocoder = FakeGeocoder::new();
    assert!(suggest(&geocoder, "Tv").await.unwrap().is_empty());
    assert!(suggest(&geocoder, "  ").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_suggest_passes_through() {
    let geocoder = FakeGeocoder::new();
    let candidates = suggest(&geocoder, " Tverskaya 1 ").await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].kind, AddressKind::House);
}
