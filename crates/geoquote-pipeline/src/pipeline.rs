use geoquote_core::error::{QuoteError, Result};
use geoquote_core::locale::{Catalog, UserMessage};
use geoquote_core::models::{GeoPoint, LocationInput, LocationRole, PriceQuote, PricingTier};
use geoquote_core::ports::{Geocoder, Router};
use geoquote_core::pricing;
use std::sync::Arc;

/// Price calculation orchestrator
///
/// Resolves both endpoints (concurrently, when geocoding is needed),
/// routes between them, prices the distance, and assembles the quote.
/// Idempotent for identical inputs against a stable provider.
pub struct QuotePipeline<G, R>
where
    G: Geocoder,
    R: Router,
{
    geocoder: G,
    router: R,
    catalog: Arc<dyn Catalog>,
}

impl<G, R> QuotePipeline<G, R>
where
    G: Geocoder,
    R: Router,
{
    /// Create a new pipeline
    pub fn new(geocoder: G, router: R, catalog: Arc<dyn Catalog>) -> Self {
        Self {
            geocoder,
            router,
            catalog,
        }
    }

    /// Calculate a delivery price quote between two endpoints.
    pub async fn calculate_price(
        &self,
        pickup: LocationInput,
        dropoff: LocationInput,
        tiers: &[PricingTier],
    ) -> Result<PriceQuote> {
        // Phase 1: resolve both endpoints; the two geocoding calls have no
        // ordering dependency, so they run as a fan-out/fan-in.
        let (from, to) = tokio::try_join!(
            self.resolve(pickup, LocationRole::Pickup),
            self.resolve(dropoff, LocationRole::Dropoff),
        )?;

        // Phase 2: route
        let route = self.router.route(from, to).await?;
        let distance_km = pricing::round2(route.distance_km);

        // Phase 3: price and explain
        let breakdown = pricing::price(distance_km, tiers, self.catalog.as_ref())?;
        let explanation = if route.is_estimate {
            format!(
                "{} {}",
                self.catalog.render(&UserMessage::EstimateNote),
                breakdown.explanation
            )
        } else {
            breakdown.explanation
        };

        tracing::info!(
            distance_km,
            price = breakdown.price,
            is_estimate = route.is_estimate,
            matched_range = breakdown.matched_range.as_deref(),
            "quote computed"
        );

        Ok(PriceQuote {
            distance_km,
            price: breakdown.price,
            explanation,
            geometry: route.geometry,
            is_estimate: route.is_estimate,
        })
    }

    async fn resolve(&self, input: LocationInput, role: LocationRole) -> Result<GeoPoint> {
        match input {
            LocationInput::Point(point) => {
                point.validate()?;
                Ok(point)
            }
            LocationInput::Address(query) => {
                let candidates = self.geocoder.search(&query).await?;
                match candidates.first() {
                    Some(best) => Ok(best.point),
                    None => Err(QuoteError::AddressNotFound { query, role }),
                }
            }
        }
    }
}
