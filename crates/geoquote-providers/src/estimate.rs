//! Straight-line fallback router.

use async_trait::async_trait;
use geoquote_core::error::Result;
use geoquote_core::models::{GeoPoint, RouteResult};
use geoquote_core::ports::Router;
use geoquote_geo::spatial;

/// Stand-in router used when no routing provider is available: haversine
/// distance scaled by a circuity factor, flagged as an estimate, with no
/// geometry to draw.
pub struct StraightLineRouter {
    circuity_factor: f64,
}

impl StraightLineRouter {
    pub fn new(circuity_factor: f64) -> Self {
        Self { circuity_factor }
    }
}

#[async_trait]
impl Router for StraightLineRouter {
    async fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteResult> {
        from.validate()?;
        to.validate()?;
        let distance_km = spatial::estimated_road_km(from, to, self.circuity_factor);
        tracing::debug!(distance_km, "straight-line estimate");
        Ok(RouteResult::estimated(distance_km))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_estimate_flags_and_scales() {
        // 0.08993216 degrees of latitude along a meridian is ~10 km
        let from = GeoPoint::new(55.0, 37.0);
        let to = GeoPoint::new(55.08993216, 37.0);

        let route = StraightLineRouter::new(1.3).route(from, to).await.unwrap();
        assert!(route.is_estimate);
        assert!(route.geometry.is_empty());
        assert!((route.distance_km - 13.0).abs() < 0.05, "got {}", route.distance_km);
    }

    #[tokio::test]
    async fn test_estimate_rejects_invalid_point() {
        let bad = GeoPoint::new(f64::NAN, 0.0);
        let ok = GeoPoint::new(55.0, 37.0);
        assert!(StraightLineRouter::new(1.3).route(bad, ok).await.is_err());
    }
}
