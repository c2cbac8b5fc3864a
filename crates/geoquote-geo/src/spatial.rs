//! Great-circle distances and the straight-line route estimate.

use crate::models::GeoPointExt;
use geo::{Distance, Haversine};
use geoquote_core::models::GeoPoint;

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    Haversine.distance(from.to_geo(), to.to_geo()) / 1000.0
}

/// Straight-line distance scaled by a road-circuity factor.
///
/// The multiplier (1.3 by default configuration) is a deliberate
/// heuristic for how much longer roads run than the crow flies, not a
/// precise conversion; results carry an estimate flag all the way to the
/// user.
pub fn estimated_road_km(from: GeoPoint, to: GeoPoint, circuity_factor: f64) -> f64 {
    haversine_km(from, to) * circuity_factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // Paris to London is approximately 344 km
        let paris = GeoPoint::new(48.8566, 2.3522);
        let london = GeoPoint::new(51.5074, -0.1276);
        let km = haversine_km(paris, london);
        assert!(km > 339.0 && km < 349.0, "Paris-London distance {} should be ~344km", km);
    }

    #[test]
    fn test_haversine_same_point_is_zero() {
        let point = GeoPoint::new(55.7558, 37.6173);
        assert!(haversine_km(point, point) < 1e-9);
    }

    #[test]
    fn test_estimated_road_km_applies_circuity() {
        // One degree of latitude along a meridian is ~111.195 km
        let a = GeoPoint::new(55.0, 37.0);
        let b = GeoPoint::new(56.0, 37.0);
        let straight = haversine_km(a, b);
        let estimated = estimated_road_km(a, b, 1.3);
        assert!((estimated - straight * 1.3).abs() < 1e-9);
        assert!((straight - 111.2).abs() < 0.5);
    }
}
