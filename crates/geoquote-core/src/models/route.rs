use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};

/// Result of a routing request between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Total driving distance in kilometers
    pub distance_km: f64,
    /// Route geometry for map display; empty when estimated
    pub geometry: Vec<GeoPoint>,
    /// True when the distance is a straight-line estimate with a circuity
    /// multiplier rather than a provider-computed road distance. Consumers
    /// must surface this distinction to the user.
    pub is_estimate: bool,
}

impl RouteResult {
    /// A provider-computed road route.
    pub fn routed(distance_km: f64, geometry: Vec<GeoPoint>) -> Self {
        Self { distance_km, geometry, is_estimate: false }
    }

    /// A straight-line estimate with no geometry.
    pub fn estimated(distance_km: f64) -> Self {
        Self { distance_km, geometry: Vec::new(), is_estimate: true }
    }
}
