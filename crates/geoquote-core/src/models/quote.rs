use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a delivery a location belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationRole {
    Pickup,
    Dropoff,
}

impl fmt::Display for LocationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationRole::Pickup => write!(f, "pickup"),
            LocationRole::Dropoff => write!(f, "dropoff"),
        }
    }
}

/// A delivery endpoint as supplied by the caller: either free-form text to
/// be geocoded, or coordinates picked on a map.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    Address(String),
    Point(GeoPoint),
}

/// Terminal output of a price calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Road (or estimated) distance, rounded to two decimals
    pub distance_km: f64,
    pub price: f64,
    /// Localized text describing which tier matched, or that the overflow
    /// policy applied; prefixed with an "(estimated)" marker when the
    /// distance came from the straight-line fallback
    pub explanation: String,
    /// Route geometry for drawing on a map; empty for estimates
    pub geometry: Vec<GeoPoint>,
    pub is_estimate: bool,
}
