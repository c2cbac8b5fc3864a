use crate::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};

/// A geographic point in WGS84, latitude first.
///
/// Providers disagree on coordinate order (`lat,lng` objects, `lon lat`
/// strings, `lon,lat` path segments); every adapter converts to this type
/// at its boundary and nothing past the boundary relies on positional
/// order again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Reject non-finite or out-of-range coordinates before they reach a
    /// provider call.
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(QuoteError::Validation {
                reason: format!("coordinates must be finite, got ({}, {})", self.lat, self.lon),
            });
        }
        if self.lat.abs() > 90.0 || self.lon.abs() > 180.0 {
            return Err(QuoteError::Validation {
                reason: format!("coordinates out of range: ({}, {})", self.lat, self.lon),
            });
        }
        Ok(())
    }
}
