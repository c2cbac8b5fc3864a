//! Conversions between the canonical `GeoPoint` and the `geo` crate.
//!
//! `geo` keeps coordinates as `(x, y)` = `(lon, lat)`; the canonical type
//! is latitude-first. These two functions are the only place that swap
//! happens.

pub use geoquote_core::models::GeoPoint;

/// Convert a canonical point to a `geo::Point` (x = lon, y = lat).
pub fn to_geo_point(point: GeoPoint) -> geo::Point {
    geo::Point::new(point.lon, point.lat)
}

/// Convert a `geo::Point` back to the canonical latitude-first form.
pub fn from_geo_point(point: geo::Point) -> GeoPoint {
    GeoPoint { lat: point.y(), lon: point.x() }
}

/// Extension trait for GeoPoint with geo-crate operations
pub trait GeoPointExt {
    fn to_geo(self) -> geo::Point;
}

impl GeoPointExt for GeoPoint {
    fn to_geo(self) -> geo::Point {
        to_geo_point(self)
    }
}
