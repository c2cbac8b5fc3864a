//! Provider port definitions
//!
//! One interface per capability, one concrete strategy per provider.
//! Adapters own the translation from provider wire formats (including
//! their coordinate order) into the canonical models.

use crate::error::{QuoteError, Result};
use crate::models::{AddressCandidate, GeoPoint, RouteResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Minimum query length accepted by forward geocoding.
pub const MIN_QUERY_LEN: usize = 3;

/// Trim and validate a forward-geocoding query.
///
/// Zero provider results are a valid empty outcome, but a sub-minimum
/// query never reaches the provider at all.
pub fn validate_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_LEN {
        return Err(QuoteError::Validation {
            reason: format!("address query must be at least {} characters", MIN_QUERY_LEN),
        });
    }
    Ok(trimmed)
}

/// Port for resolving addresses to coordinates and back.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Forward geocoding: resolve a free-text query to candidates in
    /// provider relevance order. An empty list is a valid result, not an
    /// error.
    async fn search(&self, query: &str) -> Result<Vec<AddressCandidate>>;

    /// Reverse geocoding: resolve a point to its nearest address, if the
    /// provider knows one.
    async fn reverse(&self, point: GeoPoint) -> Result<Option<AddressCandidate>>;
}

/// Port for computing a driving route between two points.
#[async_trait]
pub trait Router: Send + Sync {
    async fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteResult>;
}

#[async_trait]
impl<T: Geocoder + ?Sized> Geocoder for Arc<T> {
    async fn search(&self, query: &str) -> Result<Vec<AddressCandidate>> {
        (**self).search(query).await
    }

    async fn reverse(&self, point: GeoPoint) -> Result<Option<AddressCandidate>> {
        (**self).reverse(point).await
    }
}

#[async_trait]
impl<T: Router + ?Sized> Router for Arc<T> {
    async fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteResult> {
        (**self).route(from, to).await
    }
}
