use geoquote_core::models::{AddressCandidate, AddressKind, PriceQuote};
use geoquote_geo::polyline;
use serde::Serialize;

/// One geocoding candidate
#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub address: String,
    pub lat: f64,
    pub lon: f64,
    pub kind: AddressKind,
}

impl From<AddressCandidate> for CandidateResponse {
    fn from(candidate: AddressCandidate) -> Self {
        Self {
            address: candidate.text,
            lat: candidate.point.lat,
            lon: candidate.point.lon,
            kind: candidate.kind,
        }
    }
}

/// Quote response
///
/// Geometry ships both as `[lat, lon]` pairs for direct map rendering and
/// re-encoded as a polyline for clients that prefer the compact form.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub distance_km: f64,
    pub price: f64,
    pub explanation: String,
    pub is_estimate: bool,
    pub geometry: Vec<[f64; 2]>,
    pub polyline: String,
}

impl From<PriceQuote> for QuoteResponse {
    fn from(quote: PriceQuote) -> Self {
        let encoded = polyline::encode(&quote.geometry);
        Self {
            distance_km: quote.distance_km,
            price: quote.price,
            explanation: quote.explanation,
            is_estimate: quote.is_estimate,
            geometry: quote.geometry.iter().map(|p| [p.lat, p.lon]).collect(),
            polyline: encoded,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "geoquote-api" }
    }
}
