//! Error types for geoquote

use crate::models::LocationRole;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    // Configuration errors: operator-facing, never retryable
    #[error("Invalid configuration for {key}: {reason}")]
    Configuration { key: String, reason: String },

    // Caller input errors: safe to surface to the end user
    #[error("Invalid input: {reason}")]
    Validation { reason: String },

    // Provider returned a non-success response
    #[error("{provider} request failed: {message}")]
    Provider { provider: String, message: String },

    // Provider rejected the credential (401/403-equivalent)
    #[error("{provider} rejected the API credential: {message}")]
    ProviderAuth { provider: String, message: String },

    // Valid query, but the provider knows no route between the points
    #[error("No driving route found between the requested points")]
    RouteNotFound,

    // Valid query, but forward geocoding produced zero candidates
    #[error("No address candidates for {role} query {query:?}")]
    AddressNotFound { query: String, role: LocationRole },

    #[error("Malformed polyline at byte {offset}: {reason}")]
    PolylineDecode { offset: usize, reason: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
