use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Addresses
        .route("/api/v1/address/search", get(handlers::search_address))
        .route("/api/v1/address/reverse", get(handlers::reverse_geocode))

        // Quotes
        .route("/api/v1/quote", post(handlers::calculate_quote))

        .with_state(state)
}
