use crate::dto::{QuoteRequest, QuoteResponse};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, Json};
use geoquote_core::pricing;
use geoquote_pipeline::QuotePipeline;
use std::sync::Arc;

/// POST /api/v1/quote - calculate a delivery price
pub async fn calculate_quote(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    tracing::info!(tier_count = request.tiers.len(), "quote request");

    let pickup = request.pickup.into_input().map_err(ApiError::bad_request)?;
    let dropoff = request.dropoff.into_input().map_err(ApiError::bad_request)?;

    // Reject malformed tariff settings before any provider call is spent
    pricing::validate_tiers(&request.tiers)
        .map_err(|e| ApiError::from_quote(&e, state.catalog.as_ref()))?;

    let pipeline = QuotePipeline::new(
        state.geocoder.clone(),
        state.router.clone(),
        state.catalog.clone(),
    );

    let quote = pipeline
        .calculate_price(pickup, dropoff, &request.tiers)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "quote calculation failed");
            ApiError::from_quote(&e, state.catalog.as_ref())
        })?;

    Ok(Json(QuoteResponse::from(quote)))
}
