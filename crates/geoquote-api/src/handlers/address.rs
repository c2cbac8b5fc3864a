use crate::dto::{CandidateResponse, ReverseParams, SearchParams};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use geoquote_core::models::GeoPoint;
use geoquote_pipeline::suggest;
use std::sync::Arc;

/// GET /api/v1/address/search - address autocomplete
///
/// Sub-minimum queries return an empty list; the UI calls this on a
/// debounce while the user types.
pub async fn search_address(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CandidateResponse>>, ApiError> {
    tracing::info!(query = %params.q, "address search");

    let candidates = suggest(&state.geocoder, &params.q)
        .await
        .map_err(|e| ApiError::from_quote(&e, state.catalog.as_ref()))?;

    Ok(Json(candidates.into_iter().map(CandidateResponse::from).collect()))
}

/// GET /api/v1/address/reverse - address for a point picked on the map
pub async fn reverse_geocode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReverseParams>,
) -> Result<Json<Option<CandidateResponse>>, ApiError> {
    tracing::info!(lat = params.lat, lon = params.lon, "reverse geocode");

    let point = GeoPoint::new(params.lat, params.lon);
    let candidate = state
        .geocoder
        .reverse(point)
        .await
        .map_err(|e| ApiError::from_quote(&e, state.catalog.as_ref()))?;

    Ok(Json(candidate.map(CandidateResponse::from)))
}
