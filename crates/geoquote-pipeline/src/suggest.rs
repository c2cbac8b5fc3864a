//! Address autocomplete glue.

use geoquote_core::error::Result;
use geoquote_core::models::AddressCandidate;
use geoquote_core::ports::{Geocoder, MIN_QUERY_LEN};

/// Suggest address candidates for a partially typed query.
///
/// A thin pass-through to the geocoder with one difference from
/// [`Geocoder::search`]: below the minimum query length it returns an
/// empty list instead of a validation error, because autocomplete callers
/// probe on every few keystrokes. Callers are expected to debounce
/// (300-500 ms) before invoking.
pub async fn suggest<G: Geocoder>(geocoder: &G, partial: &str) -> Result<Vec<AddressCandidate>> {
    let trimmed = partial.trim();
    if trimmed.chars().count() < MIN_QUERY_LEN {
        return Ok(Vec::new());
    }
    geocoder.search(trimmed).await
}
