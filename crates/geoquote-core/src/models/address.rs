use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};

/// What kind of object a geocoder candidate refers to.
///
/// Providers use their own vocabularies; each adapter maps into this enum
/// and anything it cannot classify becomes [`AddressKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    House,
    Street,
    Metro,
    District,
    Locality,
    #[default]
    Other,
}

/// One forward- or reverse-geocoding result.
///
/// Candidates come back in provider relevance order; no further ordering
/// guarantee exists and the list may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressCandidate {
    /// Full display text of the address
    pub text: String,
    /// Normalized coordinates
    pub point: GeoPoint,
    #[serde(default)]
    pub kind: AddressKind,
}

impl AddressCandidate {
    pub fn new(text: impl Into<String>, point: GeoPoint, kind: AddressKind) -> Self {
        Self { text: text.into(), point, kind }
    }
}
