use geoquote_core::models::{GeoPoint, LocationInput, PricingTier};
use serde::Deserialize;

/// Query string for address autocomplete
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// Query string for reverse geocoding
#[derive(Debug, Deserialize)]
pub struct ReverseParams {
    pub lat: f64,
    pub lon: f64,
}

/// A delivery endpoint: coordinates win when both forms are present,
/// matching the map-first order form in the UI.
#[derive(Debug, Deserialize)]
pub struct LocationDto {
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl LocationDto {
    pub fn into_input(self) -> Result<LocationInput, String> {
        match (self.lat, self.lon, self.address) {
            (Some(lat), Some(lon), _) => Ok(LocationInput::Point(GeoPoint::new(lat, lon))),
            (_, _, Some(address)) if !address.trim().is_empty() => {
                Ok(LocationInput::Address(address))
            }
            _ => Err("location requires either an address or both lat and lon".to_string()),
        }
    }
}

/// Quote request body
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub pickup: LocationDto,
    pub dropoff: LocationDto,
    #[serde(default)]
    pub tiers: Vec<PricingTier>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_win_over_address() {
        let dto = LocationDto {
            address: Some("Tverskaya 1".to_string()),
            lat: Some(55.75),
            lon: Some(37.61),
        };
        assert!(matches!(dto.into_input().unwrap(), LocationInput::Point(_)));
    }

    #[test]
    fn test_address_alone_is_enough() {
        let dto = LocationDto {
            address: Some("Tverskaya 1".to_string()),
            lat: None,
            lon: None,
        };
        assert!(matches!(dto.into_input().unwrap(), LocationInput::Address(_)));
    }

    #[test]
    fn test_empty_location_rejected() {
        let dto = LocationDto { address: None, lat: Some(55.75), lon: None };
        assert!(dto.into_input().is_err());

        let dto = LocationDto { address: Some("  ".to_string()), lat: None, lon: None };
        assert!(dto.into_input().is_err());
    }
}
