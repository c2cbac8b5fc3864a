//! Google Maps adapters: Geocoding API and Directions API.

use async_trait::async_trait;
use geoquote_core::error::{QuoteError, Result};
use geoquote_core::models::{AddressCandidate, AddressKind, GeoPoint, RouteResult};
use geoquote_core::ports::{validate_query, Geocoder, Router};
use geoquote_geo::polyline;
use serde::Deserialize;

const PROVIDER: &str = "Google Maps";
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Forward/reverse geocoding over the Google Geocoding API.
pub struct GoogleGeocoder {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl GoogleGeocoder {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: language.into(),
        }
    }

    /// Point the adapter at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn geocode(&self, params: &[(&str, &str)]) -> Result<GeocodeResponse> {
        let url = format!("{}/maps/api/geocode/json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str()), ("language", self.language.as_str())])
            .send()
            .await?;

        let body: GeocodeResponse = response.json().await?;
        check_geocode_status(&body.status, body.error_message.as_deref())?;
        Ok(body)
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<AddressCandidate>> {
        let query = validate_query(query)?;
        tracing::debug!(provider = PROVIDER, query, "forward geocoding");
        let body = self.geocode(&[("address", query)]).await?;
        Ok(candidates_from_results(body.results))
    }

    async fn reverse(&self, point: GeoPoint) -> Result<Option<AddressCandidate>> {
        point.validate()?;
        tracing::debug!(provider = PROVIDER, lat = point.lat, lon = point.lon, "reverse geocoding");
        let latlng = waypoint(point);
        let body = self
            .geocode(&[
                ("latlng", latlng.as_str()),
                ("result_type", "street_address|route|locality|political"),
            ])
            .await?;
        Ok(candidates_from_results(body.results).into_iter().next())
    }
}

/// Driving routes over the Google Directions API.
pub struct GoogleRouter {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl GoogleRouter {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: language.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Router for GoogleRouter {
    async fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteResult> {
        from.validate()?;
        to.validate()?;
        tracing::debug!(provider = PROVIDER, ?from, ?to, "requesting directions");

        let url = format!("{}/maps/api/directions/json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("origin", waypoint(from).as_str()),
                ("destination", waypoint(to).as_str()),
                ("key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        let body: DirectionsResponse = response.json().await?;
        check_directions_status(&body.status, body.error_message.as_deref())?;

        let route = body.routes.first().ok_or(QuoteError::RouteNotFound)?;
        let leg = route.legs.first().ok_or(QuoteError::RouteNotFound)?;

        let geometry = polyline::decode(&route.overview_polyline.points)?;
        Ok(RouteResult::routed(leg.distance.value / 1000.0, geometry))
    }
}

/// Google waypoints are `lat,lon`, the opposite of OSRM's path segments.
fn waypoint(point: GeoPoint) -> String {
    format!("{},{}", point.lat, point.lon)
}

fn check_geocode_status(status: &str, error_message: Option<&str>) -> Result<()> {
    match status {
        // ZERO_RESULTS is a valid empty outcome, not an error
        "OK" | "ZERO_RESULTS" => Ok(()),
        "REQUEST_DENIED" => Err(auth_error(error_message)),
        other => Err(provider_error(other, error_message)),
    }
}

fn check_directions_status(status: &str, error_message: Option<&str>) -> Result<()> {
    match status {
        "OK" => Ok(()),
        "ZERO_RESULTS" | "NOT_FOUND" => Err(QuoteError::RouteNotFound),
        "REQUEST_DENIED" => Err(auth_error(error_message)),
        other => Err(provider_error(other, error_message)),
    }
}

fn auth_error(error_message: Option<&str>) -> QuoteError {
    QuoteError::ProviderAuth {
        provider: PROVIDER.to_string(),
        message: error_message
            .unwrap_or("check that the key is valid and the API is enabled for it")
            .to_string(),
    }
}

fn provider_error(status: &str, error_message: Option<&str>) -> QuoteError {
    QuoteError::Provider {
        provider: PROVIDER.to_string(),
        message: match error_message {
            Some(detail) => format!("{} ({})", detail, status),
            None => format!("status {}", status),
        },
    }
}

fn candidates_from_results(results: Vec<GeocodeResult>) -> Vec<AddressCandidate> {
    results
        .into_iter()
        .filter_map(|result| {
            let text = result.formatted_address?;
            let location = result.geometry?.location;
            Some(AddressCandidate::new(
                text,
                location_to_point(&location),
                kind_from_types(&result.types),
            ))
        })
        .collect()
}

/// Google encodes coordinates as a `{lat, lng}` object; this is the one
/// place its field names are trusted.
fn location_to_point(location: &Location) -> GeoPoint {
    GeoPoint::new(location.lat, location.lng)
}

fn kind_from_types(types: &[String]) -> AddressKind {
    for t in types {
        match t.as_str() {
            "street_address" | "premise" | "subpremise" => return AddressKind::House,
            "route" => return AddressKind::Street,
            "subway_station" | "transit_station" => return AddressKind::Metro,
            "sublocality" | "neighborhood" => return AddressKind::District,
            "locality" => return AddressKind::Locality,
            _ => continue,
        }
    }
    AddressKind::Other
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<Leg>,
    overview_polyline: OverviewPolyline,
}

#[derive(Debug, Deserialize)]
struct Leg {
    distance: TextValue,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoint_is_lat_first() {
        assert_eq!(waypoint(GeoPoint::new(55.75, 37.61)), "55.75,37.61");
    }

    #[test]
    fn test_location_conversion() {
        let location = Location { lat: 55.75, lng: 37.61 };
        let point = location_to_point(&location);
        assert_eq!(point.lat, 55.75);
        assert_eq!(point.lon, 37.61);
    }

    #[test]
    fn test_geocode_status_mapping() {
        assert!(check_geocode_status("OK", None).is_ok());
        assert!(check_geocode_status("ZERO_RESULTS", None).is_ok());
        assert!(matches!(
            check_geocode_status("REQUEST_DENIED", Some("key invalid")),
            Err(QuoteError::ProviderAuth { .. })
        ));
        assert!(matches!(
            check_geocode_status("OVER_QUERY_LIMIT", None),
            Err(QuoteError::Provider { .. })
        ));
    }

    #[test]
    fn test_directions_status_mapping() {
        assert!(matches!(
            check_directions_status("ZERO_RESULTS", None),
            Err(QuoteError::RouteNotFound)
        ));
        assert!(matches!(
            check_directions_status("NOT_FOUND", None),
            Err(QuoteError::RouteNotFound)
        ));
        assert!(matches!(
            check_directions_status("REQUEST_DENIED", None),
            Err(QuoteError::ProviderAuth { .. })
        ));
    }

    #[test]
    fn test_candidates_from_canned_response() {
        let body: GeocodeResponse = serde_json::from_str(
            r#"{
                "status": "OK",
                "results": [
                    {
                        "formatted_address": "Tverskaya St, 1, Moscow",
                        "geometry": {"location": {"lat": 55.757, "lng": 37.614}},
                        "types": ["street_address"]
                    },
                    {
                        "formatted_address": "Moscow, Russia",
                        "geometry": {"location": {"lat": 55.7558, "lng": 37.6173}},
                        "types": ["locality", "political"]
                    },
                    {"formatted_address": "orphan without geometry"}
                ]
            }"#,
        )
        .unwrap();

        let candidates = candidates_from_results(body.results);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].kind, AddressKind::House);
        assert_eq!(candidates[0].point, GeoPoint::new(55.757, 37.614));
        assert_eq!(candidates[1].kind, AddressKind::Locality);
    }

    #[test]
    fn test_kind_defaults_to_other() {
        assert_eq!(kind_from_types(&["park".to_string()]), AddressKind::Other);
        assert_eq!(kind_from_types(&[]), AddressKind::Other);
    }
}
