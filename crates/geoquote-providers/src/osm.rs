//! OpenStreetMap adapters: Nominatim geocoding and OSRM routing.
//!
//! Neither service takes an API key; Nominatim's usage policy requires an
//! identifying User-Agent instead, which the factory sets on the client.

use async_trait::async_trait;
use geoquote_core::error::{QuoteError, Result};
use geoquote_core::models::{AddressCandidate, AddressKind, GeoPoint, RouteResult};
use geoquote_core::ports::{validate_query, Geocoder, Router};
use geoquote_geo::polyline;
use serde::Deserialize;

const NOMINATIM: &str = "Nominatim";
const OSRM: &str = "OSRM";

/// Forward/reverse geocoding over Nominatim.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl NominatimGeocoder {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            language: language.into(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<AddressCandidate>> {
        let query = validate_query(query)?;
        tracing::debug!(provider = NOMINATIM, query, "forward geocoding");

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("limit", "10"),
                ("accept-language", self.language.as_str()),
            ])
            .send()
            .await?;
        check_http_status(NOMINATIM, &response)?;

        let places: Vec<NominatimPlace> = response.json().await?;
        places.into_iter().map(candidate_from_place).collect()
    }

    async fn reverse(&self, point: GeoPoint) -> Result<Option<AddressCandidate>> {
        point.validate()?;
        tracing::debug!(provider = NOMINATIM, lat = point.lat, lon = point.lon, "reverse geocoding");

        let url = format!("{}/reverse", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", point.lat.to_string().as_str()),
                ("lon", point.lon.to_string().as_str()),
                ("format", "jsonv2"),
                ("accept-language", self.language.as_str()),
            ])
            .send()
            .await?;
        check_http_status(NOMINATIM, &response)?;

        let body: NominatimReverse = response.json().await?;
        match body {
            // Nominatim reports "nothing here" as an error object in a 200
            NominatimReverse::NotFound { .. } => Ok(None),
            NominatimReverse::Place(place) => candidate_from_place(place).map(Some),
        }
    }
}

/// Driving routes over OSRM's HTTP API.
pub struct OsrmRouter {
    client: reqwest::Client,
    base_url: String,
}

impl OsrmRouter {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }
}

#[async_trait]
impl Router for OsrmRouter {
    async fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteResult> {
        from.validate()?;
        to.validate()?;
        tracing::debug!(provider = OSRM, ?from, ?to, "requesting route");

        let url = format!("{}/route/v1/driving/{}", self.base_url, waypoints(from, to));
        let response = self
            .client
            .get(&url)
            .query(&[("overview", "full"), ("alternatives", "false")])
            .send()
            .await?;
        check_http_status(OSRM, &response)?;

        let body: OsrmResponse = response.json().await?;
        check_osrm_code(&body.code, body.message.as_deref())?;

        let route = body.routes.first().ok_or(QuoteError::RouteNotFound)?;
        let geometry = polyline::decode(&route.geometry)?;
        Ok(RouteResult::routed(route.distance / 1000.0, geometry))
    }
}

fn check_http_status(provider: &str, response: &reqwest::Response) -> Result<()> {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(QuoteError::ProviderAuth {
            provider: provider.to_string(),
            message: format!("HTTP {}: check access permissions for this endpoint", status),
        });
    }
    if !status.is_success() {
        return Err(QuoteError::Provider {
            provider: provider.to_string(),
            message: format!("HTTP {}", status),
        });
    }
    Ok(())
}

fn check_osrm_code(code: &str, message: Option<&str>) -> Result<()> {
    match code {
        "Ok" => Ok(()),
        "NoRoute" | "NoSegment" => Err(QuoteError::RouteNotFound),
        other => Err(QuoteError::Provider {
            provider: OSRM.to_string(),
            message: match message {
                Some(detail) => format!("{} ({})", detail, other),
                None => format!("code {}", other),
            },
        }),
    }
}

/// OSRM path segments are `lon,lat;lon,lat`, longitude first, unlike
/// every other provider here.
fn waypoints(from: GeoPoint, to: GeoPoint) -> String {
    format!("{},{};{},{}", from.lon, from.lat, to.lon, to.lat)
}

fn candidate_from_place(place: NominatimPlace) -> Result<AddressCandidate> {
    let point = place_point(&place)?;
    let kind = kind_from_class(place.class.as_deref(), place.place_type.as_deref());
    Ok(AddressCandidate::new(place.display_name, point, kind))
}

/// Nominatim serializes coordinates as JSON strings, not numbers.
fn place_point(place: &NominatimPlace) -> Result<GeoPoint> {
    let parse = |field: &str, value: &str| -> Result<f64> {
        value.parse().map_err(|_| QuoteError::Provider {
            provider: NOMINATIM.to_string(),
            message: format!("non-numeric {} {:?}", field, value),
        })
    };
    Ok(GeoPoint::new(parse("lat", &place.lat)?, parse("lon", &place.lon)?))
}

fn kind_from_class(class: Option<&str>, place_type: Option<&str>) -> AddressKind {
    match (class, place_type) {
        (Some("highway"), _) => AddressKind::Street,
        (Some("building"), _) | (_, Some("house" | "apartments" | "detached")) => {
            AddressKind::House
        }
        (Some("railway"), Some("station" | "subway" | "subway_entrance")) => AddressKind::Metro,
        (_, Some("suburb" | "neighbourhood" | "quarter" | "city_district")) => AddressKind::District,
        (_, Some("city" | "town" | "village" | "hamlet")) => AddressKind::Locality,
        _ => AddressKind::Other,
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    class: Option<String>,
    #[serde(rename = "type", default)]
    place_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NominatimReverse {
    NotFound { error: String },
    Place(NominatimPlace),
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters
    distance: f64,
    /// Encoded polyline
    geometry: String,
}
