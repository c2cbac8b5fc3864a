//! Yandex Maps geocoder adapter (1.x HTTP geocoder).

use async_trait::async_trait;
use geoquote_core::error::{QuoteError, Result};
use geoquote_core::models::{AddressCandidate, AddressKind, GeoPoint};
use geoquote_core::ports::{validate_query, Geocoder};
use serde::Deserialize;

const PROVIDER: &str = "Yandex Maps";
pub const DEFAULT_BASE_URL: &str = "https://geocode-maps.yandex.ru";

/// Forward/reverse geocoding over the Yandex 1.x geocoder.
pub struct YandexGeocoder {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl YandexGeocoder {
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

    async fn geocode(&self, geocode: &str) -> Result<Vec<FeatureMember>> {
        let url = format!("{}/1.x/", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("geocode", geocode),
                ("format", "json"),
                ("lang", self.language.as_str()),
                ("results", "10"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(QuoteError::ProviderAuth {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: check the key and its geocoder access", status),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuoteError::Provider {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let body: YandexResponse = response.json().await?;
        Ok(body.response.collection.feature_member)
    }
}

#[async_trait]
impl Geocoder for YandexGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<AddressCandidate>> {
        let query = validate_query(query)?;
        tracing::debug!(provider = PROVIDER, query, "forward geocoding");
        let members = self.geocode(query).await?;
        members.into_iter().map(|m| candidate_from_object(m.geo_object)).collect()
    }

    async fn reverse(&self, point: GeoPoint) -> Result<Option<AddressCandidate>> {
        point.validate()?;
        tracing::debug!(provider = PROVIDER, lat = point.lat, lon = point.lon, "reverse geocoding");
        // Yandex takes reverse input as lon,lat
        let geocode = format!("{},{}", point.lon, point.lat);
        let members = self.geocode(&geocode).await?;
        members
            .into_iter()
            .next()
            .map(|m| candidate_from_object(m.geo_object))
            .transpose()
    }
}

fn candidate_from_object(object: GeoObject) -> Result<AddressCandidate> {
    let point = parse_pos(&object.point.pos)?;
    let meta = object.meta.map(|m| m.geocoder);
    let text = meta
        .as_ref()
        .and_then(|g| g.text.clone())
        .or(object.name)
        .unwrap_or_default();
    let kind = meta
        .as_ref()
        .and_then(|g| g.kind.as_deref())
        .map(kind_from_str)
        .unwrap_or_default();
    Ok(AddressCandidate::new(text, point, kind))
}

/// Yandex `Point.pos` is a space-separated `"lon lat"` string; latitude
/// comes second on the wire and first in the canonical model.
fn parse_pos(pos: &str) -> Result<GeoPoint> {
    let mut parts = pos.split_whitespace();
    let (Some(lon_str), Some(lat_str), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(QuoteError::Provider {
            provider: PROVIDER.to_string(),
            message: format!("malformed Point.pos {:?}", pos),
        });
    };
    let lon: f64 = lon_str.parse().map_err(|_| malformed_pos(pos))?;
    let lat: f64 = lat_str.parse().map_err(|_| malformed_pos(pos))?;
    Ok(GeoPoint::new(lat, lon))
}

fn malformed_pos(pos: &str) -> QuoteError {
    QuoteError::Provider {
        provider: PROVIDER.to_string(),
        message: format!("non-numeric Point.pos {:?}", pos),
    }
}

fn kind_from_str(kind: &str) -> AddressKind {
    match kind {
        "house" => AddressKind::House,
        "street" => AddressKind::Street,
        "metro" => AddressKind::Metro,
        "district" => AddressKind::District,
        "locality" => AddressKind::Locality,
        _ => AddressKind::Other,
    }
}

#[derive(Debug, Deserialize)]
struct YandexResponse {
    response: YandexResponseInner,
}

#[derive(Debug, Deserialize)]
struct YandexResponseInner {
    #[serde(rename = "GeoObjectCollection")]
    collection: GeoObjectCollection,
}

#[derive(Debug, Deserialize)]
struct GeoObjectCollection {
    #[serde(rename = "featureMember", default)]
    feature_member: Vec<FeatureMember>,
}

#[derive(Debug, Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject")]
    geo_object: GeoObject,
}

#[derive(Debug, Deserialize)]
struct GeoObject {
    name: Option<String>,
    #[serde(rename = "metaDataProperty")]
    meta: Option<MetaDataProperty>,
    #[serde(rename = "Point")]
    point: YandexPoint,
}

#[derive(Debug, Deserialize)]
struct MetaDataProperty {
    #[serde(rename = "GeocoderMetaData")]
    geocoder: GeocoderMetaData,
}

#[derive(Debug, Deserialize)]
struct GeocoderMetaData {
    kind: Option<String>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YandexPoint {
    pos: String,
}
