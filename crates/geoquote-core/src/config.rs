use crate::error::{QuoteError, Result};
use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided programmatically by the embedding application
    Override,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Override => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Which geocoding provider to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocoderKind {
    Google,
    Yandex,
    Nominatim,
}

/// Which routing provider to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterKind {
    Google,
    Osrm,
    /// Straight-line haversine estimate with a circuity multiplier
    Estimate,
}

/// Layered configuration for geoquote
///
/// Credentials live here and are injected into adapter constructors;
/// adapters never read the process environment themselves, so tests can
/// supply fakes without mutating global state.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    pub geocoder: ConfigValue<GeocoderKind>,
    pub router: ConfigValue<RouterKind>,
    pub google_api_key: ConfigValue<Option<String>>,
    pub yandex_api_key: ConfigValue<Option<String>>,
    pub osrm_base_url: ConfigValue<String>,
    pub nominatim_base_url: ConfigValue<String>,
    pub http_timeout_secs: ConfigValue<u64>,
    /// Substitute the straight-line estimator when the router credential
    /// is missing, instead of failing configuration
    pub fallback_estimate: ConfigValue<bool>,
    /// Road-circuity multiplier applied to straight-line estimates
    pub circuity_factor: ConfigValue<f64>,
    pub locale: ConfigValue<Locale>,
}

impl QuoteConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            geocoder: ConfigValue::new(GeocoderKind::Nominatim, ConfigSource::Default),
            router: ConfigValue::new(RouterKind::Osrm, ConfigSource::Default),
            google_api_key: ConfigValue::new(None, ConfigSource::Default),
            yandex_api_key: ConfigValue::new(None, ConfigSource::Default),
            osrm_base_url: ConfigValue::new(
                "https://router.project-osrm.org".to_string(),
                ConfigSource::Default,
            ),
            nominatim_base_url: ConfigValue::new(
                "https://nominatim.openstreetmap.org".to_string(),
                ConfigSource::Default,
            ),
            http_timeout_secs: ConfigValue::new(10, ConfigSource::Default),
            fallback_estimate: ConfigValue::new(true, ConfigSource::Default),
            circuity_factor: ConfigValue::new(1.3, ConfigSource::Default),
            locale: ConfigValue::new(Locale::default(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| QuoteError::Configuration {
            key: "file".to_string(),
            reason: format!("failed to read config file: {}", e),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| QuoteError::Configuration {
                key: "file".to_string(),
                reason: format!("failed to parse TOML: {}", e),
            })?;

        if let Some(geocoder) = file_config.geocoder {
            self.geocoder.update(geocoder, ConfigSource::File);
        }
        if let Some(router) = file_config.router {
            self.router.update(router, ConfigSource::File);
        }
        if let Some(key) = file_config.google_api_key {
            self.google_api_key.update(Some(key), ConfigSource::File);
        }
        if let Some(key) = file_config.yandex_api_key {
            self.yandex_api_key.update(Some(key), ConfigSource::File);
        }
        if let Some(url) = file_config.osrm_base_url {
            self.osrm_base_url.update(url, ConfigSource::File);
        }
        if let Some(url) = file_config.nominatim_base_url {
            self.nominatim_base_url.update(url, ConfigSource::File);
        }
        if let Some(secs) = file_config.http_timeout_secs {
            self.http_timeout_secs.update(secs, ConfigSource::File);
        }
        if let Some(fallback) = file_config.fallback_estimate {
            self.fallback_estimate.update(fallback, ConfigSource::File);
        }
        if let Some(factor) = file_config.circuity_factor {
            self.circuity_factor.update(factor, ConfigSource::File);
        }
        if let Some(locale) = file_config.locale {
            self.locale.update(locale, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(value) = env::var("GEOQUOTE_GEOCODER") {
            match parse_geocoder_kind(&value) {
                Ok(kind) => self.geocoder.update(kind, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOQUOTE_GEOCODER value '{}': expected google, yandex, or nominatim",
                    value
                ),
            }
        }

        if let Ok(value) = env::var("GEOQUOTE_ROUTER") {
            match parse_router_kind(&value) {
                Ok(kind) => self.router.update(kind, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOQUOTE_ROUTER value '{}': expected google, osrm, or estimate",
                    value
                ),
            }
        }

        if let Ok(key) = env::var("GEOQUOTE_GOOGLE_API_KEY") {
            self.google_api_key.update(Some(key), ConfigSource::Environment);
        }

        if let Ok(key) = env::var("GEOQUOTE_YANDEX_API_KEY") {
            self.yandex_api_key.update(Some(key), ConfigSource::Environment);
        }

        if let Ok(url) = env::var("GEOQUOTE_OSRM_URL") {
            self.osrm_base_url.update(url, ConfigSource::Environment);
        }

        if let Ok(url) = env::var("GEOQUOTE_NOMINATIM_URL") {
            self.nominatim_base_url.update(url, ConfigSource::Environment);
        }

        if let Ok(value) = env::var("GEOQUOTE_HTTP_TIMEOUT_SECS") {
            match value.parse::<u64>() {
                Ok(secs) => self.http_timeout_secs.update(secs, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOQUOTE_HTTP_TIMEOUT_SECS value '{}': expected seconds",
                    value
                ),
            }
        }

        if let Ok(value) = env::var("GEOQUOTE_FALLBACK_ESTIMATE") {
            match value.parse::<bool>() {
                Ok(fallback) => self.fallback_estimate.update(fallback, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOQUOTE_FALLBACK_ESTIMATE value '{}': expected true or false",
                    value
                ),
            }
        }

        if let Ok(value) = env::var("GEOQUOTE_CIRCUITY_FACTOR") {
            match value.parse::<f64>() {
                Ok(factor) if factor.is_finite() && factor >= 1.0 => {
                    self.circuity_factor.update(factor, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid GEOQUOTE_CIRCUITY_FACTOR value '{}': expected a number >= 1.0",
                    value
                ),
            }
        }

        if let Ok(value) = env::var("GEOQUOTE_LOCALE") {
            match parse_locale(&value) {
                Ok(locale) => self.locale.update(locale, ConfigSource::Environment),
                Err(_) => {
                    tracing::warn!("Invalid GEOQUOTE_LOCALE value '{}': expected en or ru", value)
                }
            }
        }

        self
    }

    /// The Google credential, or a configuration error when it is absent
    /// or still the setup placeholder.
    pub fn google_credential(&self) -> Result<&str> {
        credential("google_api_key", self.google_api_key.value.as_deref())
    }

    /// The Yandex credential, with the same placeholder policy.
    pub fn yandex_credential(&self) -> Result<&str> {
        credential("yandex_api_key", self.yandex_api_key.value.as_deref())
    }
}

/// Keys copied out of a setup template and never replaced behave exactly
/// like missing keys.
pub fn is_placeholder(key: &str) -> bool {
    let trimmed = key.trim();
    trimmed.is_empty() || (trimmed.starts_with("YOUR_") && trimmed.ends_with("_HERE"))
}

fn credential<'a>(key: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !is_placeholder(v) => Ok(v),
        Some(_) => Err(QuoteError::Configuration {
            key: key.to_string(),
            reason: "credential is still the setup placeholder".to_string(),
        }),
        None => Err(QuoteError::Configuration {
            key: key.to_string(),
            reason: "credential is not set".to_string(),
        }),
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    geocoder: Option<GeocoderKind>,
    router: Option<RouterKind>,
    google_api_key: Option<String>,
    yandex_api_key: Option<String>,
    osrm_base_url: Option<String>,
    nominatim_base_url: Option<String>,
    http_timeout_secs: Option<u64>,
    fallback_estimate: Option<bool>,
    circuity_factor: Option<f64>,
    locale: Option<Locale>,
}

/// Parse geocoder kind from string
pub fn parse_geocoder_kind(s: &str) -> Result<GeocoderKind> {
    match s.to_lowercase().as_str() {
        "google" => Ok(GeocoderKind::Google),
        "yandex" => Ok(GeocoderKind::Yandex),
        "nominatim" | "osm" => Ok(GeocoderKind::Nominatim),
        _ => Err(QuoteError::Configuration {
            key: "geocoder".to_string(),
            reason: format!("unknown geocoder '{}'. Use google, yandex, or nominatim", s),
        }),
    }
}

/// Parse router kind from string
pub fn parse_router_kind(s: &str) -> Result<RouterKind> {
    match s.to_lowercase().as_str() {
        "google" => Ok(RouterKind::Google),
        "osrm" => Ok(RouterKind::Osrm),
        "estimate" => Ok(RouterKind::Estimate),
        _ => Err(QuoteError::Configuration {
            key: "router".to_string(),
            reason: format!("unknown router '{}'. Use google, osrm, or estimate", s),
        }),
    }
}

/// Parse locale from string
pub fn parse_locale(s: &str) -> Result<Locale> {
    match s.to_lowercase().as_str() {
        "en" => Ok(Locale::En),
        "ru" => Ok(Locale::Ru),
        _ => Err(QuoteError::Configuration {
            key: "locale".to_string(),
            reason: format!("unknown locale '{}'. Use en or ru", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = QuoteConfig::with_defaults();
        assert_eq!(config.geocoder.value, GeocoderKind::Nominatim);
        assert_eq!(config.geocoder.source, ConfigSource::Default);
        assert_eq!(config.router.value, RouterKind::Osrm);
        assert_eq!(config.http_timeout_secs.value, 10);
        assert_eq!(config.circuity_factor.value, 1.3);
        assert!(config.fallback_estimate.value);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        value.update(400, ConfigSource::Override);
        assert_eq!(value.value, 400);

        // Lower precedence must not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Override);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
geocoder = "google"
router = "google"
google_api_key = "test-key-123"
http_timeout_secs = 5
fallback_estimate = false
locale = "en"
"#
        )
        .unwrap();

        let config = QuoteConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.geocoder.value, GeocoderKind::Google);
        assert_eq!(config.geocoder.source, ConfigSource::File);
        assert_eq!(config.router.value, RouterKind::Google);
        assert_eq!(config.google_api_key.value.as_deref(), Some("test-key-123"));
        assert_eq!(config.http_timeout_secs.value, 5);
        assert!(!config.fallback_estimate.value);
        assert_eq!(config.locale.value, Locale::En);
    }

    #[test]
    fn test_load_from_bad_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "geocoder = 42").unwrap();
        assert!(QuoteConfig::with_defaults().load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_credential_missing() {
        let config = QuoteConfig::with_defaults();
        assert!(matches!(
            config.google_credential(),
            Err(QuoteError::Configuration { .. })
        ));
    }

    #[test]
    fn test_credential_placeholder_counts_as_missing() {
        let mut config = QuoteConfig::with_defaults();
        config
            .google_api_key
            .update(Some("YOUR_GOOGLE_MAPS_API_KEY_HERE".to_string()), ConfigSource::Override);
        assert!(config.google_credential().is_err());

        config.google_api_key.value = Some("real-key".to_string());
        assert_eq!(config.google_credential().unwrap(), "real-key");
    }

    #[test]
    fn test_is_placeholder() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("   "));
        assert!(is_placeholder("YOUR_YANDEX_API_KEY_HERE"));
        assert!(!is_placeholder("AIzaSyExample"));
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!(parse_geocoder_kind("GOOGLE").unwrap(), GeocoderKind::Google);
        assert_eq!(parse_geocoder_kind("osm").unwrap(), GeocoderKind::Nominatim);
        assert!(parse_geocoder_kind("mapquest").is_err());
        assert_eq!(parse_router_kind("estimate").unwrap(), RouterKind::Estimate);
        assert!(parse_router_kind("teleport").is_err());
        assert_eq!(parse_locale("RU").unwrap(), Locale::Ru);
        assert!(parse_locale("de").is_err());
    }
}
