//! Config-driven adapter construction.

use crate::estimate::StraightLineRouter;
use crate::google::{GoogleGeocoder, GoogleRouter};
use crate::http;
use crate::osm::{NominatimGeocoder, OsrmRouter};
use crate::yandex::YandexGeocoder;
use geoquote_core::config::{GeocoderKind, QuoteConfig, RouterKind};
use geoquote_core::error::Result;
use geoquote_core::locale::Locale;
use geoquote_core::ports::{Geocoder, Router};
use std::sync::Arc;
use std::time::Duration;

const NOMINATIM_USER_AGENT: &str = concat!("geoquote/", env!("CARGO_PKG_VERSION"));

fn provider_language(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "en",
        Locale::Ru => "ru",
    }
}

/// Build the configured geocoder.
///
/// Key-requiring providers fail here, not at first request, when the
/// credential is missing or still a placeholder.
pub fn build_geocoder(config: &QuoteConfig) -> Result<Arc<dyn Geocoder>> {
    let timeout = Duration::from_secs(config.http_timeout_secs.value);
    let language = provider_language(config.locale.value);

    let geocoder: Arc<dyn Geocoder> = match config.geocoder.value {
        GeocoderKind::Google => {
            let key = config.google_credential()?;
            Arc::new(GoogleGeocoder::new(http::build_client(timeout)?, key, language))
        }
        GeocoderKind::Yandex => {
            let key = config.yandex_credential()?;
            Arc::new(YandexGeocoder::new(http::build_client(timeout)?, key, language))
        }
        GeocoderKind::Nominatim => Arc::new(NominatimGeocoder::new(
            http::build_client_with_agent(timeout, NOMINATIM_USER_AGENT)?,
            config.nominatim_base_url.value.clone(),
            language,
        )),
    };

    tracing::info!(geocoder = ?config.geocoder.value, "geocoder ready");
    Ok(geocoder)
}

/// Build the configured router.
///
/// When the selected router needs a credential that is absent and
/// `fallback_estimate` is on, the straight-line estimator is substituted
/// instead of failing; quotes produced through it carry the estimate flag.
pub fn build_router(config: &QuoteConfig) -> Result<Arc<dyn Router>> {
    let timeout = Duration::from_secs(config.http_timeout_secs.value);
    let circuity = config.circuity_factor.value;

    let router: Arc<dyn Router> = match config.router.value {
        RouterKind::Google => match config.google_credential() {
            Ok(key) => {
                let language = provider_language(config.locale.value);
                Arc::new(GoogleRouter::new(http::build_client(timeout)?, key, language))
            }
            Err(error) if config.fallback_estimate.value => {
                tracing::warn!(%error, "routing credential unavailable, using straight-line estimates");
                Arc::new(StraightLineRouter::new(circuity))
            }
            Err(error) => return Err(error),
        },
        RouterKind::Osrm => Arc::new(OsrmRouter::new(
            http::build_client(timeout)?,
            config.osrm_base_url.value.clone(),
        )),
        RouterKind::Estimate => Arc::new(StraightLineRouter::new(circuity)),
    };

    tracing::info!(router = ?config.router.value, "router ready");
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoquote_core::config::ConfigSource;
    use geoquote_core::error::QuoteError;

    #[test]
    fn test_default_config_builds_keyless_stack() {
        let config = QuoteConfig::with_defaults();
        assert!(build_geocoder(&config).is_ok());
        assert!(build_router(&config).is_ok());
    }

    #[test]
    fn test_google_geocoder_requires_credential() {
        let mut config = QuoteConfig::with_defaults();
        config.geocoder.update(GeocoderKind::Google, ConfigSource::Override);
        assert!(matches!(
            build_geocoder(&config),
            Err(QuoteError::Configuration { .. })
        ));
    }

    #[test]
    fn test_google_router_falls_back_without_credential() {
        let mut config = QuoteConfig::with_defaults();
        config.router.update(RouterKind::Google, ConfigSource::Override);
        // fallback_estimate defaults to true
        assert!(build_router(&config).is_ok());
    }

    #[test]
    fn test_google_router_errors_when_fallback_disabled() {
        let mut config = QuoteConfig::with_defaults();
        config.router.update(RouterKind::Google, ConfigSource::Override);
        config.fallback_estimate.update(false, ConfigSource::Override);
        assert!(matches!(
            build_router(&config),
            Err(QuoteError::Configuration { .. })
        ));
    }

    #[test]
    fn test_placeholder_key_behaves_like_missing() {
        let mut config = QuoteConfig::with_defaults();
        config.router.update(RouterKind::Google, ConfigSource::Override);
        config.fallback_estimate.update(false, ConfigSource::Override);
        config
            .google_api_key
            .update(Some("YOUR_GOOGLE_MAPS_API_KEY_HERE".to_string()), ConfigSource::Override);
        assert!(build_router(&config).is_err());
    }
}
