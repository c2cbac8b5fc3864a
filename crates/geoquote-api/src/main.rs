use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use geoquote_core::config::QuoteConfig;
use geoquote_providers::{build_geocoder, build_router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geoquote_api::config::ApiConfig;
use geoquote_api::router::create_router;
use geoquote_api::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoquote_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::from_env();

    let quote_config = match load_quote_config(&api_config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = api_config.port,
        geocoder = ?quote_config.geocoder.value,
        router = ?quote_config.router.value,
        locale = ?quote_config.locale.value,
        "Starting geoquote API server"
    );

    let geocoder = match build_geocoder(&quote_config) {
        Ok(geocoder) => geocoder,
        Err(e) => {
            tracing::error!("Failed to build geocoder: {}", e);
            tracing::error!(
                "Remediation:\n\
                1. Check GEOQUOTE_GEOCODER (google, yandex, or nominatim)\n\
                2. For keyed providers, set GEOQUOTE_GOOGLE_API_KEY or GEOQUOTE_YANDEX_API_KEY\n\
                3. Placeholder keys from setup templates count as missing"
            );
            std::process::exit(1);
        }
    };

    let router = match build_router(&quote_config) {
        Ok(router) => router,
        Err(e) => {
            tracing::error!("Failed to build router: {}", e);
            tracing::error!(
                "Remediation:\n\
                1. Check GEOQUOTE_ROUTER (google, osrm, or estimate)\n\
                2. Provide the routing credential, or\n\
                3. Set GEOQUOTE_FALLBACK_ESTIMATE=true to quote straight-line estimates"
            );
            std::process::exit(1);
        }
    };

    let catalog: Arc<dyn geoquote_core::locale::Catalog> =
        Arc::from(quote_config.locale.value.catalog());

    let state = Arc::new(AppState::new(geocoder, router, catalog));

    let cors = CorsLayer::new()
        .allow_origin(api_config.cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(state).layer(TraceLayer::new_for_http()).layer(cors);

    let addr = api_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", api_config.cors_origin);

    axum::serve(listener, app).await.unwrap();
}

/// Layered config: defaults, then the optional TOML file, then environment.
fn load_quote_config(api_config: &ApiConfig) -> geoquote_core::Result<QuoteConfig> {
    let mut config = QuoteConfig::with_defaults();
    if let Some(path) = &api_config.config_file {
        tracing::info!(path = %path, "Loading config file");
        config = config.load_from_file(path)?;
    }
    Ok(config.load_from_env())
}
