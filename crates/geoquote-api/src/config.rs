use std::env;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    /// Optional TOML file feeding the quoting engine's layered config
    pub config_file: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("GEOQUOTE_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(8080);

        let cors_origin =
            env::var("GEOQUOTE_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let config_file = env::var("GEOQUOTE_CONFIG").ok();

        Self {
            port,
            cors_origin,
            config_file,
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
