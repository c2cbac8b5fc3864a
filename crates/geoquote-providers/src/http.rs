//! Shared HTTP client construction.

use geoquote_core::error::Result;
use std::time::Duration;

/// Build a client with a finite request timeout. A hung provider must
/// never block a caller indefinitely.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(client)
}

/// Build a client that also sends a User-Agent, required by providers
/// with usage policies (Nominatim).
pub fn build_client_with_agent(timeout: Duration, user_agent: &str) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}
