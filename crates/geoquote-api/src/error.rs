use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geoquote_core::locale::Catalog;
use geoquote_core::QuoteError;
use serde::Serialize;

/// Unified API error type
///
/// `message` is the localized, user-facing text; `details` carries the
/// operator-facing diagnostic and is only attached for server-side
/// failures, never for bad user input.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    /// Map an engine error onto an HTTP status and localized body.
    pub fn from_quote(error: &QuoteError, catalog: &dyn Catalog) -> Self {
        let message = catalog.render(&error.user_message());
        let (status, details) = match error {
            QuoteError::Validation { .. } => (StatusCode::BAD_REQUEST, None),
            QuoteError::AddressNotFound { .. } | QuoteError::RouteNotFound => {
                (StatusCode::NOT_FOUND, None)
            }
            QuoteError::Configuration { .. } | QuoteError::ProviderAuth { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Some(error.to_string()))
            }
            QuoteError::Provider { .. } | QuoteError::PolylineDecode { .. } | QuoteError::Http(_) => {
                (StatusCode::BAD_GATEWAY, Some(error.to_string()))
            }
        };
        Self {
            status,
            message,
            details,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoquote_core::locale::EnCatalog;
    use geoquote_core::models::LocationRole;

    #[test]
    fn test_not_found_has_no_operator_details() {
        let error = QuoteError::AddressNotFound {
            query: "Ftc".to_string(),
            role: LocationRole::Pickup,
        };
        let api = ApiError::from_quote(&error, &EnCatalog);
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert!(api.message.contains("Ftc"));
        assert!(api.details.is_none());
    }

    #[test]
    fn test_configuration_error_keeps_operator_details() {
        let error = QuoteError::Configuration {
            key: "google_api_key".to_string(),
            reason: "credential is not set".to_string(),
        };
        let api = ApiError::from_quote(&error, &EnCatalog);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api.details.as_deref().unwrap_or("").contains("google_api_key"));
    }
}
