//! Localized, user-facing message rendering
//!
//! Errors and pricing explanations lower to a semantic [`UserMessage`]
//! which a [`Catalog`] renders into display text. Operator-facing
//! diagnostics stay on the error's `Display` impl in English; only the
//! text shown to an end customer goes through a catalog. The surrounding
//! product localizes to Russian, so `ru` ships alongside `en`.

use crate::error::QuoteError;
use crate::models::LocationRole;
use serde::{Deserialize, Serialize};

/// Built-in catalog selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Ru,
}

impl Locale {
    pub fn catalog(&self) -> Box<dyn Catalog> {
        match self {
            Locale::En => Box::new(EnCatalog),
            Locale::Ru => Box::new(RuCatalog),
        }
    }
}

/// A semantic message, independent of wording and language.
#[derive(Debug, Clone, PartialEq)]
pub enum UserMessage {
    /// Service-side misconfiguration; the end user cannot fix this
    Misconfigured { key: String },
    /// The provider rejected the configured credential
    AuthRejected { provider: String },
    /// The provider failed in a way the user may retry later
    ProviderDown { message: String },
    /// No road connects the two points
    RouteNotFound,
    AddressNotFound { query: String, role: LocationRole },
    InvalidInput { reason: String },
    TierMatched { distance_km: f64, range: String, price: f64 },
    TierOverflow { distance_km: f64, range: String, price: f64 },
    NoTierMatched,
    /// Marker prefixed to explanations built from estimated distances
    EstimateNote,
}

/// Renders semantic messages into one language.
///
/// Implement this to plug in another language or to restyle the built-in
/// wording; the engine never hard-codes display strings.
pub trait Catalog: Send + Sync {
    fn render(&self, message: &UserMessage) -> String;
}

impl QuoteError {
    /// Lower an error to its user-facing message.
    pub fn user_message(&self) -> UserMessage {
        match self {
            QuoteError::Configuration { key, .. } => {
                UserMessage::Misconfigured { key: key.clone() }
            }
            QuoteError::Validation { reason } => {
                UserMessage::InvalidInput { reason: reason.clone() }
            }
            QuoteError::Provider { message, .. } => {
                UserMessage::ProviderDown { message: message.clone() }
            }
            QuoteError::ProviderAuth { provider, .. } => {
                UserMessage::AuthRejected { provider: provider.clone() }
            }
            QuoteError::RouteNotFound => UserMessage::RouteNotFound,
            QuoteError::AddressNotFound { query, role } => UserMessage::AddressNotFound {
                query: query.clone(),
                role: *role,
            },
            QuoteError::PolylineDecode { .. } => UserMessage::ProviderDown {
                message: "invalid route geometry".to_string(),
            },
            QuoteError::Http(e) => UserMessage::ProviderDown { message: e.to_string() },
        }
    }
}

/// Format a number for display: whole values without a fraction, anything
/// else with two decimals. Keeps "13" and "4.2" out of "13.00"/"4.20".
pub fn format_number(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// English catalog.
pub struct EnCatalog;

impl Catalog for EnCatalog {
    fn render(&self, message: &UserMessage) -> String {
        match message {
            UserMessage::Misconfigured { key } => format!(
                "The delivery service is misconfigured ({}). Ask the service operator to fix the setup.",
                key
            ),
            UserMessage::AuthRejected { provider } => format!(
                "The {} API rejected the configured key. Ask the operator to check the key and its API permissions.",
                provider
            ),
            UserMessage::ProviderDown { message } => format!(
                "The mapping service returned an error: {}. Please try again later.",
                message
            ),
            UserMessage::RouteNotFound => "No driving route was found. The points may have \
                no connecting road; please pick different addresses."
                .to_string(),
            UserMessage::AddressNotFound { query, role } => {
                let side = match role {
                    LocationRole::Pickup => "pickup",
                    LocationRole::Dropoff => "drop-off",
                };
                format!("Nothing was found for the {} address \"{}\". Refine the query and try again.", side, query)
            }
            UserMessage::InvalidInput { reason } => format!("Invalid input: {}.", reason),
            UserMessage::TierMatched { distance_km, range, price } => format!(
                "The distance of {} km falls in the \"{}\" tier, so the delivery costs {}.",
                format_number(*distance_km),
                range,
                format_number(*price)
            ),
            UserMessage::TierOverflow { distance_km, range, price } => format!(
                "The distance of {} km exceeds the highest configured tier; the \"{}\" price of {} applies.",
                format_number(*distance_km),
                range,
                format_number(*price)
            ),
            UserMessage::NoTierMatched => {
                "No applicable pricing tier was found for this distance.".to_string()
            }
            UserMessage::EstimateNote => "(estimated)".to_string(),
        }
    }
}

/// Russian catalog, wording carried over from the production UI.
pub struct RuCatalog;

impl Catalog for RuCatalog {
    fn render(&self, message: &UserMessage) -> String {
        match message {
            UserMessage::Misconfigured { key } => format!(
                "Сервис доставки настроен неверно ({}). Обратитесь к оператору сервиса.",
                key
            ),
            UserMessage::AuthRejected { provider } => format!(
                "API {} отклонил настроенный ключ. Попросите оператора проверить ключ и его права доступа.",
                provider
            ),
            UserMessage::ProviderDown { message } => format!(
                "Сервис карт вернул ошибку: {}. Пожалуйста, попробуйте позже.",
                message
            ),
            UserMessage::RouteNotFound => "Маршрут не найден. Возможно, между точками нет \
                автомобильной дороги. Пожалуйста, выберите другие адреса."
                .to_string(),
            UserMessage::AddressNotFound { query, role } => {
                let side = match role {
                    LocationRole::Pickup => "адресу отправления",
                    LocationRole::Dropoff => "адресу доставки",
                };
                format!("По {} «{}» ничего не найдено. Уточните запрос и попробуйте снова.", side, query)
            }
            UserMessage::InvalidInput { reason } => format!("Некорректный запрос: {}.", reason),
            UserMessage::TierMatched { distance_km, range, price } => format!(
                "Расстояние {} км соответствует тарифу «{}», поэтому стоимость составляет {} руб.",
                format_number(*distance_km),
                range,
                format_number(*price)
            ),
            UserMessage::TierOverflow { distance_km, range, price } => format!(
                "Расстояние {} км превышает максимальный тариф, применяется цена «{}»: {} руб.",
                format_number(*distance_km),
                range,
                format_number(*price)
            ),
            UserMessage::NoTierMatched => {
                "Для данного расстояния не найден подходящий тариф.".to_string()
            }
            UserMessage::EstimateNote => "(приблизительно)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_trims() {
        assert_eq!(format_number(13.0), "13");
        assert_eq!(format_number(4.2), "4.2");
        assert_eq!(format_number(4.25), "4.25");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_tier_matched_mentions_range() {
        let msg = UserMessage::TierMatched {
            distance_km: 4.2,
            range: "3-5".to_string(),
            price: 20.0,
        };
        assert!(EnCatalog.render(&msg).contains("3-5"));
        assert!(RuCatalog.render(&msg).contains("3-5"));
        assert!(RuCatalog.render(&msg).contains("20 руб"));
    }

    #[test]
    fn test_address_not_found_names_query() {
        let err = QuoteError::AddressNotFound {
            query: "Ftc".to_string(),
            role: LocationRole::Pickup,
        };
        let rendered = EnCatalog.render(&err.user_message());
        assert!(rendered.contains("Ftc"));
        assert!(rendered.contains("pickup"));
    }

    #[test]
    fn test_locale_default_is_ru() {
        assert_eq!(Locale::default(), Locale::Ru);
    }
}
