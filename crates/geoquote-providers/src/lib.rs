//! Geoquote Providers - concrete geocoder and router adapters
//!
//! One adapter per provider, each normalizing its wire format (including
//! its coordinate order) into the canonical models at the boundary.
//! Selection happens through [`factory`] from a
//! [`geoquote_core::config::QuoteConfig`].

pub mod estimate;
pub mod factory;
pub mod google;
pub mod http;
pub mod osm;
pub mod yandex;

pub use estimate::StraightLineRouter;
pub use factory::{build_geocoder, build_router};
pub use google::{GoogleGeocoder, GoogleRouter};
pub use osm::{NominatimGeocoder, OsrmRouter};
pub use yandex::YandexGeocoder;
