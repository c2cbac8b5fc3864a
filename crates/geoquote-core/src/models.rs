//! Domain models for geoquote
//!
//! All types here are transient, per-request values. Nothing is persisted;
//! a quote lives exactly as long as the call that produced it.

pub mod address;
pub mod point;
pub mod quote;
pub mod route;
pub mod tier;

pub use address::{AddressCandidate, AddressKind};
pub use point::GeoPoint;
pub use quote::{LocationInput, LocationRole, PriceQuote};
pub use route::RouteResult;
pub use tier::PricingTier;
