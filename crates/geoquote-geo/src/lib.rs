//! Geoquote Geo - geometry helpers for the quoting engine
//!
//! Polyline codec, great-circle distances, and conversions between the
//! canonical [`geoquote_core::models::GeoPoint`] and the `geo` crate.

pub mod models;
pub mod polyline;
pub mod spatial;
