//! Geoquote Core - Domain models, pricing engine, configuration, and ports
//!
//! This crate contains the core domain logic and port definitions for the
//! geoquote delivery-price quoting system.

pub mod config;
pub mod error;
pub mod locale;
pub mod models;
pub mod ports;
pub mod pricing;

pub use error::{QuoteError, Result};
