//! Geoquote Pipeline - the price calculation orchestrator
//!
//! Composes a geocoder, a router, and the pricing engine into the one
//! externally consumed operation, plus the address-suggest glue for
//! autocomplete callers.

pub mod pipeline;
pub mod suggest;

pub use pipeline::QuotePipeline;
pub use suggest::suggest;
