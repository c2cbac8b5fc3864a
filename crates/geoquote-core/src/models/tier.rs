use serde::{Deserialize, Serialize};

/// An admin-configured distance range mapped to a flat price.
///
/// `range` uses a small grammar: `"0-3"` (inclusive interval), `"10+"`
/// (open-ended), or `"5"` (single value), optionally with whitespace and a
/// `km`/`км` unit suffix. Tiers arrive from admin configuration and are
/// not required to be sorted or non-overlapping; the pricing engine sorts
/// and disambiguates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub range: String,
    pub price: f64,
}

impl PricingTier {
    pub fn new(range: impl Into<String>, price: f64) -> Self {
        Self { range: range.into(), price }
    }
}
