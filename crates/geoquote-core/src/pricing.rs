//! Tiered pricing engine
//!
//! Maps a route distance onto admin-configured distance tiers. Tiers may
//! arrive unsorted and overlapping; the engine sorts by interval minimum
//! and the first match wins. A distance beyond every tier resolves to the
//! highest tier (overflow policy); an empty tier list degrades to a zero
//! price rather than an error.

use crate::error::{QuoteError, Result};
use crate::locale::{Catalog, UserMessage};
use crate::models::PricingTier;

/// Parsed bounds of a tier range, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierBounds {
    pub min: f64,
    pub max: f64,
}

impl TierBounds {
    pub fn contains(&self, distance_km: f64) -> bool {
        distance_km >= self.min && distance_km <= self.max
    }
}

/// Price and explanation for one distance, before route metadata is
/// attached by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub price: f64,
    pub explanation: String,
    /// The `range` string of the tier that was applied, if any
    pub matched_range: Option<String>,
}

/// Round to two decimal places. Applied once, before both matching and
/// display, so a distance never shows as "3.00 km" while being excluded
/// from a "0-3" tier.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a tier range string into bounds.
///
/// Grammar: `"N-M"` is the inclusive interval, `"N+"` is open-ended, a
/// bare `"N"` means min == max. Whitespace and a `km`/`км` unit suffix are
/// stripped first. Anything else is a configuration error; bounds are
/// never silently NaN.
pub fn parse_range(range: &str) -> Result<TierBounds> {
    let cleaned: String = range
        .to_lowercase()
        .replace("km", "")
        .replace("км", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let malformed = || QuoteError::Configuration {
        key: "pricing.tiers".to_string(),
        reason: format!("unparsable tier range {:?}", range),
    };

    let bounds = if let Some(min_str) = cleaned.strip_suffix('+') {
        let min = min_str.parse::<f64>().map_err(|_| malformed())?;
        TierBounds { min, max: f64::INFINITY }
    } else if let Some((min_str, max_str)) = cleaned.split_once('-') {
        let min = min_str.parse::<f64>().map_err(|_| malformed())?;
        let max = max_str.parse::<f64>().map_err(|_| malformed())?;
        TierBounds { min, max }
    } else {
        let value = cleaned.parse::<f64>().map_err(|_| malformed())?;
        TierBounds { min: value, max: value }
    };

    if !bounds.min.is_finite() || bounds.max.is_nan() || bounds.min > bounds.max {
        return Err(malformed());
    }
    Ok(bounds)
}

/// Validate a tier list at configuration-save time, before it can reach a
/// price calculation. Overlapping tiers are tolerated at runtime, so this
/// only rejects ranges the engine could not price at all.
pub fn validate_tiers(tiers: &[PricingTier]) -> Result<()> {
    for tier in tiers {
        parse_range(&tier.range)?;
        if !tier.price.is_finite() || tier.price < 0.0 {
            return Err(QuoteError::Configuration {
                key: "pricing.tiers".to_string(),
                reason: format!("invalid price {} for range {:?}", tier.price, tier.range),
            });
        }
    }
    Ok(())
}

/// Compute the price for a distance against a tier list.
///
/// Total for every distance >= 0 and syntactically valid tier list: the
/// result is always a defined price, never a panic.
pub fn price(
    distance_km: f64,
    tiers: &[PricingTier],
    catalog: &dyn Catalog,
) -> Result<PriceBreakdown> {
    let distance_km = round2(distance_km);

    let mut parsed: Vec<(TierBounds, &PricingTier)> = tiers
        .iter()
        .map(|tier| parse_range(&tier.range).map(|bounds| (bounds, tier)))
        .collect::<Result<_>>()?;

    // Ascending by interval minimum; ties keep definition order, so the
    // smallest-min tier wins when admin-supplied ranges overlap.
    parsed.sort_by(|a, b| a.0.min.total_cmp(&b.0.min));

    if let Some((_, tier)) = parsed.iter().find(|(bounds, _)| bounds.contains(distance_km)) {
        return Ok(PriceBreakdown {
            price: tier.price,
            explanation: catalog.render(&UserMessage::TierMatched {
                distance_km,
                range: tier.range.clone(),
                price: tier.price,
            }),
            matched_range: Some(tier.range.clone()),
        });
    }

    // Overflow: beyond every configured interval, the highest tier applies.
    if let Some((_, tier)) = parsed.last() {
        return Ok(PriceBreakdown {
            price: tier.price,
            explanation: catalog.render(&UserMessage::TierOverflow {
                distance_km,
                range: tier.range.clone(),
                price: tier.price,
            }),
            matched_range: Some(tier.range.clone()),
        });
    }

    tracing::warn!(distance_km, "no pricing tiers configured, quoting zero");
    Ok(PriceBreakdown {
        price: 0.0,
        explanation: catalog.render(&UserMessage::NoTierMatched),
        matched_range: None,
    })
}
