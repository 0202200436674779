//! Schema normalization - the single place defaults are filled.
//!
//! Takes the recovered JSON value and produces a `PricingData` that always
//! satisfies the output invariants: sequences exist, currency is set,
//! every tier and addon has an id. Pure data massaging; the only failure
//! is input that is not a pricing object at all.

use serde_json::Value;
use tracing::debug;

use crate::error::{PricingError, Result};
use crate::types::pricing::{Addon, PricingData, RawAddon, RawPricingResponse, RawTier, Tier};

/// Currency assumed when the model detected none.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Normalize a recovered JSON value into validated pricing data.
///
/// Missing sequences default to empty, a missing or blank currency
/// becomes [`DEFAULT_CURRENCY`], and tiers/addons without ids are assigned
/// `tier_<n>` / `addon_<n>` by position. Model-supplied ids are preserved
/// as-is and never deduplicated, even when they collide with the
/// generated pattern. `priceUnit` strings pass through unvalidated.
pub fn normalize_pricing(value: Value) -> Result<PricingData> {
    if !value.is_object() {
        return Err(PricingError::InvalidPricingShape);
    }

    let raw: RawPricingResponse = serde_json::from_value(value).map_err(|e| {
        debug!(error = %e, "recovered object does not fit the pricing shape");
        PricingError::InvalidPricingShape
    })?;

    let currency = match raw.currency {
        Some(currency) if !currency.trim().is_empty() => currency,
        _ => DEFAULT_CURRENCY.to_string(),
    };

    let tiers = raw
        .tiers
        .into_iter()
        .enumerate()
        .map(|(index, tier)| finish_tier(tier, index))
        .collect();

    let addons = raw
        .addons
        .into_iter()
        .enumerate()
        .map(|(index, addon)| finish_addon(addon, index))
        .collect();

    Ok(PricingData {
        currency,
        tiers,
        addons,
        usage_based_pricing: raw.usage_based_pricing,
        notes: raw.notes,
    })
}

fn finish_tier(raw: RawTier, index: usize) -> Tier {
    Tier {
        id: assign_id(raw.id, "tier", index),
        name: raw.name,
        price: raw.price,
        price_unit: raw.price_unit,
        billing_note: raw.billing_note,
        description: raw.description,
        features: raw.features,
        highlighted: raw.highlighted,
    }
}

fn finish_addon(raw: RawAddon, index: usize) -> Addon {
    Addon {
        id: assign_id(raw.id, "addon", index),
        name: raw.name,
        price: raw.price,
        price_unit: raw.price_unit,
        description: raw.description,
    }
}

fn assign_id(id: Option<String>, prefix: &str, index: usize) -> String {
    match id {
        Some(id) if !id.trim().is_empty() => id,
        _ => format!("{}_{}", prefix, index + 1),
    }
}
