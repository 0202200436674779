//! Pricing data types - the stable output contract.
//!
//! Wire names are camelCase (`priceUnit`, `billingNote`, `usageBasedPricing`)
//! so stored extractions stay compatible with callers that persist them as
//! structured blobs. [`RawPricingResponse`] is the loosely-typed shape the
//! model's JSON deserializes into; `pipeline::schema` is the only place its
//! gaps are filled.

use serde::{Deserialize, Serialize};

/// Structured pricing extracted from a single source.
///
/// Invariants after schema normalization: `currency` is always set,
/// `tiers` and `addons` always exist (possibly empty), every tier and
/// addon carries a unique non-empty `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingData {
    /// ISO-style currency code, `"USD"` when the source names none.
    pub currency: String,

    /// Pricing tiers in source order.
    pub tiers: Vec<Tier>,

    /// Optional extras in source order.
    pub addons: Vec<Addon>,

    /// Metered pricing tables, empty when the source has none.
    #[serde(default)]
    pub usage_based_pricing: Vec<UsageMetric>,

    /// Free-text pricing notes (trial terms, discounts, caveats).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A single pricing tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    /// Stable identifier, `tier_<n>` when the model supplied none.
    pub id: String,

    pub name: String,

    /// Price in the detected currency. `None` means custom / contact-sales
    /// pricing, paired with a `custom` price unit.
    #[serde(default)]
    pub price: Option<f64>,

    /// Billing unit. The documented values are `month`, `year`, `one-time`
    /// and `custom`, but whatever the model returned is passed through
    /// unvalidated.
    #[serde(default)]
    pub price_unit: String,

    /// Billing qualifier, e.g. "billed annually, save 20%".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Feature bullets, preserving the source's exact wording.
    #[serde(default)]
    pub features: Vec<String>,

    /// Whether the source marks this the recommended tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
}

/// An optional extra sold alongside the tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    /// Stable identifier, `addon_<n>` when the model supplied none.
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub price_unit: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A named metered-pricing table, e.g. "API Calls".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetric {
    #[serde(default)]
    pub name: String,

    /// Ordered brackets of the metric.
    #[serde(default)]
    pub tiers: Vec<UsageBracket>,
}

/// One bracket of a metered-pricing table. Both sides are free-form
/// descriptions ("0 - 10,000", "$0.001 per call"), not parsed numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageBracket {
    #[serde(default)]
    pub limit: String,

    #[serde(default)]
    pub price: String,
}

/// The pricing object as the model returned it, before normalization.
///
/// Every field defaults so a sparse response still deserializes; ids are
/// optional until `pipeline::schema` assigns them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPricingResponse {
    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub tiers: Vec<RawTier>,

    #[serde(default)]
    pub addons: Vec<RawAddon>,

    #[serde(default)]
    pub usage_based_pricing: Vec<UsageMetric>,

    #[serde(default)]
    pub notes: Option<String>,
}

/// A tier as the model returned it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTier {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub price_unit: String,

    #[serde(default)]
    pub billing_note: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub highlighted: Option<bool>,
}

/// An addon as the model returned it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddon {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub price_unit: String,

    #[serde(default)]
    pub description: Option<String>,
}
