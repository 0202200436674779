//! Domain data types.

pub mod pricing;
pub mod source;

pub use pricing::{Addon, PricingData, RawAddon, RawPricingResponse, RawTier, Tier, UsageBracket, UsageMetric};
pub use source::{SourceDescriptor, SourceFormat, SourceKind};
