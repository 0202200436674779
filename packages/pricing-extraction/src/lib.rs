//! Pricing Extraction Library
//!
//! Extracts structured pricing data from a vendor's pricing page or
//! uploaded document using an external language model.
//!
//! # Pipeline
//!
//! Source descriptor → content acquisition (HTTP fetch or upload gate) →
//! format-specific text extraction (HTML, PDF, DOCX, XLSX/XLS, TXT/CSV) →
//! whitespace normalization and truncation → model prompt with a fixed
//! instruction set → defensive JSON recovery → schema normalization into
//! a validated [`PricingData`].
//!
//! Each request is independent and stateless; failures are all-or-nothing
//! with a typed [`PricingError`] naming the stage that failed. The model
//! sits behind the [`AI`] trait so tests run against
//! [`testing::MockAI`] instead of the network.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pricing_extraction::{ai::Anthropic, PricingPipeline, SourceDescriptor};
//!
//! let pipeline = PricingPipeline::new(Anthropic::from_env()?);
//!
//! // Analyze a pricing page
//! let analysis = pipeline
//!     .analyze(SourceDescriptor::url("https://vendor.example/pricing"))
//!     .await?;
//!
//! // Analyze an uploaded document
//! let analysis = pipeline.analyze_file("pricing.pdf", &bytes).await?;
//! ```
//!
//! # Modules
//!
//! - [`pipeline`] - the stage chain and the [`PricingPipeline`] entry point
//! - [`types`] - source descriptors and the pricing data contract
//! - [`traits`] - the [`AI`] model abstraction
//! - [`ai`] - model client implementations (Anthropic)
//! - [`security`] - credential handling
//! - [`testing`] - mock implementations for testing

pub mod ai;
pub mod error;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{PipelineStage, PricingError, Result};
pub use traits::ai::AI;
pub use types::{
    pricing::{Addon, PricingData, RawPricingResponse, Tier, UsageBracket, UsageMetric},
    source::{SourceDescriptor, SourceFormat, SourceKind},
};

// Re-export pipeline components
pub use pipeline::{
    analysis_prompt_hash, extract_html, extract_text, format_analysis_prompt, normalize_pricing,
    normalize_text, recover_json, Analysis, AnalyzedSource, PipelineConfig, PricingPipeline,
    ANALYSIS_PROMPT, DEFAULT_CURRENCY, MAX_CONTENT_CHARS, MAX_UPLOAD_BYTES, TRUNCATION_MARKER,
};

// Re-export model clients
pub use ai::Anthropic;

// Re-export security utilities
pub use security::SecretString;
