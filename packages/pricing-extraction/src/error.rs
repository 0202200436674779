//! Typed errors for the pricing extraction pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Every variant maps to the
//! pipeline stage that produced it via [`PricingError::stage`], so callers
//! can render a `Failed(<stage>, <reason>)` terminal state without string
//! matching.

use std::fmt;

use thiserror::Error;

use crate::types::source::SourceFormat;

/// Errors that can occur while analyzing a pricing source.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Uploaded file exceeds the size ceiling, checked before any parsing
    #[error("file is {size} bytes, above the {limit} byte upload limit")]
    PayloadTooLarge { size: u64, limit: u64 },

    /// File extension is not in the accepted set
    #[error("unsupported file type {extension:?}: upload a PDF, DOCX, XLSX/XLS, TXT, or CSV file instead")]
    UnsupportedFormat { extension: String },

    /// URL did not parse as a well-formed absolute URL
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// HTTP fetch failed; `status` carries the upstream status code when
    /// the server answered at all
    #[error("failed to fetch {url}: {reason}")]
    Fetch {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// Fetch did not complete within the configured timeout
    #[error("timed out fetching {url}")]
    FetchTimeout { url: String },

    /// Format-specific parse failure (malformed or encrypted input)
    #[error("could not parse {format}")]
    Extraction { format: SourceFormat },

    /// Too little text survived normalization to be meaningful pricing
    /// content; the model is never invoked for such input
    #[error("could not extract sufficient text ({length} chars, need at least {minimum})")]
    InsufficientContent { length: usize, minimum: usize },

    /// The external model call itself failed or timed out
    #[error("model invocation failed: {0}")]
    ModelInvocation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// None of the JSON recovery strategies succeeded; `sample` holds a
    /// truncated slice of the raw response for diagnostics
    #[error("could not recover JSON from model response: {sample:?}")]
    ModelResponseUnparseable { sample: String },

    /// Recovered JSON is not a pricing object
    #[error("model response is not a pricing object")]
    InvalidPricingShape,

    /// Operation was cancelled
    #[error("operation cancelled")]
    Cancelled,
}

impl PricingError {
    /// The pipeline stage this error terminates, or `None` for
    /// cancellation (which can land between any two stages).
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            Self::PayloadTooLarge { .. } | Self::InvalidUrl { .. } => Some(PipelineStage::Acquiring),
            Self::Fetch { .. } | Self::FetchTimeout { .. } => Some(PipelineStage::Acquiring),
            Self::UnsupportedFormat { .. } | Self::Extraction { .. } => {
                Some(PipelineStage::Extracting)
            }
            Self::InsufficientContent { .. } => Some(PipelineStage::Normalizing),
            Self::ModelInvocation(_) => Some(PipelineStage::Prompting),
            Self::ModelResponseUnparseable { .. } => Some(PipelineStage::Recovering),
            Self::InvalidPricingShape => Some(PipelineStage::Validating),
            Self::Cancelled => None,
        }
    }
}

/// Stages of the per-request state machine.
///
/// A request moves `Acquiring → Extracting → Normalizing → Prompting →
/// Recovering → Validating` and terminates either validated or failed at
/// the stage reported by [`PricingError::stage`]. No stage retries
/// automatically; the caller resubmits the whole request if desired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Acquiring,
    Extracting,
    Normalizing,
    Prompting,
    Recovering,
    Validating,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Acquiring => "acquiring",
            Self::Extracting => "extracting",
            Self::Normalizing => "normalizing",
            Self::Prompting => "prompting",
            Self::Recovering => "recovering",
            Self::Validating => "validating",
        };
        f.write_str(name)
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PricingError>;
