//! Pricing analysis pipeline - the core of the library.
//!
//! One request moves through a strictly sequential stage chain:
//! acquire (fetch or gate the upload) → extract plain text per format →
//! normalize and bound the text → prompt the model → recover JSON from the
//! response → normalize the schema. Requests are independent; nothing is
//! shared across calls except the HTTP client's connection pool. No stage
//! retries - the caller resubmits the whole request if it wants another
//! attempt.

pub mod acquire;
pub mod extract;
pub mod normalize;
pub mod prompts;
pub mod recover;
pub mod schema;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::{PricingError, Result};
use crate::traits::ai::AI;
use crate::types::pricing::PricingData;
use crate::types::source::{SourceDescriptor, SourceFormat, SourceKind};

pub use acquire::MAX_UPLOAD_BYTES;
pub use extract::{extract_html, extract_text};
pub use normalize::{normalize as normalize_text, MAX_CONTENT_CHARS, TRUNCATION_MARKER};
pub use prompts::{analysis_prompt_hash, format_analysis_prompt, ANALYSIS_PROMPT};
pub use recover::recover_json;
pub use schema::{normalize_pricing, DEFAULT_CURRENCY};

/// Timeouts for the pipeline's two suspension points.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Timeout for the source fetch.
    pub fetch_timeout: Duration,

    /// Timeout for the model invocation.
    pub model_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(30),
            model_timeout: Duration::from_secs(60),
        }
    }
}

impl PipelineConfig {
    /// Create a config with default timeouts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the model timeout.
    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }
}

/// Result of analyzing one pricing source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// The validated pricing data.
    pub pricing_data: PricingData,

    /// The normalized text the model analyzed, for display or storage.
    pub raw_content: String,

    /// Where the content came from.
    #[serde(flatten)]
    pub source: AnalyzedSource,
}

/// The provenance half of an [`Analysis`]: `source` for fetched pages,
/// `sourceFileName` for uploads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnalyzedSource {
    #[serde(rename = "source")]
    Url(String),

    #[serde(rename = "sourceFileName")]
    File(String),
}

/// The pricing analysis pipeline, generic over the model behind it.
///
/// ```rust,ignore
/// use pricing_extraction::{ai::Anthropic, PricingPipeline, SourceDescriptor};
///
/// let pipeline = PricingPipeline::new(Anthropic::from_env()?);
/// let analysis = pipeline
///     .analyze(SourceDescriptor::url("https://vendor.example/pricing"))
///     .await?;
/// ```
pub struct PricingPipeline<M: AI> {
    model: M,
    http: reqwest::Client,
    config: PipelineConfig,
}

impl<M: AI> PricingPipeline<M> {
    /// Create a pipeline with default timeouts.
    pub fn new(model: M) -> Self {
        Self::with_config(model, PipelineConfig::default())
    }

    /// Create a pipeline with explicit timeouts.
    pub fn with_config(model: M, config: PipelineConfig) -> Self {
        let http = acquire::build_client(config.fetch_timeout);
        Self {
            model,
            http,
            config,
        }
    }

    /// The model behind this pipeline.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Analyze a pricing source end to end.
    ///
    /// All-or-nothing: any stage failure surfaces as a single
    /// [`PricingError`] and no partial result is returned. Dropping the
    /// returned future abandons in-flight network operations.
    pub async fn analyze(&self, source: SourceDescriptor) -> Result<Analysis> {
        match source {
            SourceDescriptor::Url { url } => self.analyze_url(&url).await,
            SourceDescriptor::File {
                filename,
                bytes,
                declared_size,
            } => {
                // Size gate runs against the declared size, before any
                // byte is parsed.
                acquire::check_upload_size(declared_size)?;
                self.analyze_file(&filename, &bytes).await
            }
        }
    }

    /// Analyze a pricing source, aborting early if `cancel` fires.
    pub async fn analyze_cancellable(
        &self,
        source: SourceDescriptor,
        cancel: CancellationToken,
    ) -> Result<Analysis> {
        tokio::select! {
            result = self.analyze(source) => result,
            _ = cancel.cancelled() => Err(PricingError::Cancelled),
        }
    }

    /// Analyze a pricing page by URL.
    pub async fn analyze_url(&self, url: &str) -> Result<Analysis> {
        info!(url = %url, "analyzing pricing page");

        let normalized = self.acquire_url(url).await?;
        let pricing_data = self.extract_pricing(&normalized).await?;
        info!(
            url = %url,
            tiers = pricing_data.tiers.len(),
            addons = pricing_data.addons.len(),
            "pricing extracted"
        );

        Ok(Analysis {
            pricing_data,
            raw_content: normalized,
            source: AnalyzedSource::Url(url.to_string()),
        })
    }

    /// Analyze an uploaded pricing document.
    pub async fn analyze_file(&self, filename: &str, bytes: &[u8]) -> Result<Analysis> {
        info!(filename = %filename, size = bytes.len(), "analyzing pricing document");

        let normalized = self.acquire_file(filename, bytes)?;
        let pricing_data = self.extract_pricing(&normalized).await?;
        info!(
            filename = %filename,
            tiers = pricing_data.tiers.len(),
            addons = pricing_data.addons.len(),
            "pricing extracted"
        );

        Ok(Analysis {
            pricing_data,
            raw_content: normalized,
            source: AnalyzedSource::File(filename.to_string()),
        })
    }

    /// Fetch a pricing page and normalize its text, without invoking the
    /// model.
    pub async fn acquire_url(&self, url: &str) -> Result<String> {
        let html = acquire::fetch_page(&self.http, url).await?;
        let text = extract::extract_html(&html);
        let normalized = normalize::normalize(&text, SourceKind::Url)?;
        debug!(chars = normalized.chars().count(), "normalized page content");
        Ok(normalized)
    }

    /// Gate, extract, and normalize an uploaded document, without
    /// invoking the model.
    pub fn acquire_file(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        acquire::check_upload_size(bytes.len() as u64)?;
        let format = SourceFormat::from_filename(filename)?;
        let text = extract::extract_text(format, bytes)?;
        let normalized = normalize::normalize(&text, SourceKind::Document)?;
        debug!(
            format = %format,
            chars = normalized.chars().count(),
            "normalized document content"
        );
        Ok(normalized)
    }

    /// Extract validated pricing data from already-normalized text:
    /// prompt → recover → schema-normalize.
    pub async fn extract_pricing(&self, content: &str) -> Result<PricingData> {
        let prompt = prompts::format_analysis_prompt(content);
        debug!(model = self.model.name(), "prompting model");

        let response = tokio::time::timeout(self.config.model_timeout, self.model.generate(&prompt))
            .await
            .map_err(|_| PricingError::ModelInvocation("model call timed out".into()))??;

        let value = recover::recover_json(&response)?;
        schema::normalize_pricing(value)
    }
}
