//! AI trait for model invocation.
//!
//! The pipeline needs exactly one model capability: send a prompt, get the
//! raw text back. Implementations wrap a specific provider and map its
//! failures (including timeouts) to `PricingError::ModelInvocation`; the
//! pipeline owns recovering JSON from whatever text comes back.

use async_trait::async_trait;

use crate::error::Result;

/// A text-generation model the pipeline can prompt.
#[async_trait]
pub trait AI: Send + Sync {
    /// Send one prompt and return the model's raw text response.
    ///
    /// The response is free-form: it may be bare JSON, JSON inside a code
    /// fence, or JSON wrapped in prose. Callers run it through
    /// `pipeline::recover::recover_json` rather than parsing directly.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
