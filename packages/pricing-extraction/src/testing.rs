//! Testing utilities including mock implementations.
//!
//! Useful for testing applications that use the pipeline without making
//! real model or network calls.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{PricingError, Result};
use crate::traits::ai::AI;

/// Response returned when nothing is scripted: a minimal valid pricing
/// object.
pub const DEFAULT_MOCK_RESPONSE: &str =
    r#"{"tiers":[],"addons":[],"usageBasedPricing":[],"currency":"USD"}"#;

/// A mock model for testing.
///
/// Returns scripted responses in order (falling back to
/// [`DEFAULT_MOCK_RESPONSE`]), optionally fails every call, optionally
/// delays to make timeout and cancellation paths deterministic, and
/// records every prompt it receives for assertions.
#[derive(Default)]
pub struct MockAI {
    responses: Arc<RwLock<VecDeque<String>>>,
    failure: Arc<RwLock<Option<String>>>,
    delay: Option<Duration>,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockAI {
    /// Create a mock that answers with [`DEFAULT_MOCK_RESPONSE`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a scripted response. Responses are consumed in order.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.write().unwrap().push_back(response.into());
        self
    }

    /// Make every call fail with a `ModelInvocation` error.
    pub fn failing(self, reason: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(reason.into());
        self
    }

    /// Sleep before answering, to exercise timeout/cancellation paths.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    /// Number of calls made to this mock.
    pub fn call_count(&self) -> usize {
        self.prompts.read().unwrap().len()
    }
}

#[async_trait]
impl AI for MockAI {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.prompts.write().unwrap().push(prompt.to_string());

        if let Some(reason) = self.failure.read().unwrap().clone() {
            return Err(PricingError::ModelInvocation(reason.into()));
        }

        Ok(self
            .responses
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| DEFAULT_MOCK_RESPONSE.to_string()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_scripted_responses_in_order() {
        let mock = MockAI::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(mock.generate("p1").await.unwrap(), "first");
        assert_eq!(mock.generate("p2").await.unwrap(), "second");
        assert_eq!(mock.generate("p3").await.unwrap(), DEFAULT_MOCK_RESPONSE);
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_records_prompts() {
        let mock = MockAI::new();
        mock.generate("analyze this").await.unwrap();

        let prompts = mock.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("analyze this"));
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let mock = MockAI::new().failing("service unavailable");
        let err = mock.generate("prompt").await.unwrap_err();
        assert!(matches!(err, PricingError::ModelInvocation(_)));
        assert!(err.to_string().contains("service unavailable"));
    }
}
