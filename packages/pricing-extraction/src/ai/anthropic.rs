//! Anthropic implementation of the AI trait.
//!
//! A reference implementation against the Messages API.
//!
//! # Example
//!
//! ```rust,ignore
//! use pricing_extraction::ai::Anthropic;
//! use pricing_extraction::PricingPipeline;
//!
//! let model = Anthropic::from_env()?.with_model("claude-3-5-haiku-20241022");
//! let pipeline = PricingPipeline::new(model);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};
use crate::security::SecretString;
use crate::traits::ai::AI;

/// Default chat model.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

const API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client.
#[derive(Clone)]
pub struct Anthropic {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
    max_tokens: u32,
}

impl Anthropic {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("failed to create HTTP client"),
            api_key: SecretString::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 4096,
        }
    }

    /// Create from environment variable `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| PricingError::ModelInvocation("ANTHROPIC_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the output token budget (default: 4096).
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the request timeout (default: 60s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AI for Anthropic {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![ContentInput {
                    kind: "text".to_string(),
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", self.api_key.expose())
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PricingError::ModelInvocation("model call timed out".into())
                } else {
                    PricingError::ModelInvocation(Box::new(e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PricingError::ModelInvocation(
                format!("Anthropic returned {}: {}", status, body).into(),
            ));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| PricingError::ModelInvocation(Box::new(e)))?;

        let text = parsed
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return Err(PricingError::ModelInvocation(
                "Anthropic response missing text content".into(),
            ));
        }

        Ok(text)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

// Request/Response types

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: Vec<ContentInput>,
}

#[derive(Serialize)]
struct ContentInput {
    #[serde(rename = "type")]
    kind: String,
    text: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anthropic_builder() {
        let model = Anthropic::new("sk-ant-test")
            .with_model("claude-3-5-haiku-20241022")
            .with_base_url("https://proxy.internal")
            .with_max_tokens(2048);

        assert_eq!(model.model(), "claude-3-5-haiku-20241022");
        assert_eq!(model.base_url, "https://proxy.internal");
        assert_eq!(model.max_tokens, 2048);
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let model = Anthropic::new("sk-ant-very-secret");
        let debug = format!("{:?}", model.api_key);
        assert!(!debug.contains("sk-ant-very-secret"));
    }

    #[test]
    fn test_response_block_parsing_skips_unknown() {
        let json = r#"{"content":[
            {"type":"text","text":"{\"tiers\":[]}"},
            {"type":"tool_use","id":"x","name":"y","input":{}}
        ]}"#;
        let parsed: MessagesResponse = serde_json::from_str(json).unwrap();
        let texts: Vec<_> = parsed
            .content
            .into_iter()
            .filter_map(|b| match b {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect();
        assert_eq!(texts, vec!["{\"tiers\":[]}".to_string()]);
    }
}
