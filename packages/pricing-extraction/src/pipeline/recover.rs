//! JSON recovery - dig the pricing object out of a free-form model response.
//!
//! Models asked for "ONLY a valid JSON object" still wrap their answer in
//! prose or code fences often enough that parsing must be defensive. The
//! strategies are independent and ordered; the first to yield JSON wins.

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::{PricingError, Result};

/// How much of an unparseable response to keep for diagnostics.
const SAMPLE_CHARS: usize = 240;

/// Recover a JSON value from a raw model response.
///
/// Attempts, in order: the whole response as JSON, the interior of the
/// first triple-backtick fence (optionally tagged `json`), and the span
/// from the first `{` to the last `}`. If none parse, fails with
/// `ModelResponseUnparseable` carrying a truncated sample of the response.
pub fn recover_json(response: &str) -> Result<Value> {
    let strategies: [fn(&str) -> Option<Value>; 3] =
        [parse_direct, parse_fenced_block, parse_brace_span];

    for strategy in strategies {
        if let Some(value) = strategy(response) {
            return Ok(value);
        }
    }

    debug!(
        response_chars = response.chars().count(),
        "no recovery strategy matched model response"
    );
    Err(PricingError::ModelResponseUnparseable {
        sample: response.chars().take(SAMPLE_CHARS).collect(),
    })
}

fn parse_direct(response: &str) -> Option<Value> {
    serde_json::from_str(response.trim()).ok()
}

fn parse_fenced_block(response: &str) -> Option<Value> {
    let fence = Regex::new(r"(?s)```(?:json)?\s*(.*?)```").ok()?;
    let interior = fence.captures(response)?.get(1)?.as_str();
    serde_json::from_str(interior.trim()).ok()
}

fn parse_brace_span(response: &str) -> Option<Value> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&response[start..=end]).ok()
}
