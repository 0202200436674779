//! The fixed instruction prompt for pricing analysis.

use sha2::{Digest, Sha256};

/// Instruction prompt sent ahead of the page/document content.
///
/// The JSON shape described here is the wire form of
/// [`crate::types::pricing::PricingData`]; keep the two in sync.
pub const ANALYSIS_PROMPT: &str = r#"You are an expert pricing analyst. Your task is to analyze pricing page content and extract ALL pricing information into a precise, structured format.

CRITICAL INSTRUCTIONS:
1. Extract EVERY pricing tier you find (Free, Starter, Basic, Pro, Business, Enterprise, etc.)
2. For each tier, capture ALL features listed - don't miss any
3. If a price shows "Contact Sales", "Custom", or "Get a Quote", set price to null and priceUnit to "custom"
4. Look carefully for:
   - Add-ons and optional extras
   - Usage-based or metered pricing
   - Volume discounts
   - Annual vs monthly pricing differences
5. Preserve exact feature wording from the source
6. Note any billing terms, trial periods, or special offers
7. Identify the currency (USD, EUR, GBP, INR, etc.)

Return ONLY a valid JSON object with this exact structure:

{
  "tiers": [
    {
      "id": "tier_1",
      "name": "Tier Name",
      "price": 99,
      "priceUnit": "month",
      "billingNote": "billed annually, save 20%",
      "description": "Short description of target audience",
      "features": [
        "Feature 1",
        "Feature 2",
        "Feature 3"
      ],
      "highlighted": false
    }
  ],
  "addons": [
    {
      "id": "addon_1",
      "name": "Add-on Name",
      "price": 10,
      "priceUnit": "per user/month",
      "description": "Optional description"
    }
  ],
  "usageBasedPricing": [
    {
      "name": "Metric Name (e.g., API Calls)",
      "tiers": [
        { "limit": "0 - 10,000", "price": "Free" },
        { "limit": "10,001 - 100,000", "price": "$0.001 per call" }
      ]
    }
  ],
  "notes": "Any important pricing notes, trial info, or terms",
  "currency": "USD"
}

RULES:
- "price" must be a number or null (for custom pricing)
- "priceUnit" must be one of: "month", "year", "one-time", "custom"
- "highlighted" should be true for the "recommended" or "most popular" tier
- If a section doesn't apply, use an empty array []
- Generate unique IDs for tiers and addons (tier_1, tier_2, addon_1, etc.)
- Return ONLY the JSON object, no markdown formatting, no explanations"#;

/// Combine the instruction prompt with normalized source content.
pub fn format_analysis_prompt(content: &str) -> String {
    format!(
        "{}\n\nPRICING CONTENT TO ANALYZE:\n---\n{}\n---\n\nReturn the JSON object:",
        ANALYSIS_PROMPT, content
    )
}

/// SHA-256 of the instruction prompt, for callers that cache stored
/// extractions and need to invalidate them when the prompt changes.
pub fn analysis_prompt_hash() -> String {
    let mut hasher = Sha256::new();
    hasher.update(ANALYSIS_PROMPT.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_hash_is_consistent() {
        let hash1 = analysis_prompt_hash();
        let hash2 = analysis_prompt_hash();
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64); // SHA-256 hex
    }

    #[test]
    fn test_format_analysis_prompt() {
        let formatted = format_analysis_prompt("Pro plan: $49/month");
        assert!(formatted.starts_with(ANALYSIS_PROMPT));
        assert!(formatted.contains("Pro plan: $49/month"));
        assert!(formatted.ends_with("Return the JSON object:"));
    }

    #[test]
    fn test_prompt_documents_custom_pricing_rule() {
        assert!(ANALYSIS_PROMPT.contains(r#"set price to null and priceUnit to "custom""#));
        assert!(ANALYSIS_PROMPT.contains("usageBasedPricing"));
    }
}
