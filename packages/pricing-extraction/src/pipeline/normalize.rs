//! Text normalization - bound extracted text before it reaches the model.

use tracing::debug;

use crate::error::{PricingError, Result};
use crate::types::source::SourceKind;

/// Maximum characters passed to the model (roughly 4k tokens).
pub const MAX_CONTENT_CHARS: usize = 15_000;

/// Appended when content was truncated. Not counted toward the limit:
/// truncate first, then append.
pub const TRUNCATION_MARKER: &str = "...";

/// Normalize extracted text into the bounded form sent to the model.
///
/// Collapses every whitespace run (including newlines) to a single space,
/// trims, truncates to [`MAX_CONTENT_CHARS`] characters with the marker
/// appended, and rejects input whose normalized length falls below the
/// source kind's minimum - pages and documents that short are not
/// meaningful pricing content and the model is never invoked for them.
pub fn normalize(text: &str, kind: SourceKind) -> Result<String> {
    let collapsed = collapse_whitespace(text);
    let bounded = truncate(collapsed);

    let length = bounded.chars().count();
    let minimum = kind.min_chars();
    if length < minimum {
        debug!(length, minimum, "normalized content below minimum");
        return Err(PricingError::InsufficientContent { length, minimum });
    }

    Ok(bounded)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(text: String) -> String {
    if text.chars().count() <= MAX_CONTENT_CHARS {
        return text;
    }
    let mut bounded: String = text.chars().take(MAX_CONTENT_CHARS).collect();
    bounded.push_str(TRUNCATION_MARKER);
    bounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_collapses_whitespace_runs() {
        let text = "Pro   plan\n\n\n$49 \t per\r\nmonth";
        let normalized = collapse_whitespace(text);
        assert_eq!(normalized, "Pro plan $49 per month");
    }

    #[test]
    fn test_short_document_rejected() {
        let err = normalize("too short", SourceKind::Document).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InsufficientContent {
                length: 9,
                minimum: 50,
            }
        ));
    }

    #[test]
    fn test_url_minimum_is_higher() {
        // 60 chars: enough for a document, not for a fetched page.
        let text = "x".repeat(60);
        assert!(normalize(&text, SourceKind::Document).is_ok());
        assert!(matches!(
            normalize(&text, SourceKind::Url).unwrap_err(),
            PricingError::InsufficientContent { minimum: 100, .. }
        ));
    }

    #[test]
    fn test_truncates_to_limit_then_appends_marker() {
        let text = "a".repeat(MAX_CONTENT_CHARS + 500);
        let normalized = normalize(&text, SourceKind::Document).unwrap();

        assert_eq!(
            normalized.chars().count(),
            MAX_CONTENT_CHARS + TRUNCATION_MARKER.len()
        );
        assert!(normalized.ends_with(TRUNCATION_MARKER));

        // The bounded text (marker aside) is a prefix of the input.
        let body = &normalized[..normalized.len() - TRUNCATION_MARKER.len()];
        assert!(text.starts_with(body));
    }

    #[test]
    fn test_exactly_at_limit_is_not_truncated() {
        let text = "b".repeat(MAX_CONTENT_CHARS);
        let normalized = normalize(&text, SourceKind::Document).unwrap();
        assert_eq!(normalized.chars().count(), MAX_CONTENT_CHARS);
        assert!(!normalized.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // Multi-byte characters must not be split mid-codepoint.
        let text = "é".repeat(MAX_CONTENT_CHARS + 10);
        let normalized = normalize(&text, SourceKind::Document).unwrap();
        assert_eq!(
            normalized.chars().count(),
            MAX_CONTENT_CHARS + TRUNCATION_MARKER.len()
        );
    }

    proptest! {
        #[test]
        fn prop_output_never_exceeds_bound(text in "\\PC{0,20000}") {
            if let Ok(normalized) = normalize(&text, SourceKind::Document) {
                prop_assert!(
                    normalized.chars().count() <= MAX_CONTENT_CHARS + TRUNCATION_MARKER.len()
                );
            }
        }

        #[test]
        fn prop_output_has_no_doubled_spaces(text in "\\PC{0,2000}") {
            if let Ok(normalized) = normalize(&text, SourceKind::Document) {
                prop_assert!(!normalized.contains("  "));
                prop_assert_eq!(normalized.trim(), normalized.as_str());
            }
        }

        #[test]
        fn prop_untruncated_output_is_collapsed_input(text in "\\PC{0,2000}") {
            if let Ok(normalized) = normalize(&text, SourceKind::Document) {
                let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
                if collapsed.chars().count() <= MAX_CONTENT_CHARS {
                    prop_assert_eq!(normalized, collapsed);
                }
            }
        }
    }
}
