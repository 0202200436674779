//! Content acquisition - fetch a pricing page or gate an upload.

use std::time::Duration;

use reqwest::header;
use tracing::{debug, warn};
use url::Url;

use crate::error::{PricingError, Result};

/// Upload size ceiling, enforced against the declared size before any
/// byte is parsed.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Pricing pages frequently sit behind bot heuristics that serve empty
/// shells to obvious non-browser agents.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build the HTTP client the pipeline fetches pages with.
///
/// Browser-like User-Agent and Accept headers, bounded redirects, and the
/// configured per-request timeout.
pub fn build_client(timeout: Duration) -> reqwest::Client {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
            .parse()
            .unwrap(),
    );
    headers.insert(header::ACCEPT_LANGUAGE, "en-US,en;q=0.5".parse().unwrap());

    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(BROWSER_USER_AGENT)
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .expect("failed to create HTTP client")
}

/// Fetch a pricing page, returning its raw HTML.
///
/// The URL must parse as an absolute URL with a host. A non-success
/// status fails with `Fetch` carrying the upstream code and reason before
/// any HTML parsing is attempted; a transport timeout surfaces as the
/// distinct `FetchTimeout`.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|_| PricingError::InvalidUrl {
        url: url.to_string(),
    })?;
    if !parsed.has_host() {
        return Err(PricingError::InvalidUrl {
            url: url.to_string(),
        });
    }

    debug!(url = %url, "fetching pricing page");

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| map_request_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        warn!(url = %url, status = status.as_u16(), "pricing page fetch failed");
        return Err(PricingError::Fetch {
            url: url.to_string(),
            status: Some(status.as_u16()),
            reason: format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )
            .trim_end()
            .to_string(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| map_request_error(url, e))
}

/// Reject uploads above the ceiling before touching their bytes.
pub fn check_upload_size(declared_size: u64) -> Result<()> {
    if declared_size > MAX_UPLOAD_BYTES {
        return Err(PricingError::PayloadTooLarge {
            size: declared_size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

fn map_request_error(url: &str, err: reqwest::Error) -> PricingError {
    if err.is_timeout() {
        PricingError::FetchTimeout {
            url: url.to_string(),
        }
    } else {
        PricingError::Fetch {
            url: url.to_string(),
            status: err.status().map(|s| s.as_u16()),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_at_limit_accepted() {
        assert!(check_upload_size(MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_upload_over_limit_rejected() {
        let err = check_upload_size(11 * 1024 * 1024).unwrap_err();
        assert!(matches!(
            err,
            PricingError::PayloadTooLarge {
                size,
                limit: MAX_UPLOAD_BYTES,
            } if size == 11 * 1024 * 1024
        ));
    }

    #[tokio::test]
    async fn test_relative_url_rejected_without_network() {
        let client = build_client(Duration::from_secs(5));
        let err = fetch_page(&client, "/pricing").await.unwrap_err();
        assert!(matches!(err, PricingError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_garbage_url_rejected_without_network() {
        let client = build_client(Duration::from_secs(5));
        let err = fetch_page(&client, "not a url at all").await.unwrap_err();
        assert!(matches!(err, PricingError::InvalidUrl { .. }));
    }
}
