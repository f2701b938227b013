//! Page fetching.
//!
//! One HTTP GET per call, with browser-like headers and the client's fixed
//! timeout. No caching, no retries; any failure is reported to the caller
//! as a [`FetchError`] and handled there.

use log::debug;
use thiserror::Error;

/// Failure modes of a single page fetch.
///
/// All variants are terminal for the extraction call that issued the fetch;
/// retry policy, if any, belongs to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure: connect error, timeout, or body read error.
    #[error("request for {url} failed: {source}")]
    Request {
        /// The URL that was requested.
        url: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The remote answered with a non-success status code.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// The HTTP status code received.
        status: reqwest::StatusCode,
    },
    /// The remote answered 2xx but the body was empty.
    ///
    /// An empty document cannot yield a meaningful snapshot, so this is
    /// treated the same as a failed fetch.
    #[error("{url} returned an empty body")]
    EmptyBody {
        /// The URL that was requested.
        url: String,
    },
}

/// Realistic browser request headers to reduce bot detection.
///
/// The remote may reject clients that look automated; these headers mimic a
/// desktop Chrome navigation. The User-Agent itself is set on the client at
/// construction time.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-dest"),
                "document",
            )
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-mode"),
                "navigate",
            )
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-site"),
                "none",
            )
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
            .header(reqwest::header::CACHE_CONTROL, "max-age=0")
    }
}

/// Fetches the raw markup of a page.
///
/// Issues exactly one GET for `url` (which must be absolute) and returns the
/// response body as text.
///
/// # Errors
///
/// Returns a [`FetchError`] on any network error, timeout, non-2xx status,
/// or empty response body.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    debug!("GET {}", url);

    let response = RequestHeaders::apply(client.get(url))
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    if body.is_empty() {
        return Err(FetchError::EmptyBody {
            url: url.to_string(),
        });
    }

    debug!("fetched {} bytes from {}", body.len(), url);
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display_includes_url() {
        let err = FetchError::EmptyBody {
            url: "https://example.com/".to_string(),
        };
        assert!(err.to_string().contains("https://example.com/"));

        let err = FetchError::Status {
            url: "https://example.com/x".to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("https://example.com/x"));
    }
}
