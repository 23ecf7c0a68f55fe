//! HTTP client for feed documents and article pages.

use std::time::Duration;

use reqwest::Client;

use crate::error::FeedError;
use crate::parse::safe_url;

/// `Accept` header favouring feed media types, with HTML as a late fallback
/// so article pages can be fetched through the same client.
pub const FEED_ACCEPT: &str =
    "application/rss+xml, application/xml;q=0.9, text/xml;q=0.8, text/html;q=0.7, */*;q=0.5";

/// Fetches one URL at a time with a per-request timeout. No retries.
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Creates a `FeedClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// GETs `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`FeedError::InvalidUrl`] if `url` is not an absolute http(s) URL.
    /// - [`FeedError::UnexpectedStatus`] for any non-2xx response.
    /// - [`FeedError::Http`] on network failure or timeout.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FeedError> {
        let url = safe_url(url).ok_or_else(|| FeedError::InvalidUrl(url.to_string()))?;

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, FEED_ACCEPT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }
}
