use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("not an absolute http(s) URL: {0}")]
    InvalidUrl(String),
}
