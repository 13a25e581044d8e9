//! HTTP client errors.

use feedwalk_core::FeedError;

/// Failure of a single HTTP request
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Connection, timeout, or body read failure
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// Feed document did not decode
    #[error("error deserializing feed document {0}")]
    Json(#[from] serde_json::Error),
}

impl HttpError {
    /// Attach the request URL and map into the feed error taxonomy
    #[must_use]
    pub fn into_feed_error(self, url: &str) -> FeedError {
        match self {
            Self::Status(status) => FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            },
            Self::Json(err) => FeedError::malformed(url, err),
            Self::Reqwest(err) if err.is_decode() => FeedError::malformed(url, err),
            Self::Reqwest(err) => FeedError::transport(url, err),
        }
    }
}
