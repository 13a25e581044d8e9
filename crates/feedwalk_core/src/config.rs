//! Feed client configuration.

use crate::endpoint::{DEFAULT_BASE_URL, FeedEndpoint};
use crate::error::{FeedError, FeedResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Feed client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Base URL of the feed source
    pub base_url: String,
    /// Entries per feed page
    pub page_size: usize,
    /// Per-request transport timeout in milliseconds (0 = no timeout)
    pub timeout_ms: u64,
    /// Delay between polls when following a stream, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 20,
            timeout_ms: 10_000,
            poll_interval_ms: 1_000,
        }
    }
}

impl FeedConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or fails validation
    pub fn from_json_file(path: impl AsRef<Path>) -> FeedResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FeedError::InvalidConfig {
            reason: format!("{}: {}", path.display(), e),
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| FeedError::InvalidConfig {
            reason: format!("{}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check field ranges and that the base URL parses
    ///
    /// # Errors
    ///
    /// Returns error describing the first invalid field
    pub fn validate(&self) -> FeedResult<()> {
        if self.page_size == 0 {
            return Err(FeedError::InvalidConfig {
                reason: "page_size must be at least 1".to_string(),
            });
        }
        self.endpoint().map(|_| ())
    }

    /// Parsed feed endpoint
    ///
    /// # Errors
    ///
    /// Returns error if `base_url` is not a valid base URL
    pub fn endpoint(&self) -> FeedResult<FeedEndpoint> {
        FeedEndpoint::parse(&self.base_url)
    }

    /// Transport timeout, `None` when disabled
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Poll interval
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
