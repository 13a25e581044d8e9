//! Feed source endpoint and URL construction.

use crate::error::{FeedError, FeedResult};
use crate::id::StreamId;
use std::fmt;
use url::Url;

/// Default Event Store HTTP endpoint
pub const DEFAULT_BASE_URL: &str = "http://localhost:2113";

/// Base address of a feed source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEndpoint {
    base: Url,
}

impl FeedEndpoint {
    /// Parse a base URL
    ///
    /// # Errors
    ///
    /// Returns error if the URL does not parse or cannot carry a path
    pub fn parse(base: &str) -> FeedResult<Self> {
        let base = Url::parse(base).map_err(|e| FeedError::InvalidUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(FeedError::InvalidUrl {
                url: base.to_string(),
                reason: "not a base URL".to_string(),
            });
        }
        Ok(Self { base })
    }

    /// The base URL
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Page of `page_size` events starting at `start`, read forward:
    /// `<base>/streams/<stream>/<start>/forward/<page_size>`
    #[must_use]
    pub fn stream_page(&self, stream: &StreamId, start: u64, page_size: usize) -> String {
        self.join(&[
            "streams",
            stream.as_str(),
            &start.to_string(),
            "forward",
            &page_size.to_string(),
        ])
    }

    /// Single event: `<base>/streams/<stream>/<sequence>`
    #[must_use]
    pub fn event(&self, stream: &StreamId, sequence: u64) -> String {
        self.join(&["streams", stream.as_str(), &sequence.to_string()])
    }

    fn join(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }
}

impl Default for FeedEndpoint {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }
}

impl fmt::Display for FeedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)
    }
}
