//! Core error types for FEEDWALK.

/// Core result type
pub type FeedResult<T> = Result<T, FeedError>;

/// Feed error type
///
/// The first four variants form the fetch-error family: a page or event could
/// not be obtained from its source. They are always surfaced to the caller and
/// never retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// Network failure or transport timeout
    #[error("Transport error fetching {url}: {reason}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying failure
        reason: String,
    },

    /// Source answered with a non-success status
    #[error("Unexpected status {status} fetching {url}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Document could not be decoded or violates page invariants
    #[error("Malformed document at {url}: {reason}")]
    Malformed {
        /// Requested URL
        url: String,
        /// What was wrong with it
        reason: String,
    },

    /// Page holds no entries to position a cursor on
    #[error("Page has no entries: {url}")]
    EmptyPage {
        /// Requested URL
        url: String,
    },

    /// Invalid stream identifier
    #[error("Invalid stream id: {reason}")]
    InvalidStreamId {
        /// Why it was rejected
        reason: String,
    },

    /// Invalid URL
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl {
        /// Offending URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Why it was rejected
        reason: String,
    },
}

impl FeedError {
    /// Build a transport error for `url`
    pub fn transport(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a malformed-document error for `url`
    pub fn malformed(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Malformed {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the error came from fetching a page or event
    #[must_use]
    pub const fn is_fetch(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Status { .. } | Self::Malformed { .. } | Self::EmptyPage { .. }
        )
    }

    /// URL of the failed request, if any
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Transport { url, .. }
            | Self::Status { url, .. }
            | Self::Malformed { url, .. }
            | Self::EmptyPage { url }
            | Self::InvalidUrl { url, .. } => Some(url),
            Self::InvalidStreamId { .. } | Self::InvalidConfig { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeedError::Status {
            url: "http://localhost:2113/streams/orders".to_string(),
            status: 404,
        };
        assert_eq!(
            format!("{}", err),
            "Unexpected status 404 fetching http://localhost:2113/streams/orders"
        );

        let err = FeedError::EmptyPage {
            url: "memory://feed/streams/a/0/forward/20".to_string(),
        };
        assert!(format!("{}", err).contains("no entries"));
    }

    #[test]
    fn test_fetch_family() {
        assert!(FeedError::transport("u", "connection refused").is_fetch());
        assert!(FeedError::malformed("u", "eof").is_fetch());
        assert!(FeedError::Status { url: "u".into(), status: 500 }.is_fetch());
        assert!(!FeedError::InvalidConfig { reason: "zero".into() }.is_fetch());
    }

    #[test]
    fn test_error_url() {
        let err = FeedError::transport("http://h/e/1", "timeout");
        assert_eq!(err.url(), Some("http://h/e/1"));
        assert_eq!(FeedError::InvalidStreamId { reason: "empty".into() }.url(), None);
    }

    #[test]
    fn test_error_equality() {
        let err1 = FeedError::transport("u", "x");
        let err2 = FeedError::transport("u", "x");
        assert_eq!(err1, err2);
        assert_ne!(err1, FeedError::malformed("u", "x"));
    }
}
