//! Identifiers for FEEDWALK entities.

use crate::error::{FeedError, FeedResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Stream identifier - names one append-only event stream on the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StreamId(String);

impl StreamId {
    /// Create a stream id
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty or contains whitespace
    pub fn new(name: impl Into<String>) -> FeedResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(FeedError::InvalidStreamId {
                reason: "empty stream name".to_string(),
            });
        }
        if name.chars().any(char::is_whitespace) {
            return Err(FeedError::InvalidStreamId {
                reason: format!("whitespace in stream name {:?}", name),
            });
        }
        Ok(Self(name))
    }

    /// Get as str
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StreamId {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for StreamId {
    type Error = FeedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StreamId> for String {
    fn from(id: StreamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
