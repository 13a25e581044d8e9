//! Feed pages and their entries.
//!
//! A page is an immutable snapshot of one feed document. Entries are kept in
//! wire order, newest first.

use crate::link::{Links, Relation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One event reference within a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry id (usually the event URL)
    pub id: Option<String>,
    /// Entry title, e.g. `3@orders`
    pub title: Option<String>,
    /// Event type
    pub summary: Option<String>,
    /// Last update time reported by the server
    pub updated: Option<DateTime<Utc>>,
    /// Entry links
    pub links: Links,
}

impl Entry {
    /// Create an entry pointing at an event body
    #[must_use]
    pub fn new(alternate: impl Into<String>) -> Self {
        Self {
            id: None,
            title: None,
            summary: None,
            updated: None,
            links: Links::new().with(Relation::Alternate, alternate),
        }
    }

    /// Create an entry with only the given links
    #[must_use]
    pub fn with_links(links: Links) -> Self {
        Self {
            id: None,
            title: None,
            summary: None,
            updated: None,
            links,
        }
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the event type
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Look up an entry link
    #[must_use]
    pub fn link(&self, relation: &Relation) -> Option<&str> {
        self.links.get(relation)
    }

    /// URL of the underlying event body
    #[must_use]
    pub fn alternate(&self) -> Option<&str> {
        self.link(&Relation::Alternate)
    }
}

/// Snapshot of one feed document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Entries, newest first
    pub entries: Vec<Entry>,
    /// Page-level links
    pub links: Links,
    /// Whether the server marked this page as the head of the stream
    #[serde(default)]
    pub head_of_stream: bool,
}

impl Page {
    /// Create a page from wire-ordered entries and links
    #[must_use]
    pub fn new(entries: Vec<Entry>, links: Links) -> Self {
        Self {
            entries,
            links,
            head_of_stream: false,
        }
    }

    /// Look up a page link
    #[must_use]
    pub fn link(&self, relation: &Relation) -> Option<&str> {
        self.links.get(relation)
    }

    /// Number of entries on the page
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the page has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a wire index (0 = newest on this page)
    #[must_use]
    pub fn at_wire(&self, wire_index: usize) -> Option<&Entry> {
        self.entries.get(wire_index)
    }

    /// Map a causal index (0 = oldest present) to its wire index.
    ///
    /// Only the entries actually present count, so a head page that is still
    /// filling maps causal `i` to `len - 1 - i` rather than `capacity - 1 - i`.
    #[must_use]
    pub fn wire_index(&self, causal_index: usize) -> Option<usize> {
        self.len().checked_sub(1)?.checked_sub(causal_index)
    }

    /// Entry at a causal index (0 = oldest on this page)
    #[must_use]
    pub fn at_causal(&self, causal_index: usize) -> Option<&Entry> {
        self.wire_index(causal_index).and_then(|w| self.at_wire(w))
    }

    /// Entries in causal (oldest-first) order
    pub fn causal(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().rev()
    }
}
