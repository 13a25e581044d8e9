//! Cursor for walking a newest-first paginated feed in causal order.
//!
//! Feed pages hold a fixed number of entries and are delivered newest first.
//! A cursor remembers which page it came from and its causal index on that
//! page (0 = the oldest entry it has seen there), and derives the next
//! position on demand. The head page keeps growing until it is full, so a
//! cursor that runs out of local entries re-fetches its page before giving up;
//! once a page is full the cursor follows its `previous` link to the newer
//! page.

use crate::source::{EventSource, FeedSource};
use bytes::Bytes;
use feedwalk_core::{Entry, FeedEndpoint, FeedError, FeedResult, Page, Relation, StreamId};
use std::sync::Arc;
use tracing::debug;

/// Position of one event in a stream
///
/// Every successful [`EventCursor::next`] returns a fresh cursor. The only
/// state a cursor changes on itself is its cached page snapshot, which is
/// replaced after a successful re-fetch.
#[derive(Debug, Clone)]
pub struct EventCursor<S> {
    source: S,
    event_url: String,
    page_url: String,
    page: Arc<Page>,
    entry_index: usize,
    page_size: usize,
}

impl<S: FeedSource + Clone> EventCursor<S> {
    /// Open a cursor at the event with sequence number `start`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a zero page size, `EmptyPage` when there
    /// is no event at `start` yet, or the error of the failed page fetch
    pub fn open(
        source: S,
        endpoint: &FeedEndpoint,
        stream: &StreamId,
        start: u64,
        page_size: usize,
    ) -> FeedResult<Self> {
        if page_size == 0 {
            return Err(FeedError::InvalidConfig {
                reason: "page size must be at least 1".to_string(),
            });
        }

        let page_url = endpoint.stream_page(stream, start, page_size);
        debug!(%stream, start, page_size, url = %page_url, "opening cursor");

        let page = fetch_page(&source, &page_url, page_size)?;
        // The last entry on the wire is the oldest one.
        let Some(entry) = page.at_causal(0) else {
            return Err(FeedError::EmptyPage { url: page_url });
        };
        let event_url = alternate(entry, &page_url)?;

        Ok(Self {
            source,
            event_url,
            page_url,
            page: Arc::new(page),
            entry_index: 0,
            page_size,
        })
    }

    /// Position of the following event, or `None` when no newer event is
    /// known yet. Calling again later picks up events appended since.
    ///
    /// # Errors
    ///
    /// Returns the error of a failed page fetch; `self` keeps its position and
    /// can be retried.
    pub fn next(&mut self) -> FeedResult<Option<Self>> {
        debug!(
            event = %self.event_url,
            candidate = self.entry_index + 1,
            known = self.page.len(),
            "looking for next event"
        );

        if self.is_last_slot() {
            self.next_page()
        } else {
            self.next_on_page()
        }
    }

    fn next_on_page(&mut self) -> FeedResult<Option<Self>> {
        let candidate = self.entry_index + 1;

        if candidate >= self.page.len() {
            debug!(page = %self.page_url, "last known event on page, refreshing page");
            self.refresh()?;

            if candidate >= self.page.len() {
                debug!("no new event on page");
                return Ok(None);
            }
            debug!(known = self.page.len(), "new events on page after refresh");
        }

        self.at(self.page_url.clone(), Arc::clone(&self.page), candidate)
            .map(Some)
    }

    fn next_page(&mut self) -> FeedResult<Option<Self>> {
        debug!(page = %self.page_url, "end of page reached, checking for newer page");

        if self.page.link(&Relation::Previous).is_none() {
            self.refresh()?;
        }

        let Some(newer_url) = self.page.link(&Relation::Previous).map(str::to_string) else {
            debug!("no newer page");
            return Ok(None);
        };

        let newer = fetch_page(&self.source, &newer_url, self.page_size)?;
        if newer.is_empty() {
            debug!(page = %newer_url, "newer page has no entries yet");
            return Ok(None);
        }

        self.at(newer_url, Arc::new(newer), 0).map(Some)
    }

    fn refresh(&mut self) -> FeedResult<()> {
        let page = fetch_page(&self.source, &self.page_url, self.page_size)?;
        self.page = Arc::new(page);
        Ok(())
    }

    fn at(&self, page_url: String, page: Arc<Page>, entry_index: usize) -> FeedResult<Self> {
        let entry = page.at_causal(entry_index).ok_or_else(|| {
            FeedError::malformed(&page_url, format!("no entry at causal index {}", entry_index))
        })?;
        let event_url = alternate(entry, &page_url)?;

        Ok(Self {
            source: self.source.clone(),
            event_url,
            page_url,
            page,
            entry_index,
            page_size: self.page_size,
        })
    }
}

impl<S> EventCursor<S> {
    /// URL of the event at this position
    #[must_use]
    pub fn event_url(&self) -> &str {
        &self.event_url
    }

    /// URL of the page this position was read from
    #[must_use]
    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    /// Causal index on the page (0 = oldest)
    #[must_use]
    pub const fn entry_index(&self) -> usize {
        self.entry_index
    }

    /// Configured page capacity
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Last fetched snapshot of the page
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Feed entry for this position
    #[must_use]
    pub fn entry(&self) -> Option<&Entry> {
        self.page.at_causal(self.entry_index)
    }

    const fn is_last_slot(&self) -> bool {
        self.entry_index + 1 == self.page_size
    }
}

impl<S: EventSource> EventCursor<S> {
    /// Download the body of the event at this position
    ///
    /// # Errors
    ///
    /// Returns the error of the failed event fetch
    pub fn download_event(&self) -> FeedResult<Bytes> {
        debug!(event = %self.event_url, "downloading event");
        self.source.fetch_event(&self.event_url)
    }
}

fn fetch_page<S: FeedSource>(source: &S, url: &str, page_size: usize) -> FeedResult<Page> {
    let page = source.fetch_page(url)?;
    if page.len() > page_size {
        return Err(FeedError::malformed(
            url,
            format!("{} entries exceed page size {}", page.len(), page_size),
        ));
    }
    Ok(page)
}

fn alternate(entry: &Entry, page_url: &str) -> FeedResult<String> {
    entry
        .alternate()
        .map(str::to_string)
        .ok_or_else(|| FeedError::malformed(page_url, "entry has no alternate link"))
}
