//! In-process feed source.
//!
//! Serves the same paging scheme as the Event Store HTTP API: a page read
//! forward from `start` covers sequences `start..start + size`, entries are
//! delivered newest first, and the page links to its newer neighbour with
//! `previous` only once events exist past its last slot.

use crate::source::{EventSource, FeedSource};
use bytes::Bytes;
use feedwalk_core::{Entry, FeedEndpoint, FeedError, FeedResult, Links, Page, Relation, StreamId};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Base URL used by [`MemoryFeed::new`]
pub const MEMORY_BASE_URL: &str = "memory://feed";

#[derive(Debug, Default)]
struct MemoryState {
    streams: BTreeMap<StreamId, Vec<Bytes>>,
    fail_next: usize,
    page_fetches: u64,
    event_fetches: u64,
}

/// Shared in-memory event log exposed as a paginated feed
#[derive(Debug, Clone)]
pub struct MemoryFeed {
    endpoint: FeedEndpoint,
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryFeed {
    /// Create an empty feed served under [`MEMORY_BASE_URL`]
    #[must_use]
    pub fn new() -> Self {
        let endpoint = FeedEndpoint::parse(MEMORY_BASE_URL).expect("memory base URL is valid");
        Self::with_endpoint(endpoint)
    }

    /// Create an empty feed served under `endpoint`
    #[must_use]
    pub fn with_endpoint(endpoint: FeedEndpoint) -> Self {
        Self {
            endpoint,
            state: Arc::new(RwLock::new(MemoryState::default())),
        }
    }

    /// Endpoint the feed's URLs are built from
    #[must_use]
    pub fn endpoint(&self) -> &FeedEndpoint {
        &self.endpoint
    }

    /// Append an event, returning its sequence number
    pub fn append(&self, stream: &StreamId, body: impl Into<Bytes>) -> u64 {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let events = state.streams.entry(stream.clone()).or_default();
        events.push(body.into());
        (events.len() - 1) as u64
    }

    /// Number of events in a stream
    #[must_use]
    pub fn event_count(&self, stream: &StreamId) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.streams.get(stream).map_or(0, Vec::len)
    }

    /// Make the next `count` fetches fail with a transport error
    pub fn fail_next(&self, count: usize) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.fail_next = count;
    }

    /// Page fetches served so far
    #[must_use]
    pub fn page_fetches(&self) -> u64 {
        self.state.read().unwrap_or_else(PoisonError::into_inner).page_fetches
    }

    /// Event fetches served so far
    #[must_use]
    pub fn event_fetches(&self) -> u64 {
        self.state.read().unwrap_or_else(PoisonError::into_inner).event_fetches
    }

    fn take_failure(state: &mut MemoryState, url: &str) -> FeedResult<()> {
        if state.fail_next > 0 {
            state.fail_next -= 1;
            return Err(FeedError::transport(url, "injected failure"));
        }
        Ok(())
    }

    fn build_page(&self, stream: &StreamId, len: u64, start: u64, size: usize) -> Page {
        let step = size as u64;
        let end = start.saturating_add(step).min(len);

        let entries = (start..end)
            .rev()
            .map(|seq| {
                Entry::new(self.endpoint.event(stream, seq))
                    .with_title(format!("{}@{}", seq, stream))
                    .with_summary("MemoryEvent")
            })
            .collect();

        let head_start = if len > start {
            start + (len - 1 - start) / step * step
        } else {
            start
        };

        let mut links = Links::new()
            .with(Relation::Self_, self.endpoint.stream_page(stream, start, size))
            .with(Relation::First, self.endpoint.stream_page(stream, head_start, size))
            .with(Relation::Last, self.endpoint.stream_page(stream, 0, size));
        if len > start.saturating_add(step) {
            links.insert(Relation::Previous, self.endpoint.stream_page(stream, start + step, size));
        }
        if start > 0 {
            links.insert(
                Relation::Next,
                self.endpoint.stream_page(stream, start.saturating_sub(step), size),
            );
        }

        let mut page = Page::new(entries, links);
        page.head_of_stream = end >= len;
        page
    }
}

impl Default for MemoryFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `.../streams/<stream>/<start>/forward/<size>` into its numeric parts
fn parse_page_url(url: &str) -> Option<(u64, usize)> {
    let parsed = url::Url::parse(url).ok()?;
    let segments: Vec<&str> = parsed.path_segments()?.collect();
    match segments.as_slice() {
        [.., "streams", _, start, "forward", size] => Some((start.parse().ok()?, size.parse().ok()?)),
        _ => None,
    }
}

/// Split `.../streams/<stream>/<sequence>` into its sequence number
fn parse_event_url(url: &str) -> Option<u64> {
    let parsed = url::Url::parse(url).ok()?;
    let segments: Vec<&str> = parsed.path_segments()?.collect();
    match segments.as_slice() {
        [.., "streams", _, seq] => seq.parse().ok(),
        _ => None,
    }
}

impl FeedSource for MemoryFeed {
    fn fetch_page(&self, url: &str) -> FeedResult<Page> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        Self::take_failure(&mut state, url)?;

        let not_found = || FeedError::Status {
            url: url.to_string(),
            status: 404,
        };
        let (start, size) = parse_page_url(url).ok_or_else(not_found)?;
        if size == 0 {
            return Err(FeedError::Status {
                url: url.to_string(),
                status: 400,
            });
        }
        let (stream, len) = state
            .streams
            .iter()
            .find(|(id, _)| self.endpoint.stream_page(id, start, size) == url)
            .map(|(id, events)| (id.clone(), events.len() as u64))
            .ok_or_else(not_found)?;

        state.page_fetches += 1;
        tracing::trace!(url, start, size, len, "serving memory page");
        Ok(self.build_page(&stream, len, start, size))
    }
}

impl EventSource for MemoryFeed {
    fn fetch_event(&self, url: &str) -> FeedResult<Bytes> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        Self::take_failure(&mut state, url)?;

        let not_found = || FeedError::Status {
            url: url.to_string(),
            status: 404,
        };
        let seq = parse_event_url(url).ok_or_else(not_found)?;
        let body = state
            .streams
            .iter()
            .find(|(id, _)| self.endpoint.event(id, seq) == url)
            .and_then(|(_, events)| events.get(seq as usize).cloned())
            .ok_or_else(not_found)?;

        state.event_fetches += 1;
        Ok(body)
    }
}
