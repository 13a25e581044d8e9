//! Feed and event sources consumed by the cursor.

use bytes::Bytes;
use feedwalk_core::{FeedResult, Page};
use std::sync::Arc;

/// Serves feed pages by URL
pub trait FeedSource {
    /// Fetch and decode the page at `url`
    ///
    /// # Errors
    ///
    /// Returns a fetch error on network failure, non-success status or an
    /// undecodable document
    fn fetch_page(&self, url: &str) -> FeedResult<Page>;
}

/// Serves raw event bodies by their `alternate` URL
pub trait EventSource {
    /// Fetch the event body at `url`, unmodified
    ///
    /// # Errors
    ///
    /// Returns a fetch error on network failure or non-success status
    fn fetch_event(&self, url: &str) -> FeedResult<Bytes>;
}

impl<T: FeedSource + ?Sized> FeedSource for &T {
    fn fetch_page(&self, url: &str) -> FeedResult<Page> {
        (**self).fetch_page(url)
    }
}

impl<T: FeedSource + ?Sized> FeedSource for Arc<T> {
    fn fetch_page(&self, url: &str) -> FeedResult<Page> {
        (**self).fetch_page(url)
    }
}

impl<T: EventSource + ?Sized> EventSource for &T {
    fn fetch_event(&self, url: &str) -> FeedResult<Bytes> {
        (**self).fetch_event(url)
    }
}

impl<T: EventSource + ?Sized> EventSource for Arc<T> {
    fn fetch_event(&self, url: &str) -> FeedResult<Bytes> {
        (**self).fetch_event(url)
    }
}
