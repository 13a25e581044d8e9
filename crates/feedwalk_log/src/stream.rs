//! Event stream for sequential event access.

use crate::cursor::EventCursor;
use crate::source::FeedSource;
use feedwalk_core::FeedResult;
use std::time::Duration;

/// Iterates the events of a stream in causal order, starting with the
/// position it was created from.
///
/// Iteration stops with `None` at the end of the known log. The stream is not
/// fused: calling `next` again after new events have been appended resumes
/// where it left off.
#[derive(Debug, Clone)]
pub struct EventStream<S> {
    current: EventCursor<S>,
    yielded: bool,
}

impl<S: FeedSource + Clone> EventStream<S> {
    /// Create a stream whose first item is `start`
    #[must_use]
    pub fn new(start: EventCursor<S>) -> Self {
        Self {
            current: start,
            yielded: false,
        }
    }

    /// Last yielded position, or the starting one before the first item
    #[must_use]
    pub fn position(&self) -> &EventCursor<S> {
        &self.current
    }

    /// Consume the stream, returning its position
    #[must_use]
    pub fn into_position(self) -> EventCursor<S> {
        self.current
    }

    /// Block until the next event is known, checking every `poll_interval`
    ///
    /// # Errors
    ///
    /// Returns the first fetch error encountered while polling
    pub fn wait_next(&mut self, poll_interval: Duration) -> FeedResult<EventCursor<S>> {
        loop {
            if let Some(item) = self.next() {
                return item;
            }
            tracing::trace!(event = %self.current.event_url(), ?poll_interval, "end of known log, polling");
            std::thread::sleep(poll_interval);
        }
    }
}

impl<S: FeedSource + Clone> Iterator for EventStream<S> {
    type Item = FeedResult<EventCursor<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.yielded {
            self.yielded = true;
            return Some(Ok(self.current.clone()));
        }

        match self.current.next() {
            Ok(Some(next)) => {
                self.current = next.clone();
                Some(Ok(next))
            }
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }
}
