//! FEEDWALK Event Log
//!
//! Causal-order traversal of an append-only event log that a server exposes
//! as newest-first feed pages.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod memory;
pub mod source;
pub mod stream;

pub use cursor::EventCursor;
pub use memory::{MEMORY_BASE_URL, MemoryFeed};
pub use source::{EventSource, FeedSource};
pub use stream::EventStream;
