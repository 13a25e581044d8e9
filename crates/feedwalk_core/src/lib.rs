//! FEEDWALK Core Types
//!
//! Feed pages, link relations, endpoints, and configuration.
//! This crate contains pure types and logic with no network I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod endpoint;
pub mod error;
pub mod id;
pub mod link;
pub mod page;

// Re-exports
pub use config::FeedConfig;
pub use endpoint::{DEFAULT_BASE_URL, FeedEndpoint};
pub use error::{FeedError, FeedResult};
pub use id::StreamId;
pub use link::{Links, Relation};
pub use page::{Entry, Page};
