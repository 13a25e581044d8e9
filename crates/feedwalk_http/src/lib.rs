//! FEEDWALK HTTP
//!
//! Blocking feed and event source for Event Store's HTTP API. Feed pages are
//! requested as `application/vnd.eventstore.atom+json`, event bodies as
//! `application/json`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod atom;
pub mod client;
pub mod constants;
pub mod error;

pub use atom::{EntryDocument, FeedDocument, LinkDocument};
pub use client::HttpFeedClient;
pub use constants::MediaTypes;
pub use error::HttpError;
