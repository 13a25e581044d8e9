//! Media types and request constants.

/// `Accept` values sent to the server
pub struct MediaTypes;

impl MediaTypes {
    /// Feed pages in Event Store's JSON rendering of Atom
    pub const ATOM_JSON: &'static str = "application/vnd.eventstore.atom+json";
    /// Event bodies
    pub const JSON: &'static str = "application/json";
}

/// `User-Agent` sent with every request
pub const USER_AGENT: &str = concat!("feedwalk/", env!("CARGO_PKG_VERSION"));
