//! Link relations carried by feed pages and entries.
//!
//! The wire uses Atom relation names. Note the newest-first framing of the
//! feed: `previous` points at the page holding *newer* events and `next` at
//! the page holding *older* ones.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Atom link relation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Relation {
    /// The document itself
    Self_,
    /// Head of the stream
    First,
    /// Oldest page of the stream
    Last,
    /// Page holding newer events
    Previous,
    /// Page holding older events
    Next,
    /// Event body behind an entry
    Alternate,
    /// Editable resource
    Edit,
    /// Stream or event metadata
    Metadata,
    /// Any relation not listed above
    Other(String),
}

impl Relation {
    /// Wire name of the relation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Self_ => "self",
            Self::First => "first",
            Self::Last => "last",
            Self::Previous => "previous",
            Self::Next => "next",
            Self::Alternate => "alternate",
            Self::Edit => "edit",
            Self::Metadata => "metadata",
            Self::Other(name) => name,
        }
    }

    /// Parse a wire relation name
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "self" => Self::Self_,
            "first" => Self::First,
            "last" => Self::Last,
            "previous" => Self::Previous,
            "next" => Self::Next,
            "alternate" => Self::Alternate,
            "edit" => Self::Edit,
            "metadata" => Self::Metadata,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation name to URL map, in wire order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links(IndexMap<String, String>);

impl Links {
    /// Create an empty link set
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Add or replace a link. The first occurrence of a relation keeps its position.
    pub fn insert(&mut self, relation: Relation, uri: impl Into<String>) {
        self.0.insert(relation.as_str().to_string(), uri.into());
    }

    /// Builder form of [`Links::insert`]
    #[must_use]
    pub fn with(mut self, relation: Relation, uri: impl Into<String>) -> Self {
        self.insert(relation, uri);
        self
    }

    /// Look up a relation; `None` is meaningful (e.g. no newer page yet)
    #[must_use]
    pub fn get(&self, relation: &Relation) -> Option<&str> {
        self.0.get(relation.as_str()).map(String::as_str)
    }

    /// Whether a relation is present
    #[must_use]
    pub fn contains(&self, relation: &Relation) -> bool {
        self.0.contains_key(relation.as_str())
    }

    /// Iterate over `(relation, uri)` pairs in wire order
    pub fn iter(&self) -> impl Iterator<Item = (Relation, &str)> {
        self.0.iter().map(|(k, v)| (Relation::parse(k), v.as_str()))
    }

    /// Number of links
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no links
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Relation, String)> for Links {
    fn from_iter<T: IntoIterator<Item = (Relation, String)>>(iter: T) -> Self {
        let mut links = Self::new();
        for (relation, uri) in iter {
            links.insert(relation, uri);
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_round_trip_names() {
        for name in ["self", "first", "last", "previous", "next", "alternate", "edit", "metadata"] {
            assert_eq!(Relation::parse(name).as_str(), name);
        }
        assert_eq!(Relation::parse("related"), Relation::Other("related".to_string()));
    }

    #[test]
    fn test_links_lookup() {
        let links = Links::new()
            .with(Relation::Self_, "http://h/streams/s/0/forward/20")
            .with(Relation::Previous, "http://h/streams/s/20/forward/20");

        assert_eq!(links.get(&Relation::Previous), Some("http://h/streams/s/20/forward/20"));
        assert_eq!(links.get(&Relation::Next), None);
        assert!(!links.contains(&Relation::Next));
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_links_keep_wire_order() {
        let links: Links = vec![
            (Relation::Edit, "e".to_string()),
            (Relation::Alternate, "a".to_string()),
        ]
        .into_iter()
        .collect();
        let order: Vec<Relation> = links.iter().map(|(r, _)| r).collect();
        assert_eq!(order, vec![Relation::Edit, Relation::Alternate]);
    }
}
