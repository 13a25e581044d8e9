//! Event Store `application/vnd.eventstore.atom+json` documents.

use chrono::{DateTime, Utc};
use feedwalk_core::{Entry, Links, Page, Relation};
use serde::{Deserialize, Serialize};

/// One `{ "uri", "relation" }` link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDocument {
    /// Target URL
    pub uri: String,
    /// Relation name
    pub relation: String,
}

/// Entry author
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDocument {
    /// Author name
    #[serde(default)]
    pub name: String,
}

/// Feed entry as sent by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryDocument {
    /// Entry title, `<sequence>@<stream>`
    pub title: Option<String>,
    /// Entry id
    pub id: Option<String>,
    /// Last update, RFC 3339
    pub updated: Option<String>,
    /// Author
    pub author: Option<AuthorDocument>,
    /// Event type
    pub summary: Option<String>,
    /// Entry links
    pub links: Vec<LinkDocument>,
}

/// Feed page as sent by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedDocument {
    /// Feed title
    pub title: Option<String>,
    /// Feed id
    pub id: Option<String>,
    /// Last update, RFC 3339
    pub updated: Option<String>,
    /// Stream the page belongs to
    pub stream_id: Option<String>,
    /// Author
    pub author: Option<AuthorDocument>,
    /// Whether this page is the head of the stream
    pub head_of_stream: bool,
    /// URL the server considers canonical for the page
    pub self_url: Option<String>,
    /// Cache validator
    pub e_tag: Option<String>,
    /// Page links
    pub links: Vec<LinkDocument>,
    /// Entries, newest first
    pub entries: Vec<EntryDocument>,
}

/// Decode a feed document into a page
///
/// # Errors
///
/// Returns error if the body is not a JSON feed document
pub fn parse(body: &[u8]) -> Result<Page, serde_json::Error> {
    serde_json::from_slice::<FeedDocument>(body).map(Page::from)
}

fn links(documents: Vec<LinkDocument>) -> Links {
    documents
        .into_iter()
        .map(|link| (Relation::parse(&link.relation), link.uri))
        .collect()
}

fn timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|t| t.with_timezone(&Utc))
}

impl From<EntryDocument> for Entry {
    fn from(doc: EntryDocument) -> Self {
        let updated = timestamp(doc.updated.as_deref());
        let mut entry = Entry::with_links(links(doc.links));
        entry.id = doc.id;
        entry.title = doc.title;
        entry.summary = doc.summary;
        entry.updated = updated;
        entry
    }
}

impl From<FeedDocument> for Page {
    fn from(doc: FeedDocument) -> Self {
        let entries = doc.entries.into_iter().map(Entry::from).collect();
        let mut page = Page::new(entries, links(doc.links));
        page.head_of_stream = doc.head_of_stream;
        page
    }
}
