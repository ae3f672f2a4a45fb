//! Feed documents served by the store's stream pages.
//!
//! Pages are requested as `application/vnd.eventstore.atom+json`:
//!
//! ```json
//! {
//!   "links": [
//!     { "uri": "http://127.0.0.1:2113/streams/s/head/backward/20", "relation": "self" },
//!     { "uri": "http://127.0.0.1:2113/streams/s/19/backward/20", "relation": "next" }
//!   ],
//!   "entries": [
//!     {
//!       "id": "http://127.0.0.1:2113/streams/s/39",
//!       "title": "39@s",
//!       "summary": "order.placed",
//!       "updated": "2026-10-18T12:00:00Z",
//!       "links": [
//!         { "uri": "http://127.0.0.1:2113/streams/s/39", "relation": "edit" },
//!         { "uri": "http://127.0.0.1:2113/streams/s/39", "relation": "alternate" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Deserialize;

use crate::error::ClientError;

/// Media type of a feed page.
pub const ATOM_JSON: &str = "application/vnd.eventstore.atom+json";

/// Link relation names used by the paging protocol.
pub mod relation {
    pub const NEXT: &str = "next";
    pub const ALTERNATE: &str = "alternate";
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LinkDocument {
    uri: String,
    relation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EntryDocument {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    updated: Option<String>,
    #[serde(default)]
    links: Vec<LinkDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FeedDocument {
    #[serde(default)]
    links: Vec<LinkDocument>,
    #[serde(default)]
    entries: Vec<EntryDocument>,
}

/// Relation name to URL, as listed by a page or an entry.
///
/// A relation listed twice keeps its last URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationLinks(BTreeMap<String, Url>);

impl NavigationLinks {
    fn resolve(base: &Url, links: Vec<LinkDocument>) -> Result<Self, ClientError> {
        let mut map = BTreeMap::new();
        for link in links {
            let url = base.join(&link.uri).map_err(|e| ClientError::InvalidLink {
                url: base.to_string(),
                href: link.uri.clone(),
                message: e.to_string(),
            })?;
            map.insert(link.relation, url);
        }
        Ok(Self(map))
    }

    pub fn get(&self, relation: &str) -> Option<&Url> {
        self.0.get(relation)
    }

    /// The older page, absent on the last page of a backward read.
    pub fn next(&self) -> Option<&Url> {
        self.get(relation::NEXT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Url)> {
        self.0.iter().map(|(rel, url)| (rel.as_str(), url))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Reference to one event listed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRef {
    /// Entry identifier (the event's canonical URI).
    pub id: String,

    /// Entry title, `{event_number}@{stream}` on EventStore.
    pub title: String,

    /// Entry summary, the event type on EventStore.
    pub summary: Option<String>,

    /// Informational only; a timestamp that is not RFC 3339 reads as `None`.
    pub updated: Option<DateTime<Utc>>,

    /// Where the full event is fetched from.
    pub detail_url: Url,
}

/// One page of a stream feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    /// URL the page was fetched from.
    pub url: Url,

    /// Entries in the order the page lists them.
    pub entries: Vec<EntryRef>,

    pub links: NavigationLinks,
}

impl FeedPage {
    /// Parses a feed document body fetched from `url`.
    pub fn parse(url: &Url, body: &[u8]) -> Result<Self, ClientError> {
        let document: FeedDocument =
            serde_json::from_slice(body).map_err(|e| ClientError::decode(url, e))?;
        Self::from_document(url, document)
    }

    pub(crate) fn from_document(url: &Url, document: FeedDocument) -> Result<Self, ClientError> {
        let links = NavigationLinks::resolve(url, document.links)?;

        let entries = document
            .entries
            .into_iter()
            .map(|entry| -> Result<EntryRef, ClientError> {
                let entry_links = NavigationLinks::resolve(url, entry.links)?;
                let detail_url = entry_links
                    .get(relation::ALTERNATE)
                    .cloned()
                    .ok_or_else(|| ClientError::MissingLink {
                        entry: entry.id.clone(),
                        relation: relation::ALTERNATE,
                    })?;

                Ok(EntryRef {
                    id: entry.id,
                    title: entry.title,
                    summary: entry.summary,
                    updated: entry.updated.and_then(|at| at.parse().ok()),
                    detail_url,
                })
            })
            .collect::<Result<Vec<_>, ClientError>>()?;

        Ok(Self {
            url: url.clone(),
            entries,
            links,
        })
    }

    pub fn is_last(&self) -> bool {
        self.links.next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn head_url() -> Url {
        Url::parse("http://localhost:2113/streams/s/head/backward/2").unwrap()
    }

    fn parse(value: serde_json::Value) -> Result<FeedPage, ClientError> {
        FeedPage::parse(&head_url(), &serde_json::to_vec(&value).unwrap())
    }

    #[test]
    fn test_parse_page_with_next() {
        let page = parse(json!({
            "title": "Event stream 's'",
            "links": [
                {"uri": "http://localhost:2113/streams/s", "relation": "self"},
                {"uri": "http://localhost:2113/streams/s/2/backward/2", "relation": "next"}
            ],
            "entries": [
                {
                    "id": "http://localhost:2113/streams/s/4",
                    "title": "4@s",
                    "summary": "order.shipped",
                    "updated": "2026-10-18T12:00:00Z",
                    "links": [
                        {"uri": "http://localhost:2113/streams/s/4", "relation": "edit"},
                        {"uri": "http://localhost:2113/streams/s/4", "relation": "alternate"}
                    ]
                },
                {
                    "id": "http://localhost:2113/streams/s/3",
                    "title": "3@s",
                    "links": [
                        {"uri": "http://localhost:2113/streams/s/3", "relation": "alternate"}
                    ]
                }
            ]
        }))
        .unwrap();

        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].title, "4@s");
        assert_eq!(page.entries[0].summary.as_deref(), Some("order.shipped"));
        assert!(page.entries[0].updated.is_some());
        assert_eq!(
            page.links.next().map(Url::as_str),
            Some("http://localhost:2113/streams/s/2/backward/2")
        );
        assert!(!page.is_last());
    }

    #[test]
    fn test_detail_link_resolved_by_relation_not_position() {
        let page = parse(json!({
            "links": [],
            "entries": [{
                "id": "e",
                "links": [
                    {"uri": "/streams/s/0", "relation": "alternate"},
                    {"uri": "/streams/s/0/edit", "relation": "edit"}
                ]
            }]
        }))
        .unwrap();

        assert_eq!(
            page.entries[0].detail_url.as_str(),
            "http://localhost:2113/streams/s/0"
        );
        assert!(page.is_last());
    }

    #[test]
    fn test_unreadable_timestamp_does_not_fail_page() {
        let page = parse(json!({
            "entries": [{
                "id": "http://localhost:2113/streams/s/0",
                "updated": "18/10/2026",
                "links": [{"uri": "/streams/s/0", "relation": "alternate"}]
            }]
        }))
        .unwrap();

        assert_eq!(page.entries.len(), 1);
        assert!(page.entries[0].updated.is_none());
        assert_eq!(page.entries[0].detail_url.path(), "/streams/s/0");
    }

    #[test]
    fn test_entry_without_alternate_link() {
        let err = parse(json!({
            "entries": [{"id": "e-1", "links": [{"uri": "/x", "relation": "edit"}]}]
        }))
        .unwrap_err();

        assert!(matches!(err, ClientError::MissingLink { ref entry, .. } if entry == "e-1"));
    }

    #[test]
    fn test_duplicate_relation_keeps_last() {
        let page = parse(json!({
            "links": [
                {"uri": "/a", "relation": "next"},
                {"uri": "/b", "relation": "next"}
            ]
        }))
        .unwrap();

        assert_eq!(page.links.len(), 1);
        assert_eq!(page.links.next().unwrap().path(), "/b");
    }

    #[test]
    fn test_malformed_document() {
        let err = FeedPage::parse(&head_url(), b"<feed/>").unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }
}
