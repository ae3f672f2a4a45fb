//! # esfeed-testing
//!
//! A fake event store for integration tests, built on wiremock.
//!
//! [`MockEventStore`] serves streams the way the real store does:
//!
//! - events are numbered from 0 (oldest)
//! - `GET /streams/{s}/head/backward/{n}` lists the newest `n` entries,
//!   newest first, with a `next` link to the page of older entries
//! - `GET /streams/{s}/{start}/backward/{n}` lists entries `start` down to
//!   `start - n + 1`
//! - the last page (the one holding event 0) has no `next` link
//! - `GET /streams/{s}/{number}` with `Accept: application/json` returns the
//!   event's envelope
//!
//! Stream names passed to the fixture must be URL-safe; they are used in
//! paths verbatim.

use esfeed_events::EventEnvelope;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Media type the client asks feed pages in.
pub const ATOM_JSON: &str = "application/vnd.eventstore.atom+json";

/// A wiremock server posing as the event store.
pub struct MockEventStore {
    server: MockServer,
}

impl MockEventStore {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to configure the client with.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Serves `events` (oldest first) as a stream paged by `page_size`.
    pub async fn serve_stream(&self, stream: &str, events: &[EventEnvelope], page_size: usize) {
        assert!(page_size > 0, "page size must be positive");

        let pages = page_ranges(events.len(), page_size);
        if pages.is_empty() {
            self.mount_page(stream, page_size, None, &[], None).await;
        }

        for (i, &(highest, lowest)) in pages.iter().enumerate() {
            let start = (i > 0).then_some(highest);
            let next = pages.get(i + 1).map(|&(next_highest, _)| next_highest);
            let numbers: Vec<usize> = (lowest..=highest).rev().collect();
            self.mount_page(stream, page_size, start, &numbers, next)
                .await;
        }

        for (number, envelope) in events.iter().enumerate() {
            Mock::given(method("GET"))
                .and(path(event_path(stream, number)))
                .and(header("accept", "application/json"))
                .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
                .mount(&self.server)
                .await;
        }
    }

    /// Makes one event fetch answer with `status` instead of the event.
    pub async fn fail_event(&self, stream: &str, number: usize, status: u16) {
        Mock::given(method("GET"))
            .and(path(event_path(stream, number)))
            .respond_with(ResponseTemplate::new(status))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Makes one event fetch answer with a body that is not an envelope.
    pub async fn corrupt_event(&self, stream: &str, number: usize) {
        Mock::given(method("GET"))
            .and(path(event_path(stream, number)))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"eventType\": 7}"))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Answers stream creation for `stream` with `status`.
    pub async fn respond_to_create(&self, stream: &str, status: u16, location: Option<&str>) {
        let mut response = ResponseTemplate::new(status);
        if let Some(location) = location {
            response = response.insert_header("Location", location);
        }

        Mock::given(method("POST"))
            .and(path(format!("/streams/{stream}")))
            .and(header("content-type", "application/json"))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Accepts stream creation for `stream` like the real store does.
    pub async fn accept_creates(&self, stream: &str) {
        let location = format!("{}/streams/{stream}", self.server.uri());
        self.respond_to_create(stream, 201, Some(&location)).await;
    }

    /// Every request the server has seen.
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Number of feed page fetches.
    pub async fn page_fetches(&self) -> usize {
        self.requests()
            .await
            .iter()
            .filter(|r| r.method.as_str() == "GET" && r.url.path().contains("/backward/"))
            .count()
    }

    /// Number of event fetches.
    pub async fn event_fetches(&self) -> usize {
        self.requests()
            .await
            .iter()
            .filter(|r| r.method.as_str() == "GET" && !r.url.path().contains("/backward/"))
            .count()
    }

    /// Bodies of every stream creation request, parsed as JSON.
    pub async fn created_batches(&self) -> Vec<Value> {
        self.requests()
            .await
            .iter()
            .filter(|r| r.method.as_str() == "POST")
            .map(|r| serde_json::from_slice(&r.body).unwrap_or(Value::Null))
            .collect()
    }

    async fn mount_page(
        &self,
        stream: &str,
        page_size: usize,
        start: Option<usize>,
        numbers: &[usize],
        next: Option<usize>,
    ) {
        let base = self.server.uri();
        let page_path = match start {
            Some(start) => format!("/streams/{stream}/{start}/backward/{page_size}"),
            None => format!("/streams/{stream}/head/backward/{page_size}"),
        };

        let mut links = vec![json!({"uri": format!("{base}{page_path}"), "relation": "self"})];
        if let Some(next) = next {
            links.push(json!({
                "uri": format!("{base}/streams/{stream}/{next}/backward/{page_size}"),
                "relation": "next"
            }));
        }

        let entries: Vec<Value> = numbers
            .iter()
            .map(|&number| {
                let uri = format!("{base}{}", event_path(stream, number));
                json!({
                    "id": uri,
                    "title": format!("{number}@{stream}"),
                    "updated": "2026-10-18T12:00:00Z",
                    "links": [
                        {"uri": uri, "relation": "edit"},
                        {"uri": uri, "relation": "alternate"}
                    ]
                })
            })
            .collect();

        let body = json!({
            "title": format!("Event stream '{stream}'"),
            "streamId": stream,
            "links": links,
            "entries": entries
        });

        Mock::given(method("GET"))
            .and(path(page_path))
            .and(header("accept", ATOM_JSON))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

fn event_path(stream: &str, number: usize) -> String {
    format!("/streams/{stream}/{number}")
}

/// Splits `count` events into backward pages of `page_size`.
///
/// Returns `(highest, lowest)` event numbers per page, head page first.
pub fn page_ranges(count: usize, page_size: usize) -> Vec<(usize, usize)> {
    let mut pages = Vec::new();
    let mut remaining = count;
    while remaining > 0 {
        let highest = remaining - 1;
        let lowest = remaining.saturating_sub(page_size);
        pages.push((highest, lowest));
        remaining = lowest;
    }
    pages
}
