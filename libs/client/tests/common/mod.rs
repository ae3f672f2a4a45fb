//! Shared helpers for client integration tests.

#![allow(dead_code)]

use esfeed_client::{ClientConfig, EventStoreClient};
use esfeed_events::EventEnvelope;
use serde_json::json;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("esfeed=debug")
        .with_test_writer()
        .try_init();
}

pub fn client(base_url: &str, page_size: u32) -> EventStoreClient {
    init_tracing();
    let config = ClientConfig::new(base_url)
        .unwrap()
        .with_page_size(page_size);
    EventStoreClient::builder(config)
        .span(tracing::info_span!("esfeed", test = true))
        .build()
        .unwrap()
}

/// `count` envelopes whose payload records their position.
pub fn numbered_events(count: usize) -> Vec<EventEnvelope> {
    (0..count)
        .map(|n| EventEnvelope::new("counter.incremented", json!({ "n": n })))
        .collect()
}
