//! Entry resolver - fetches the full event behind a feed entry.

use async_trait::async_trait;
use esfeed_events::{decode_envelope, EventEnvelope};
use reqwest::header::ACCEPT;
use reqwest::Url;
use tracing::{debug, error, Span};

use crate::error::ClientError;
use crate::http::StoreHttp;

/// Source of full events for feed entries.
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Fetches and decodes the event at an entry's detail URL.
    async fn resolve_entry(&self, url: &Url) -> Result<EventEnvelope, ClientError>;
}

/// Resolves entries over HTTP, asking for the event as plain JSON.
#[derive(Debug, Clone)]
pub struct EntryResolver {
    http: StoreHttp,
    span: Span,
}

impl EntryResolver {
    pub fn new(http: StoreHttp, span: Span) -> Self {
        Self { http, span }
    }
}

#[async_trait]
impl EntrySource for EntryResolver {
    async fn resolve_entry(&self, url: &Url) -> Result<EventEnvelope, ClientError> {
        let response = self
            .http
            .client()
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!(parent: &self.span, url = %url, error = %e, "Event request failed");
                ClientError::transport(url, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(parent: &self.span, url = %url, status = %status, "Unexpected event status");
            return Err(ClientError::UnexpectedStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::transport(url, e))?;
        let envelope = decode_envelope(&body).map_err(|e| ClientError::decode(url, e))?;

        debug!(
            parent: &self.span,
            url = %url,
            event_id = %envelope.event_id,
            event_type = %envelope.event_type,
            "Resolved event"
        );

        Ok(envelope)
    }
}
