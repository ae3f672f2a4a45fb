//! Stream writer - creates a stream from its first batch of events.

use esfeed_events::{encode_batch, EventEnvelope, EventSource};
use esfeed_id::StreamId;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::StatusCode;
use tracing::{debug, error, info, Span};

use crate::error::ClientError;
use crate::http::StoreHttp;

/// Outcome of a successful stream creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamCreated {
    pub stream_id: StreamId,

    /// `Location` header of the response, if the store sent one.
    pub location: Option<String>,
}

/// Posts new streams to the store.
#[derive(Debug, Clone)]
pub struct StreamWriter {
    http: StoreHttp,
    span: Span,
}

impl StreamWriter {
    pub fn new(http: StoreHttp, span: Span) -> Self {
        Self { http, span }
    }

    /// Creates `stream` holding `events`, in order, in a single request.
    ///
    /// Only `201 Created` counts as success.
    pub async fn create_stream(
        &self,
        stream: &StreamId,
        events: &[EventEnvelope],
    ) -> Result<StreamCreated, ClientError> {
        if events.is_empty() {
            return Err(ClientError::EmptyBatch {
                stream_id: stream.to_string(),
            });
        }

        let url = self.http.urls().stream(stream);
        let body = encode_batch(events).map_err(ClientError::Encode)?;
        debug!(
            parent: &self.span,
            url = %url,
            event_count = events.len(),
            "Creating new stream"
        );

        let response = self
            .http
            .client()
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(parent: &self.span, url = %url, error = %e, "Error while posting new stream request");
                ClientError::transport(&url, e)
            })?;

        let status = response.status();
        if status != StatusCode::CREATED {
            error!(parent: &self.span, url = %url, status = %status, "Unexpected http status code in response");
            return Err(ClientError::UnexpectedStatus {
                url: url.to_string(),
                status,
            });
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        info!(
            parent: &self.span,
            stream_id = %stream,
            event_count = events.len(),
            location = location.as_deref().unwrap_or(""),
            "Created stream"
        );

        Ok(StreamCreated {
            stream_id: stream.clone(),
            location,
        })
    }

    /// Creates the stream of an event source from its events.
    pub async fn new_stream<S>(&self, source: &S) -> Result<StreamCreated, ClientError>
    where
        S: EventSource + Sync + ?Sized,
    {
        self.create_stream(&source.stream_id(), source.events()).await
    }
}
