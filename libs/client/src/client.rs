//! Event store client facade.
//!
//! Wires the page fetcher, entry resolver, reader and writer around one
//! shared HTTP client and one injected tracing span.

use esfeed_events::{EventEnvelope, EventSource};
use esfeed_id::StreamId;
use tracing::Span;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::StoreHttp;
use crate::page::PageFetcher;
use crate::reader::{ReadOptions, StreamReader};
use crate::resolver::EntryResolver;
use crate::writer::{StreamCreated, StreamWriter};

/// Client for an event store's HTTP stream API.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> Result<(), esfeed_client::ClientError> {
/// use esfeed_client::{ClientConfig, EventStoreClient};
/// use esfeed_events::{EventEnvelope, EventSourceId};
///
/// let config = ClientConfig::new("http://127.0.0.1:2113")?;
/// let client = EventStoreClient::new(config)?;
///
/// let source = EventSourceId::new();
/// let placed = EventEnvelope::new("order.placed", serde_json::json!({ "total": 42 }));
/// client.create_stream(source, &[placed]).await?;
///
/// let history = client.open_stream(source).await?;
/// assert_eq!(history.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EventStoreClient {
    config: ClientConfig,
    reader: StreamReader<PageFetcher, EntryResolver>,
    writer: StreamWriter,
}

impl EventStoreClient {
    /// Creates a client logging under a default `esfeed` span.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Self::builder(config).build()
    }

    pub fn builder(config: ClientConfig) -> EventStoreClientBuilder {
        EventStoreClientBuilder { config, span: None }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Creates a stream holding `events`, in order.
    pub async fn create_stream(
        &self,
        stream: impl Into<StreamId>,
        events: &[EventEnvelope],
    ) -> Result<StreamCreated, ClientError> {
        self.writer.create_stream(&stream.into(), events).await
    }

    /// Creates the stream of an event source from its events.
    pub async fn new_stream<S>(&self, source: &S) -> Result<StreamCreated, ClientError>
    where
        S: EventSource + Sync + ?Sized,
    {
        self.writer.new_stream(source).await
    }

    /// Reads a stream's whole history, oldest event first.
    pub async fn open_stream(
        &self,
        stream: impl Into<StreamId>,
    ) -> Result<Vec<EventEnvelope>, ClientError> {
        self.reader.open_stream(&stream.into()).await
    }
}

/// Builder for [`EventStoreClient`].
#[derive(Debug)]
pub struct EventStoreClientBuilder {
    config: ClientConfig,
    span: Option<Span>,
}

impl EventStoreClientBuilder {
    /// Span every component logs under.
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn build(self) -> Result<EventStoreClient, ClientError> {
        let http = StoreHttp::new(&self.config)?;
        let span = self.span.unwrap_or_else(|| {
            tracing::info_span!("esfeed", base_url = %self.config.base_url)
        });

        let options = ReadOptions {
            page_size: self.config.page_size,
            entry_concurrency: self.config.entry_concurrency,
            read_deadline: self.config.read_deadline,
        };
        let reader = StreamReader::new(
            http.urls().clone(),
            PageFetcher::new(http.clone(), span.clone()),
            EntryResolver::new(http.clone(), span.clone()),
            options,
            span.clone(),
        );
        let writer = StreamWriter::new(http, span);

        Ok(EventStoreClient {
            config: self.config,
            reader,
            writer,
        })
    }
}
