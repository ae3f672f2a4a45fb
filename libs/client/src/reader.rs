//! Stream reader - rebuilds a stream's full history from its paged feed.
//!
//! The store serves streams backward: the head page holds the newest
//! entries, newest first, and each page's `next` link points at the page of
//! older entries. The reader walks that chain until a page has no `next`
//! link, resolves every entry into its full event, and returns the events
//! oldest first.
//!
//! # Invariants
//!
//! - Every entry of every page appears exactly once in the result
//! - Result order depends only on feed order, never on fetch completion order
//! - Any failure aborts the read; no partial history is returned

use std::collections::HashSet;
use std::time::Duration;

use esfeed_events::EventEnvelope;
use esfeed_id::StreamId;
use futures_util::stream::{self, StreamExt};
use reqwest::Url;
use tracing::{debug, info, warn, Span};

use crate::error::ClientError;
use crate::feed::FeedPage;
use crate::http::StoreUrls;
use crate::page::{FeedSource, PageFetcher};
use crate::resolver::{EntryResolver, EntrySource};

/// Resolution of one entry, remembered with its position on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryJob {
    pub index: usize,
    pub url: Url,
}

/// Reader settings taken from the client configuration.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    pub page_size: u32,
    pub entry_concurrency: usize,
    pub read_deadline: Option<Duration>,
}

/// Drives pagination over a stream's feed.
#[derive(Debug, Clone)]
pub struct StreamReader<F = PageFetcher, R = EntryResolver> {
    urls: StoreUrls,
    pages: F,
    entries: R,
    options: ReadOptions,
    span: Span,
}

impl<F: FeedSource, R: EntrySource> StreamReader<F, R> {
    pub fn new(urls: StoreUrls, pages: F, entries: R, options: ReadOptions, span: Span) -> Self {
        Self {
            urls,
            pages,
            entries,
            options,
            span,
        }
    }

    /// Reads the whole stream, oldest event first.
    pub async fn open_stream(&self, stream: &StreamId) -> Result<Vec<EventEnvelope>, ClientError> {
        match self.options.read_deadline {
            Some(after) => tokio::time::timeout(after, self.read_all(stream))
                .await
                .map_err(|_| {
                    warn!(parent: &self.span, stream_id = %stream, ?after, "Stream read deadline exceeded");
                    ClientError::DeadlineExceeded {
                        stream_id: stream.to_string(),
                        after,
                    }
                })?,
            None => self.read_all(stream).await,
        }
    }

    async fn read_all(&self, stream: &StreamId) -> Result<Vec<EventEnvelope>, ClientError> {
        let head = self.urls.head(stream, self.options.page_size);
        debug!(parent: &self.span, stream_id = %stream, url = %head, "Opening stream");

        let mut newest_first = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(head);
        let mut page_number = 0;

        while let Some(url) = next.take() {
            page_number += 1;

            if !visited.insert(url.clone()) {
                warn!(parent: &self.span, stream_id = %stream, url = %url, "Feed links back to a visited page");
                return Err(ClientError::PaginationCycle {
                    url: url.to_string(),
                });
            }

            let page = self
                .pages
                .fetch_page(&url)
                .await
                .map_err(|e| e.at_page(page_number, &url))?;

            let events = self.resolve_page(page_number, &page).await?;
            newest_first.extend(events);

            next = page.links.next().cloned();
        }

        // Pages and their entries arrive newest first.
        newest_first.reverse();

        info!(
            parent: &self.span,
            stream_id = %stream,
            page_count = page_number,
            event_count = newest_first.len(),
            "Read stream"
        );

        Ok(newest_first)
    }

    /// Resolves every entry of a page, keeping the page's entry order.
    async fn resolve_page(
        &self,
        page_number: usize,
        page: &FeedPage,
    ) -> Result<Vec<EventEnvelope>, ClientError> {
        let jobs = page
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryJob {
                index,
                url: entry.detail_url.clone(),
            });

        let mut slots: Vec<Option<EventEnvelope>> = std::iter::repeat_with(|| None)
            .take(page.entries.len())
            .collect();

        let mut resolved = stream::iter(jobs)
            .map(|job| async move {
                let result = self.entries.resolve_entry(&job.url).await;
                (job, result)
            })
            .buffer_unordered(self.options.entry_concurrency.max(1));

        // Returning early drops the remaining in-flight resolutions.
        while let Some((job, result)) = resolved.next().await {
            let envelope = result.map_err(|e| e.at_entry(page_number, job.index, &job.url))?;
            slots[job.index] = Some(envelope);
        }

        debug!(
            parent: &self.span,
            page = page_number,
            url = %page.url,
            entry_count = slots.len(),
            "Resolved feed page"
        );

        Ok(slots.into_iter().flatten().collect())
    }
}
