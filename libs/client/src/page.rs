//! Page fetcher - downloads and parses one feed page.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Url;
use tracing::{debug, error, trace, Span};

use crate::error::ClientError;
use crate::feed::{FeedPage, ATOM_JSON};
use crate::http::StoreHttp;

/// Source of feed pages.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetches and parses the page at `url`.
    async fn fetch_page(&self, url: &Url) -> Result<FeedPage, ClientError>;
}

/// Fetches feed pages over HTTP.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    http: StoreHttp,
    span: Span,
}

impl PageFetcher {
    pub fn new(http: StoreHttp, span: Span) -> Self {
        Self { http, span }
    }
}

#[async_trait]
impl FeedSource for PageFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<FeedPage, ClientError> {
        debug!(parent: &self.span, url = %url, "Fetching feed page");

        let response = self
            .http
            .client()
            .get(url.clone())
            .header(ACCEPT, ATOM_JSON)
            .send()
            .await
            .map_err(|e| {
                error!(parent: &self.span, url = %url, error = %e, "Feed page request failed");
                ClientError::transport(url, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(parent: &self.span, url = %url, status = %status, "Unexpected feed page status");
            return Err(ClientError::UnexpectedStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::transport(url, e))?;
        let page = FeedPage::parse(url, &body)?;

        for (relation, href) in page.links.iter() {
            trace!(parent: &self.span, relation, href = %href, "Link");
        }
        debug!(
            parent: &self.span,
            url = %url,
            entry_count = page.entries.len(),
            has_next = !page.is_last(),
            "Fetched feed page"
        );

        Ok(page)
    }
}
