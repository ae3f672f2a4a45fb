//! Shared HTTP plumbing: the reqwest client and store URL layout.

use esfeed_id::StreamId;
use reqwest::Url;

use crate::config::{ClientConfig, ConfigError};
use crate::error::ClientError;

/// Builds the store's resource URLs from its base URL.
#[derive(Debug, Clone)]
pub struct StoreUrls {
    base_url: Url,
}

impl StoreUrls {
    /// Rejects base URLs that cannot carry a path, such as `mailto:` URLs.
    pub fn new(base_url: Url) -> Result<Self, ConfigError> {
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            });
        }
        Ok(Self { base_url })
    }

    /// `{base}/streams/{stream}`, the stream creation endpoint.
    pub fn stream(&self, stream: &StreamId) -> Url {
        self.with_segments(&["streams", stream.as_str()])
    }

    /// `{base}/streams/{stream}/head/backward/{page_size}`, the newest page.
    pub fn head(&self, stream: &StreamId, page_size: u32) -> Url {
        let page_size = page_size.to_string();
        self.with_segments(&["streams", stream.as_str(), "head", "backward", &page_size])
    }

    // Each segment is percent-encoded on its own, so a '/' inside a stream
    // name cannot introduce an extra path level. `new` guarantees the base
    // URL has path segments.
    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// HTTP client shared by the fetchers and the writer.
///
/// Clone is cheap; reqwest pools connections behind an `Arc`.
#[derive(Debug, Clone)]
pub struct StoreHttp {
    client: reqwest::Client,
    urls: StoreUrls,
}

impl StoreHttp {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ClientError::HttpClient)?;

        Ok(Self {
            client,
            urls: StoreUrls::new(config.base_url.clone())?,
        })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn urls(&self) -> &StoreUrls {
        &self.urls
    }
}
