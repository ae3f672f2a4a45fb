//! Client configuration.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Default number of entries requested per feed page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page the store will serve.
pub const MAX_PAGE_SIZE: u32 = 4096;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("page size must be between 1 and 4096, got {0}")]
    InvalidPageSize(u32),

    #[error("entry concurrency must be at least 1")]
    ZeroConcurrency,
}

/// Event store client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Store base URL (example: http://127.0.0.1:2113).
    pub base_url: Url,

    /// Entries per feed page.
    pub page_size: u32,

    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,

    /// Entries of one page resolved at the same time. 1 means strictly sequential.
    pub entry_concurrency: usize,

    /// Upper bound for a whole stream read.
    pub read_deadline: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration with defaults for everything but the base URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        let config = Self {
            base_url,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            entry_concurrency: 1,
            read_deadline: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_entry_concurrency(mut self, concurrency: usize) -> Self {
        self.entry_concurrency = concurrency;
        self
    }

    pub fn with_read_deadline(mut self, deadline: Duration) -> Self {
        self.read_deadline = Some(deadline);
        self
    }

    /// Checks the values the client relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            });
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }

        if self.entry_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        Ok(())
    }
}
