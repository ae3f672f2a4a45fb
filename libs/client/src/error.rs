//! Error types for the event store client.

use std::time::Duration;

use esfeed_events::EventError;
use reqwest::{StatusCode, Url};
use thiserror::Error;

use crate::config::ConfigError;

/// Broad classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection, DNS, timeout or body transfer failure.
    Transport,
    /// The store answered with a status the operation does not accept.
    UnexpectedStatus,
    /// A feed page or event body did not have the expected structure.
    Decode,
    /// The store broke the paging protocol.
    Protocol,
    /// The caller or configuration supplied something unusable.
    InvalidInput,
}

/// Event store client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected http status code in response from {url}: {status}")]
    UnexpectedStatus { url: String, status: StatusCode },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("feed entry {entry} has no {relation:?} link")]
    MissingLink { entry: String, relation: &'static str },

    #[error("feed link {href:?} on {url} is not a valid URL: {message}")]
    InvalidLink {
        url: String,
        href: String,
        message: String,
    },

    #[error("page link {url} was already visited")]
    PaginationCycle { url: String },

    #[error("reading stream {stream_id} exceeded {after:?}")]
    DeadlineExceeded { stream_id: String, after: Duration },

    #[error("refusing to create stream {stream_id} without events")]
    EmptyBatch { stream_id: String },

    #[error("failed to encode events: {0}")]
    Encode(#[source] EventError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("page {page} ({url}): {source}")]
    Page {
        page: usize,
        url: String,
        #[source]
        source: Box<ClientError>,
    },

    #[error("entry {index} of page {page} ({url}): {source}")]
    Entry {
        page: usize,
        index: usize,
        url: String,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    pub(crate) fn transport(url: &Url, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn decode(url: &Url, message: impl ToString) -> Self {
        Self::Decode {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    /// Attaches the 1-based page number a failure happened on.
    pub(crate) fn at_page(self, page: usize, url: &Url) -> Self {
        match self {
            err @ (Self::Page { .. } | Self::Entry { .. }) => err,
            err => Self::Page {
                page,
                url: url.to_string(),
                source: Box::new(err),
            },
        }
    }

    /// Attaches the page number and entry position a resolution failed at.
    pub(crate) fn at_entry(self, page: usize, index: usize, url: &Url) -> Self {
        Self::Entry {
            page,
            index,
            url: url.to_string(),
            source: Box::new(self),
        }
    }

    /// Classifies the error, looking through page and entry context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } | Self::HttpClient(_) | Self::DeadlineExceeded { .. } => {
                ErrorKind::Transport
            }
            Self::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Self::Decode { .. } | Self::MissingLink { .. } | Self::InvalidLink { .. } => {
                ErrorKind::Decode
            }
            Self::PaginationCycle { .. } => ErrorKind::Protocol,
            Self::EmptyBatch { .. } | Self::Encode(_) | Self::Config(_) => ErrorKind::InvalidInput,
            Self::Page { source, .. } | Self::Entry { source, .. } => source.kind(),
        }
    }

    /// HTTP status of an unexpected response, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Page { source, .. } | Self::Entry { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Page number the failure happened on, if it happened while reading.
    pub fn page(&self) -> Option<usize> {
        match self {
            Self::Page { page, .. } | Self::Entry { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Position of the failing entry within its page.
    pub fn entry_index(&self) -> Option<usize> {
        match self {
            Self::Entry { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Returns true if the store reported the stream does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
