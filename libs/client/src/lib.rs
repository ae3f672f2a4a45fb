//! # esfeed-client
//!
//! Client for an append-only event store served over HTTP as paged feeds.
//!
//! ## Operations
//!
//! - [`EventStoreClient::create_stream`] posts a stream's first events in one
//!   request; only `201 Created` counts as success
//! - [`EventStoreClient::open_stream`] rebuilds a stream's history by walking
//!   its feed from the head page through `next` links, resolving every entry
//!   into its full event
//!
//! ## Components
//!
//! - [`PageFetcher`]: downloads and parses one feed page
//! - [`EntryResolver`]: fetches the event behind one feed entry
//! - [`StreamReader`]: pagination over any [`FeedSource`] and [`EntrySource`]
//! - [`StreamWriter`]: stream creation
//!
//! Every component logs under a `tracing` span handed to it at construction.

mod client;
mod config;
mod error;
pub mod feed;
mod http;
mod page;
mod reader;
mod resolver;
mod writer;

pub use client::{EventStoreClient, EventStoreClientBuilder};
pub use config::{ClientConfig, ConfigError, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use error::{ClientError, ErrorKind};
pub use feed::{EntryRef, FeedPage, NavigationLinks};
pub use http::{StoreHttp, StoreUrls};
pub use page::{FeedSource, PageFetcher};
pub use reader::{EntryJob, ReadOptions, StreamReader};
pub use resolver::{EntryResolver, EntrySource};
pub use writer::{StreamCreated, StreamWriter};

pub use reqwest::Url;
