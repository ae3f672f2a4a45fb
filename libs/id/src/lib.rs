//! # esfeed-id
//!
//! Typed identifiers for events, event sources and streams.
//!
//! ## Design Principles
//!
//! - Event and event source IDs are UUIDs, the identity the store expects
//! - Stream IDs are free-form labels, usually derived from an event source
//! - IDs are typed to prevent mixing an event ID with a source ID
//! - IDs roundtrip through their string form (parse → format → parse)
//!
//! ## ID Format
//!
//! UUID-backed IDs use the canonical hyphenated form:
//! - `1b826790-5d4e-4227-7dc4-017ed73d30ac`
//!
//! Stream IDs are any non-blank string. They are percent-encoded as a single
//! URL path segment when addressed on the store, so `orders/42` is sent as
//! `orders%2F42`.

mod error;
mod macros;
mod types;

pub use error::IdError;
pub use types::*;

/// Re-export uuid for consumers that need raw UUID operations
pub use uuid::Uuid;
