//! # esfeed-events
//!
//! Event envelopes and their wire representation.
//!
//! ## Design Principles
//!
//! - Envelopes are immutable records of something that happened
//! - Payloads are opaque JSON and pass through the codec unchanged
//! - Every envelope carries its own identity (`event_id`) and type name
//!
//! ## Wire Format
//!
//! Streams are created by posting a JSON array of wire records:
//!
//! ```json
//! [
//!   {
//!     "eventId": "1b826790-5d4e-4227-7dc4-017ed73d30ac",
//!     "eventType": "order.placed",
//!     "data": {
//!       "eventId": "1b826790-5d4e-4227-7dc4-017ed73d30ac",
//!       "eventType": "order.placed",
//!       "payload": { "total": 42 }
//!     }
//!   }
//! ]
//! ```
//!
//! The store hands the `data` member back verbatim when an individual event
//! is fetched as `application/json`, so reads decode a bare envelope.

mod codec;
mod envelope;
mod error;
mod source;

pub use codec::{decode, decode_envelope, encode, encode_batch, Event};
pub use envelope::EventEnvelope;
pub use error::EventError;
pub use source::EventSource;

pub use esfeed_id::{EventId, EventSourceId, StreamId};
