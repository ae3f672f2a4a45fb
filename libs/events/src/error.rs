//! Error types for event encoding and decoding.

use esfeed_id::EventId;
use thiserror::Error;

/// Errors that can occur when handling events.
#[derive(Debug, Error, Clone)]
pub enum EventError {
    /// The record could not be decoded into the expected structure.
    #[error("decode error: {0}")]
    Decode(String),

    /// The batch could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The event payload does not match the requested type.
    #[error("invalid event payload for {event_type}: {message}")]
    InvalidPayload { event_type: String, message: String },

    /// The wire record's identity disagrees with the envelope it carries.
    #[error("wire record {record_id} ({record_type}) carries envelope {envelope_id} ({envelope_type})")]
    Mismatch {
        record_id: EventId,
        record_type: String,
        envelope_id: EventId,
        envelope_type: String,
    },
}

impl EventError {
    /// Returns true if the input could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, EventError::Decode(_) | EventError::Mismatch { .. })
    }
}
