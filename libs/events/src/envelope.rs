//! Event envelope - an event's identity plus its payload.

use esfeed_id::EventId;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::EventError;

/// The event envelope.
///
/// The payload is opaque JSON whose schema depends on `event_type`; nothing in
/// this crate inspects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    /// Unique identifier of this event.
    pub event_id: EventId,

    /// The event type (e.g., "order.placed").
    pub event_type: String,

    /// Event-specific payload.
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Creates an envelope with a freshly generated event ID.
    pub fn new(event_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self::with_id(EventId::new(), event_type, payload)
    }

    /// Creates an envelope with an explicit event ID.
    pub fn with_id(
        event_id: EventId,
        event_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            event_id,
            event_type: event_type.into(),
            payload,
        }
    }

    /// Creates an envelope by serializing a typed payload.
    pub fn from_payload<T: Serialize>(
        event_type: impl Into<String>,
        payload: &T,
    ) -> Result<Self, EventError> {
        let event_type = event_type.into();
        let payload =
            serde_json::to_value(payload).map_err(|e| EventError::InvalidPayload {
                event_type: event_type.clone(),
                message: e.to_string(),
            })?;
        Ok(Self::new(event_type, payload))
    }

    /// Deserializes the payload into a concrete event type.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, EventError> {
        serde_json::from_value(self.payload.clone()).map_err(|e| EventError::InvalidPayload {
            event_type: self.event_type.clone(),
            message: e.to_string(),
        })
    }
}
