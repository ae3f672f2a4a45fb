//! Typed ID definitions for events and streams.

use crate::define_uuid_id;
use crate::IdError;

// =============================================================================
// Events
// =============================================================================

define_uuid_id!(EventId);

// =============================================================================
// Event Sources
// =============================================================================

define_uuid_id!(EventSourceId);

// =============================================================================
// Streams
// =============================================================================

/// Name of a stream on the store.
///
/// Any non-blank string is accepted. Most streams are named after the
/// event source that produced them (see `From<EventSourceId>`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreamId(String);

impl StreamId {
    /// Parses a stream ID, rejecting empty and whitespace-only input.
    pub fn parse(s: impl Into<String>) -> Result<Self, IdError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(s))
    }

    /// Returns the stream name exactly as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for StreamId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<EventSourceId> for StreamId {
    fn from(id: EventSourceId) -> Self {
        Self(id.to_string())
    }
}

impl From<&EventSourceId> for StreamId {
    fn from(id: &EventSourceId) -> Self {
        Self(id.to_string())
    }
}

impl From<&StreamId> for StreamId {
    fn from(id: &StreamId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for StreamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for StreamId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for StreamId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_event_id_roundtrip() {
        let id = EventId::new();
        let s = id.to_string();
        let parsed: EventId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_event_id_hyphenated_lowercase() {
        let id: EventId = "1B826790-5D4E-4227-7DC4-017ED73D30AC".parse().unwrap();
        assert_eq!(id.to_string(), "1b826790-5d4e-4227-7dc4-017ed73d30ac");
    }

    #[test]
    fn test_event_id_empty() {
        let result: Result<EventId, _> = "".parse();
        assert!(matches!(result.unwrap_err(), IdError::Empty));
    }

    #[test]
    fn test_event_id_invalid_uuid() {
        let result: Result<EventId, _> = "not-a-uuid".parse();
        assert!(matches!(result.unwrap_err(), IdError::InvalidUuid(_)));
    }

    #[test]
    fn test_event_id_json_roundtrip() {
        let id = EventId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let parsed: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_event_id_rejects_non_uuid_json() {
        let result: Result<EventId, _> = serde_json::from_str("\"evt-1\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_stream_id_from_event_source() {
        let source = EventSourceId::new();
        let stream = StreamId::from(source);
        assert_eq!(stream.as_str(), source.to_string());
    }

    #[test]
    fn test_stream_id_rejects_blank() {
        assert!(StreamId::parse("").unwrap_err().is_empty());
        assert!(StreamId::parse("   ").unwrap_err().is_empty());
    }

    #[test]
    fn test_stream_id_keeps_raw_text() {
        let stream: StreamId = "orders/42".parse().unwrap();
        assert_eq!(stream.to_string(), "orders/42");
    }

    #[test]
    fn test_stream_id_deserialize_rejects_blank() {
        let result: Result<StreamId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_event_source_id_parse_format(bytes in any::<[u8; 16]>()) {
            let id = EventSourceId::from_uuid(crate::Uuid::from_bytes(bytes));
            let parsed = EventSourceId::parse(&id.to_string()).unwrap();
            prop_assert_eq!(id, parsed);
        }
    }
}
