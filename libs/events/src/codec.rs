//! Wire records and the batch codec.

use esfeed_id::EventId;
use serde::{Deserialize, Serialize};

use crate::{EventEnvelope, EventError};

/// One wire record of a stream creation batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_id: EventId,
    pub event_type: String,
    pub data: EventEnvelope,
}

impl From<&EventEnvelope> for Event {
    fn from(envelope: &EventEnvelope) -> Self {
        Self {
            event_id: envelope.event_id,
            event_type: envelope.event_type.clone(),
            data: envelope.clone(),
        }
    }
}

impl Event {
    /// Unwraps the envelope, checking that the record's identity matches it.
    pub fn into_envelope(self) -> Result<EventEnvelope, EventError> {
        if self.event_id != self.data.event_id || self.event_type != self.data.event_type {
            return Err(EventError::Mismatch {
                record_id: self.event_id,
                record_type: self.event_type,
                envelope_id: self.data.event_id,
                envelope_type: self.data.event_type,
            });
        }
        Ok(self.data)
    }
}

/// Wraps each envelope in a wire record, preserving order.
pub fn encode(events: &[EventEnvelope]) -> Vec<Event> {
    events.iter().map(Event::from).collect()
}

/// Encodes a batch as the JSON array body of a stream creation request.
pub fn encode_batch(events: &[EventEnvelope]) -> Result<Vec<u8>, EventError> {
    serde_json::to_vec(&encode(events)).map_err(|e| EventError::Serialization(e.to_string()))
}

/// Decodes one serialized wire record.
pub fn decode(record: &[u8]) -> Result<EventEnvelope, EventError> {
    let event: Event =
        serde_json::from_slice(record).map_err(|e| EventError::Decode(e.to_string()))?;
    event.into_envelope()
}

/// Decodes a bare envelope, the shape the store serves for a single event.
pub fn decode_envelope(body: &[u8]) -> Result<EventEnvelope, EventError> {
    serde_json::from_slice(body).map_err(|e| EventError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn sample(event_type: &str, n: u64) -> EventEnvelope {
        EventEnvelope::new(event_type, json!({"n": n}))
    }

    #[test]
    fn test_encode_preserves_order_and_fields() {
        let events = vec![sample("a", 1), sample("b", 2), sample("c", 3)];
        let records = encode(&events);

        assert_eq!(records.len(), 3);
        for (record, envelope) in records.iter().zip(&events) {
            assert_eq!(record.event_id, envelope.event_id);
            assert_eq!(record.event_type, envelope.event_type);
            assert_eq!(&record.data, envelope);
        }
    }

    #[test]
    fn test_encode_batch_wire_shape() {
        let envelope = sample("order.placed", 7);
        let body = encode_batch(std::slice::from_ref(&envelope)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        let id = envelope.event_id.to_string();
        assert_eq!(
            value,
            json!([{
                "eventId": id,
                "eventType": "order.placed",
                "data": {"eventId": id, "eventType": "order.placed", "payload": {"n": 7}}
            }])
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode(b"{\"eventId\": 12}").unwrap_err();
        assert!(matches!(err, EventError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_identity_mismatch() {
        let mut record = Event::from(&sample("a", 1));
        record.event_type = "b".to_string();
        let bytes = serde_json::to_vec(&record).unwrap();

        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, EventError::Mismatch { .. }));
        assert!(err.is_decode());
    }

    #[test]
    fn test_decode_envelope_missing_payload() {
        let body = json!({"eventId": EventId::new(), "eventType": "a"});
        let err = decode_envelope(&serde_json::to_vec(&body).unwrap()).unwrap_err();
        assert!(err.is_decode());
    }

    fn arb_payload() -> impl Strategy<Value = serde_json::Value> {
        let leaf = prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::from),
            any::<i64>().prop_map(serde_json::Value::from),
            "[a-z0-9 ]{0,12}".prop_map(serde_json::Value::from),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::from),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_wire_record_roundtrip(
            bytes in any::<[u8; 16]>(),
            event_type in "[a-z]{1,8}\\.[a-z_]{1,12}",
            payload in arb_payload(),
        ) {
            let id = EventId::from_uuid(esfeed_id::Uuid::from_bytes(bytes));
            let envelope = EventEnvelope::with_id(id, event_type, payload);

            let record = serde_json::to_vec(&Event::from(&envelope)).unwrap();
            let decoded = decode(&record).unwrap();
            prop_assert_eq!(decoded, envelope);
        }

        #[test]
        fn prop_batch_preserves_order_length_and_fields(
            events in prop::collection::vec(
                ("[a-z]{1,8}\\.[a-z_]{1,12}", arb_payload())
                    .prop_map(|(event_type, payload)| EventEnvelope::new(event_type, payload)),
                1..16,
            ),
        ) {
            let body = encode_batch(&events).unwrap();
            let records: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();

            prop_assert_eq!(records.len(), events.len());
            for (record, envelope) in records.iter().zip(&events) {
                let bytes = serde_json::to_vec(record).unwrap();
                prop_assert_eq!(&decode(&bytes).unwrap(), envelope);
                prop_assert_eq!(&record["eventId"], &serde_json::json!(envelope.event_id));
                prop_assert_eq!(&record["eventType"], &serde_json::json!(envelope.event_type));
            }
        }
    }
}
