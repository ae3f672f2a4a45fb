//! Event sources - the things that produce a new stream's first events.

use esfeed_id::{EventSourceId, StreamId};

use crate::EventEnvelope;

/// Something whose uncommitted events make up a new stream.
pub trait EventSource {
    /// Identity of the source; the stream is named after it.
    fn id(&self) -> EventSourceId;

    /// Events in the order they were raised.
    fn events(&self) -> &[EventEnvelope];

    /// Stream the events belong to.
    fn stream_id(&self) -> StreamId {
        StreamId::from(self.id())
    }
}
