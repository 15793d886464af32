//! Event sink abstraction.

use std::sync::Arc;

use crate::event::EventRecord;

/// Receives finished event records for transport or storage.
///
/// Delivery has no observable outcome for the caller: an implementation
/// that cannot forward a record handles the failure itself (log, drop,
/// buffer). Implementations must not call back into the engine that feeds
/// them.
pub trait EventSink: Send + Sync {
    /// Takes ownership of one record.
    fn deliver(&self, record: EventRecord);
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn deliver(&self, record: EventRecord) {
        (**self).deliver(record);
    }
}
