//! Fire-and-forget sink backed by a tokio channel.

use omnilog_core::event::EventRecord;
use omnilog_core::sink::EventSink;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;

/// Queues records on an unbounded channel. Sending never blocks, so the
/// engine can deliver while holding its state lock; the receiving half is
/// drained by an async task.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<EventRecord>,
}

impl ChannelSink {
    /// Creates a sink and the receiver that consumes its records.
    #[must_use]
    pub fn new() -> (Self, UnboundedReceiver<EventRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn deliver(&self, record: EventRecord) {
        if let Err(mpsc::error::SendError(record)) = self.tx.send(record) {
            warn!(
                event_id = %record.event_id,
                event_name = %record.event_name,
                "event receiver closed; dropping event"
            );
        }
    }
}
