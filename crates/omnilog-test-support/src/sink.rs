//! Sink double that records every delivered event.

use std::sync::Mutex;

use omnilog_core::event::EventRecord;
use omnilog_core::sink::EventSink;

/// An event sink that keeps every record it receives, in delivery order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<EventRecord>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all delivered records.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn records(&self) -> Vec<EventRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Returns the names of all delivered records, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn event_names(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.event_name.clone())
            .collect()
    }

    /// Returns the most recently delivered record.
    ///
    /// # Panics
    ///
    /// Panics if nothing has been delivered yet or the mutex is poisoned.
    pub fn last(&self) -> EventRecord {
        self.records
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("RecordingSink has not received any records")
    }
}

impl EventSink for RecordingSink {
    fn deliver(&self, record: EventRecord) {
        self.records.lock().unwrap().push(record);
    }
}
