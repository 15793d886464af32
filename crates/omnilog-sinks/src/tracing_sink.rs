//! Sink that writes each record to the `tracing` log.

use omnilog_core::event::EventRecord;
use omnilog_core::sink::EventSink;
use tracing::{info, warn};

/// Log target used for delivered records, so they can be filtered apart
/// from diagnostics.
pub const EVENT_TARGET: &str = "omnilog::event";

/// Emits every record as an `info` event on [`EVENT_TARGET`], with the
/// serialized record in the `record` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn deliver(&self, record: EventRecord) {
        match serde_json::to_string(&record) {
            Ok(json) => info!(
                target: EVENT_TARGET,
                event_id = %record.event_id,
                event_name = %record.event_name,
                record = %json,
                "event"
            ),
            Err(e) => warn!(event_id = %record.event_id, error = %e, "failed to serialize event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use omnilog_core::event::{EventCategory, EventDetails, ExperienceStamp, Invoker, Location};
    use uuid::Uuid;

    #[test]
    fn test_deliver_without_subscriber_is_silent() {
        let record = EventRecord {
            event_id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
            event_name: "App Stopped".to_owned(),
            category: EventCategory::Platform,
            invoker: Invoker::Application,
            location: Location::Client,
            session_id: None,
            experience: ExperienceStamp::default(),
            flow: None,
            source: None,
            payload: EventDetails::new(),
        };

        TracingSink.deliver(record);
    }
}
