//! Event assembly shared by every lifecycle operation.

use omnilog_core::clock::Clock;
use omnilog_core::event::{EventCategory, EventDetails, EventRecord, FlowStamp, Location};
use omnilog_core::ids::IdGenerator;
use uuid::Uuid;

use crate::domain::context::ContextState;
use crate::domain::options::EventOptions;

/// An event that has a name and inputs but no id, timestamp or context yet.
#[derive(Debug)]
pub(crate) struct Draft {
    name: String,
    category: EventCategory,
    options: EventOptions,
    flow: Option<FlowStamp>,
    extra: EventDetails,
    experience_id: Option<Uuid>,
}

impl Draft {
    pub(crate) fn new(
        name: impl Into<String>,
        category: EventCategory,
        options: EventOptions,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            options,
            flow: None,
            extra: EventDetails::new(),
            experience_id: None,
        }
    }

    pub(crate) fn platform(name: impl Into<String>, options: EventOptions) -> Self {
        Self::new(name, EventCategory::Platform, options)
    }

    pub(crate) fn flow(name: impl Into<String>, options: EventOptions, stamp: FlowStamp) -> Self {
        Self::new(name, EventCategory::Flow, options).with_flow(Some(stamp))
    }

    pub(crate) fn with_flow(mut self, stamp: Option<FlowStamp>) -> Self {
        self.flow = stamp;
        self
    }

    /// Engine-derived payload entry. Overrides a caller entry with the same key.
    pub(crate) fn with_extra(mut self, key: &str, value: impl Into<String>) -> Self {
        self.extra.insert(key.to_owned(), value.into());
        self
    }

    /// Reports against `experience_id` instead of the current experience.
    pub(crate) fn for_experience(mut self, experience_id: Option<Uuid>) -> Self {
        self.experience_id = experience_id;
        self
    }

    /// Generates the event id, captures the timestamp, derives the invoker
    /// and copies the current context onto the record.
    pub(crate) fn assemble(
        self,
        context: &ContextState,
        ids: &mut dyn IdGenerator,
        clock: &dyn Clock,
    ) -> EventRecord {
        let invoker = self.options.invoker();
        let EventOptions {
            source,
            details: mut payload,
        } = self.options;
        payload.extend(self.extra);

        let mut experience = context.experience().stamp();
        if let Some(id) = self.experience_id {
            experience.experience_id = Some(id);
        }

        EventRecord {
            event_id: ids.next_id(),
            timestamp: clock.now(),
            event_name: self.name,
            category: self.category,
            invoker,
            location: Location::Client,
            session_id: context.session_id(),
            experience,
            flow: self.flow,
            source,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use omnilog_core::event::Invoker;
    use omnilog_core::source::{ElementType, EventSource};
    use omnilog_test_support::{FixedClock, SequentialIds};

    #[test]
    fn test_assemble_fills_envelope() {
        // Arrange
        let fixed_now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = FixedClock(fixed_now);
        let mut ids = SequentialIds::starting_at(100);
        let context = ContextState::default();

        // Act
        let record = Draft::platform("Heartbeat", EventOptions::default())
            .assemble(&context, &mut ids, &clock);

        // Assert
        assert_eq!(record.event_id, Uuid::from_u128(100));
        assert_eq!(record.timestamp, fixed_now);
        assert_eq!(record.event_name, "Heartbeat");
        assert_eq!(record.category, EventCategory::Platform);
        assert_eq!(record.invoker, Invoker::Application);
        assert_eq!(record.location, Location::Client);
        assert!(record.flow.is_none());
        assert!(record.payload.is_empty());
    }

    #[test]
    fn test_extras_override_caller_payload() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        let mut ids = SequentialIds::default();
        let options = EventOptions::from_source(EventSource::new(ElementType::Button))
            .with_detail("errorCode", "spoofed")
            .with_detail("method", "email");

        let record = Draft::new("Signup Submitted", EventCategory::Outcome, options)
            .with_extra("errorCode", "0")
            .assemble(&ContextState::default(), &mut ids, &clock);

        assert_eq!(record.invoker, Invoker::User);
        assert_eq!(record.payload.get("errorCode").map(String::as_str), Some("0"));
        assert_eq!(record.payload.get("method").map(String::as_str), Some("email"));
        assert!(record.source.is_some());
    }

    #[test]
    fn test_experience_override_replaces_only_the_id() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        let mut ids = SequentialIds::default();

        let record = Draft::platform("Experience Unloaded", EventOptions::default())
            .for_experience(Some(Uuid::from_u128(55)))
            .assemble(&ContextState::default(), &mut ids, &clock);

        assert_eq!(record.experience.experience_id, Some(Uuid::from_u128(55)));
        assert!(record.experience.referrer_experience_id.is_none());
    }
}
