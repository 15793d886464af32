//! Per-call options shared by the lifecycle operations.

use omnilog_core::event::{EventDetails, Invoker};
use omnilog_core::source::EventSource;

/// The optional inputs of a lifecycle call.
///
/// `EventOptions::default()` describes an application-generated event with
/// an empty payload. Supplying a source marks the event as user-invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOptions {
    /// The UI element that triggered the call.
    pub source: Option<EventSource>,
    /// Caller payload.
    pub details: EventDetails,
}

impl EventOptions {
    /// Options for a user-triggered call.
    #[must_use]
    pub fn from_source(source: EventSource) -> Self {
        Self {
            source: Some(source),
            details: EventDetails::new(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: EventSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Replaces the payload wholesale.
    #[must_use]
    pub fn with_details(mut self, details: EventDetails) -> Self {
        self.details = details;
        self
    }

    /// Adds one payload entry.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn invoker(&self) -> Invoker {
        Invoker::from_source(self.source.as_ref())
    }
}

impl From<EventSource> for EventOptions {
    fn from(source: EventSource) -> Self {
        Self::from_source(source)
    }
}

impl From<Option<EventSource>> for EventOptions {
    fn from(source: Option<EventSource>) -> Self {
        Self {
            source,
            details: EventDetails::new(),
        }
    }
}
