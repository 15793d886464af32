//! The finished event record handed to an [`EventSink`](crate::sink::EventSink).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routing::{Environment, Namespace};
use crate::source::EventSource;

/// Open-ended event payload. Values may themselves be JSON documents.
pub type EventDetails = BTreeMap<String, String>;

/// Whether an event was triggered by the user or generated by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Invoker {
    Application,
    User,
}

impl Invoker {
    /// `User` when a source element is present, `Application` otherwise.
    #[must_use]
    pub fn from_source(source: Option<&EventSource>) -> Self {
        if source.is_some() {
            Self::User
        } else {
            Self::Application
        }
    }
}

/// Where the event was produced. OmniLog only ever runs on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Location {
    #[default]
    Client,
}

/// Family of lifecycle call that produced the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Platform,
    Flow,
    Interaction,
    Outcome,
    UserError,
}

/// Experience context copied onto a record at emission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceStamp {
    pub experience_id: Option<Uuid>,
    pub experience_name: Option<String>,
    pub product: Option<Namespace>,
    pub product_variant: Option<String>,
    pub environment: Option<Environment>,
    pub referrer_experience_id: Option<Uuid>,
}

/// Flow context copied onto a record at emission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStamp {
    /// The flow the event is reported against.
    pub flow_name: String,
    /// Current flow id; absent when no flow has started since the last reset.
    pub flow_id: Option<Uuid>,
    /// Step counter at emission.
    pub flow_step: u32,
}

/// A fully enriched analytics event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Capture time of the lifecycle call.
    pub timestamp: DateTime<Utc>,
    /// Event name, e.g. `"Experience Loaded"` or `"signup - Started"`.
    pub event_name: String,
    /// Which family of call produced this record.
    pub category: EventCategory,
    pub invoker: Invoker,
    pub location: Location,
    /// Session active at emission, if any.
    pub session_id: Option<Uuid>,
    #[serde(flatten)]
    pub experience: ExperienceStamp,
    #[serde(flatten)]
    pub flow: Option<FlowStamp>,
    /// The element that triggered the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<EventSource>,
    /// Caller payload merged with engine-derived fields.
    pub payload: EventDetails,
}
