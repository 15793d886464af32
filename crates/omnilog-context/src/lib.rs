//! Experience and flow context engine for OmniLog.
//!
//! Tracks which experience the user is on and which (possibly nested)
//! flows are in progress, and stamps every lifecycle call with the derived
//! identifiers before handing it to an event sink.

pub mod application;
pub mod domain;

pub use application::capabilities::{
    EventLogger, FlowEvents, InteractionEvents, OutcomeEvents, PlatformEvents, PlatformOnly,
};
pub use application::omnilog::{OmniLog, OmniLogBuilder};
pub use domain::options::EventOptions;
