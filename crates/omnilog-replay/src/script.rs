//! YAML script schema.
//!
//! ```yaml
//! steps:
//!   - call: experience_loaded
//!     routing: { ns: HOUZZ, sitename: HOUZZ_US, environment: PRODUCTION, experience: home }
//!   - call: flow_started
//!     flow: signup
//!     source: { elementType: button, elementLabel: Sign up, inputType: click }
//! ```

use omnilog_context::{EventLogger, EventOptions};
use omnilog_core::event::EventDetails;
use omnilog_core::routing::RoutingDescriptor;
use omnilog_core::source::EventSource;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;

/// A sequence of lifecycle calls.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    /// Parses a script document.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Script` if the document does not match the schema.
    pub fn from_yaml(raw: &str) -> Result<Self, AppError> {
        Ok(serde_yaml::from_str(raw)?)
    }
}

/// One lifecycle call. `call` selects the operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum Step {
    ExperienceLoaded {
        routing: RoutingDescriptor,
        #[serde(default)]
        experience_id: Option<Uuid>,
        #[serde(default)]
        source: Option<EventSource>,
    },
    ExperienceUnloaded {
        routing: RoutingDescriptor,
        #[serde(default)]
        experience_id: Option<Uuid>,
        #[serde(default)]
        source: Option<EventSource>,
    },
    AppStarted {
        #[serde(default)]
        source: Option<EventSource>,
    },
    AppStopped {
        #[serde(default)]
        source: Option<EventSource>,
    },
    SessionStarted,
    SessionEnded,
    AbRegistered {
        test_name: String,
        test_variant_id: String,
    },
    Heartbeat,
    ResetFlows,
    FlowStarted {
        flow: String,
        #[serde(default)]
        details: EventDetails,
        #[serde(default)]
        source: Option<EventSource>,
    },
    FlowCompleted {
        flow: String,
        #[serde(default)]
        details: EventDetails,
        #[serde(default)]
        source: Option<EventSource>,
    },
    FlowAbandoned {
        flow: String,
    },
    FlowStepLoaded {
        flow: String,
        step: String,
        #[serde(default)]
        details: EventDetails,
        #[serde(default)]
        source: Option<EventSource>,
    },
    FlowStepUnloaded {
        flow: String,
        step: String,
        #[serde(default)]
        details: EventDetails,
        #[serde(default)]
        source: Option<EventSource>,
    },
    FlowStepCompleted {
        flow: String,
        step: String,
        #[serde(default)]
        details: EventDetails,
        #[serde(default)]
        source: Option<EventSource>,
    },
    Interaction {
        event: String,
        #[serde(default)]
        source: Option<EventSource>,
    },
    UserError {
        event: String,
        #[serde(default)]
        details: EventDetails,
        #[serde(default)]
        source: Option<EventSource>,
    },
    Outcome {
        event: String,
        #[serde(default)]
        details: EventDetails,
        #[serde(default)]
        error_code: i32,
        #[serde(default)]
        error_message: Option<String>,
    },
}

fn options(source: Option<&EventSource>, details: &EventDetails) -> EventOptions {
    EventOptions {
        source: source.cloned(),
        details: details.clone(),
    }
}

impl Step {
    /// Issues this call against `logger`.
    pub fn apply<L: EventLogger + ?Sized>(&self, logger: &L) {
        match self {
            Self::ExperienceLoaded {
                routing,
                experience_id,
                source,
            } => logger.experience_loaded(routing, *experience_id, source.clone().into()),
            Self::ExperienceUnloaded {
                routing,
                experience_id,
                source,
            } => logger.experience_unloaded(routing, *experience_id, source.clone().into()),
            Self::AppStarted { source } => logger.app_started(source.clone().into()),
            Self::AppStopped { source } => logger.app_stopped(source.clone().into()),
            Self::SessionStarted => logger.session_started(),
            Self::SessionEnded => logger.session_ended(),
            Self::AbRegistered {
                test_name,
                test_variant_id,
            } => logger.ab_registered(test_name, test_variant_id),
            Self::Heartbeat => logger.heartbeat(),
            Self::ResetFlows => logger.reset_flows(),
            Self::FlowStarted {
                flow,
                details,
                source,
            } => logger.flow_started(flow, options(source.as_ref(), details)),
            Self::FlowCompleted {
                flow,
                details,
                source,
            } => logger.flow_completed(flow, options(source.as_ref(), details)),
            Self::FlowAbandoned { flow } => logger.flow_abandoned(flow),
            Self::FlowStepLoaded {
                flow,
                step,
                details,
                source,
            } => logger.flow_step_loaded(flow, step, options(source.as_ref(), details)),
            Self::FlowStepUnloaded {
                flow,
                step,
                details,
                source,
            } => logger.flow_step_unloaded(flow, step, options(source.as_ref(), details)),
            Self::FlowStepCompleted {
                flow,
                step,
                details,
                source,
            } => logger.flow_step_completed(flow, step, options(source.as_ref(), details)),
            Self::Interaction { event, source } => {
                logger.send_interaction_event(event, source.clone());
            }
            Self::UserError {
                event,
                details,
                source,
            } => logger.send_user_error(event, options(source.as_ref(), details)),
            Self::Outcome {
                event,
                details,
                error_code,
                error_message,
            } => logger.send_outcome_event(
                event,
                details.clone(),
                *error_code,
                error_message.as_deref(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnilog_core::routing::Namespace;
    use omnilog_core::source::ElementType;

    #[test]
    fn test_parses_every_step_shape() {
        // Arrange
        let raw = r"
steps:
  - call: experience_loaded
    routing: { ns: IVY, sitename: IVY_US, environment: DEV, experience: home }
  - call: session_started
  - call: flow_started
    flow: signup
    source: { elementType: button }
  - call: flow_step_completed
    flow: signup
    step: email
    details: { email: a@example.com }
  - call: outcome
    event: Signup Submitted
    error_code: 3
    error_message: rate limited
  - call: heartbeat
";

        // Act
        let script = Script::from_yaml(raw).unwrap();

        // Assert
        assert_eq!(script.steps.len(), 6);
        match &script.steps[0] {
            Step::ExperienceLoaded {
                routing,
                experience_id,
                source,
            } => {
                assert_eq!(routing.namespace, Namespace::Ivy);
                assert!(experience_id.is_none());
                assert!(source.is_none());
            }
            other => panic!("expected ExperienceLoaded, got {other:?}"),
        }
        match &script.steps[2] {
            Step::FlowStarted {
                source: Some(s),
                ..
            } => {
                assert_eq!(s.element_type, ElementType::Button);
            }
            other => panic!("expected FlowStarted with source, got {other:?}"),
        }
        match &script.steps[4] {
            Step::Outcome {
                error_code,
                error_message,
                details,
                ..
            } => {
                assert_eq!(*error_code, 3);
                assert_eq!(error_message.as_deref(), Some("rate limited"));
                assert!(details.is_empty());
            }
            other => panic!("expected Outcome, got {other:?}"),
        }
        assert!(matches!(script.steps[5], Step::Heartbeat));
    }

    #[test]
    fn test_unknown_call_is_rejected() {
        let result = Script::from_yaml("steps:\n  - call: teleport\n");
        assert!(matches!(result, Err(AppError::Script(_))));
    }
}
