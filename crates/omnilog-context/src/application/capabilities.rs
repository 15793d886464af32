//! The caller-facing logging contract, split by capability.
//!
//! [`PlatformEvents`] is the contract every logger must honour. Flow,
//! interaction and outcome reporting are separate capabilities; a logger
//! that does not support them is wrapped in [`PlatformOnly`], which
//! provides them as no-ops. Code that needs everything asks for
//! [`EventLogger`].
//!
//! None of these methods can fail. Misuse is recovered from and logged.

use omnilog_core::event::EventDetails;
use omnilog_core::routing::RoutingDescriptor;
use omnilog_core::source::EventSource;
use uuid::Uuid;

use crate::domain::options::EventOptions;

/// Experience, app and session lifecycle.
pub trait PlatformEvents {
    /// A new experience is shown. Generates an id when `experience_id` is
    /// `None`, updates the referrer and abandons every pending flow.
    fn experience_loaded(
        &self,
        routing: &RoutingDescriptor,
        experience_id: Option<Uuid>,
        options: EventOptions,
    );

    /// The current experience is going away. Optional; used for dwell time
    /// and exit-element reporting.
    fn experience_unloaded(
        &self,
        routing: &RoutingDescriptor,
        experience_id: Option<Uuid>,
        options: EventOptions,
    );

    /// The app started, or a new browser window or tab opened.
    fn app_started(&self, options: EventOptions);

    /// The app was stopped, or a browser window or tab closed.
    fn app_stopped(&self, options: EventOptions);

    /// A session boundary detector decided a new session begins.
    fn session_started(&self);

    /// A session boundary detector decided the session is over.
    fn session_ended(&self);

    /// The user was enrolled in variant `test_variant_id` of `test_name`.
    fn ab_registered(&self, test_name: &str, test_variant_id: &str);

    /// Periodic liveness signal while the user is active.
    fn heartbeat(&self);
}

/// Flow stack and step reporting.
pub trait FlowEvents {
    /// Abandons every pending flow without emitting anything.
    fn reset_flows(&self);

    /// A flow begins, possibly nested inside the active one.
    fn flow_started(&self, flow_name: &str, options: EventOptions);

    /// A flow reached its positive conclusion.
    fn flow_completed(&self, flow_name: &str, options: EventOptions);

    /// A flow was dismissed. Keeps the stack consistent; emits nothing.
    fn flow_abandoned(&self, flow_name: &str);

    /// A step was shown. Advances the step counter.
    fn flow_step_loaded(&self, flow_name: &str, step_name: &str, options: EventOptions);

    /// A step is going away. Reports the current step without advancing.
    fn flow_step_unloaded(&self, flow_name: &str, step_name: &str, options: EventOptions);

    /// The user deliberately moved past a step. Advances the step counter
    /// and carries whatever the step captured in `options.details`.
    fn flow_step_completed(&self, flow_name: &str, step_name: &str, options: EventOptions);
}

/// UI interactions and client-side validation failures.
pub trait InteractionEvents {
    /// Reports an interaction from the interaction event catalog.
    fn send_interaction_event(&self, event_name: &str, source: Option<EventSource>);

    /// Reports a client-side validation failure.
    fn send_user_error(&self, event_name: &str, options: EventOptions);
}

/// Application-level outcomes.
pub trait OutcomeEvents {
    /// Reports an outcome. `error_code` is `0` on success; `error_message`
    /// is normally `None` on success.
    fn send_outcome_event(
        &self,
        event_name: &str,
        details: EventDetails,
        error_code: i32,
        error_message: Option<&str>,
    );
}

/// A logger with every capability.
pub trait EventLogger: PlatformEvents + FlowEvents + InteractionEvents + OutcomeEvents {}

impl<T> EventLogger for T where
    T: PlatformEvents + FlowEvents + InteractionEvents + OutcomeEvents + ?Sized
{
}

/// Adapts a platform-only logger into a full [`EventLogger`] whose optional
/// capabilities do nothing.
#[derive(Debug, Clone, Default)]
pub struct PlatformOnly<P>(pub P);

impl<P: PlatformEvents> PlatformEvents for PlatformOnly<P> {
    fn experience_loaded(
        &self,
        routing: &RoutingDescriptor,
        experience_id: Option<Uuid>,
        options: EventOptions,
    ) {
        self.0.experience_loaded(routing, experience_id, options);
    }

    fn experience_unloaded(
        &self,
        routing: &RoutingDescriptor,
        experience_id: Option<Uuid>,
        options: EventOptions,
    ) {
        self.0.experience_unloaded(routing, experience_id, options);
    }

    fn app_started(&self, options: EventOptions) {
        self.0.app_started(options);
    }

    fn app_stopped(&self, options: EventOptions) {
        self.0.app_stopped(options);
    }

    fn session_started(&self) {
        self.0.session_started();
    }

    fn session_ended(&self) {
        self.0.session_ended();
    }

    fn ab_registered(&self, test_name: &str, test_variant_id: &str) {
        self.0.ab_registered(test_name, test_variant_id);
    }

    fn heartbeat(&self) {
        self.0.heartbeat();
    }
}

impl<P> FlowEvents for PlatformOnly<P> {
    fn reset_flows(&self) {}

    fn flow_started(&self, _flow_name: &str, _options: EventOptions) {}

    fn flow_completed(&self, _flow_name: &str, _options: EventOptions) {}

    fn flow_abandoned(&self, _flow_name: &str) {}

    fn flow_step_loaded(&self, _flow_name: &str, _step_name: &str, _options: EventOptions) {}

    fn flow_step_unloaded(&self, _flow_name: &str, _step_name: &str, _options: EventOptions) {}

    fn flow_step_completed(&self, _flow_name: &str, _step_name: &str, _options: EventOptions) {}
}

impl<P> InteractionEvents for PlatformOnly<P> {
    fn send_interaction_event(&self, _event_name: &str, _source: Option<EventSource>) {}

    fn send_user_error(&self, _event_name: &str, _options: EventOptions) {}
}

impl<P> OutcomeEvents for PlatformOnly<P> {
    fn send_outcome_event(
        &self,
        _event_name: &str,
        _details: EventDetails,
        _error_code: i32,
        _error_message: Option<&str>,
    ) {
    }
}
