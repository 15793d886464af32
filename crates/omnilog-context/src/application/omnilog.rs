//! The context engine.
//!
//! [`OmniLog`] owns the experience, flow and session context. Each lifecycle
//! call takes the state lock, applies its transition, assembles one record
//! and hands it to the sink before releasing the lock, so concurrent
//! callers never observe a half-applied call and the sink sees records in
//! state order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use omnilog_core::clock::{Clock, SystemClock};
use omnilog_core::error::OmniLogError;
use omnilog_core::event::{EventCategory, EventDetails};
use omnilog_core::ids::{IdGenerator, RandomIds};
use omnilog_core::routing::RoutingDescriptor;
use omnilog_core::sink::EventSink;
use omnilog_core::source::EventSource;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::capabilities::{
    FlowEvents, InteractionEvents, OutcomeEvents, PlatformEvents,
};
use crate::application::envelope::Draft;
use crate::domain::context::{ContextState, FlowTransition};
use crate::domain::names;
use crate::domain::options::EventOptions;

struct EngineState {
    context: ContextState,
    ids: Box<dyn IdGenerator>,
}

/// Stateful event logger. Cheap to share behind an `Arc`.
pub struct OmniLog {
    state: Mutex<EngineState>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for OmniLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmniLog")
            .field("context", &self.snapshot())
            .finish_non_exhaustive()
    }
}

/// Builder for [`OmniLog`]. The sink is required; the clock defaults to
/// [`SystemClock`] and ids to [`RandomIds`].
#[derive(Default)]
pub struct OmniLogBuilder {
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Box<dyn IdGenerator>>,
    sink: Option<Arc<dyn EventSink>>,
}

impl OmniLogBuilder {
    #[must_use]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    #[must_use]
    pub fn ids<I: IdGenerator + 'static>(mut self, ids: I) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    /// Sets the destination for finished records.
    #[must_use]
    pub fn sink<S: EventSink + 'static>(mut self, sink: Arc<S>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Builds the engine with empty context.
    ///
    /// # Errors
    ///
    /// Returns `OmniLogError::MissingSink` if no sink was configured.
    pub fn build(self) -> Result<OmniLog, OmniLogError> {
        let sink = self.sink.ok_or(OmniLogError::MissingSink)?;
        Ok(OmniLog {
            state: Mutex::new(EngineState {
                context: ContextState::default(),
                ids: self.ids.unwrap_or_else(|| Box::new(RandomIds)),
            }),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            sink,
        })
    }
}

impl OmniLog {
    #[must_use]
    pub fn builder() -> OmniLogBuilder {
        OmniLogBuilder::default()
    }

    /// Returns a copy of the current context.
    #[must_use]
    pub fn snapshot(&self) -> ContextState {
        self.lock().context.clone()
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        // The state is plain data; a panic in a sink cannot leave it torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(state: &mut EngineState, transition: FlowTransition<'_>) {
        if let Some(anomaly) = state.context.flows.apply(transition) {
            warn!(?anomaly, stack = ?state.context.flows.stack(), "recovered from flow misuse");
        }
    }

    fn emit(&self, state: &mut EngineState, draft: Draft) {
        let record = draft.assemble(&state.context, state.ids.as_mut(), self.clock.as_ref());
        debug!(
            event_id = %record.event_id,
            event_name = %record.event_name,
            invoker = ?record.invoker,
            "emitting event"
        );
        self.sink.deliver(record);
    }

    fn platform(&self, name: &str, options: EventOptions) {
        let mut state = self.lock();
        self.emit(&mut state, Draft::platform(name, options));
    }

    fn finish_flow(state: &mut EngineState, flow_name: &str) {
        let flow_id = state.ids.next_id();
        Self::transition(
            state,
            FlowTransition::Finish {
                name: flow_name,
                flow_id,
            },
        );
    }

    fn step(&self, flow_name: &str, event_name: String, advance: bool, options: EventOptions) {
        let mut state = self.lock();
        Self::transition(
            &mut state,
            FlowTransition::Step {
                name: flow_name,
                advance,
            },
        );
        let stamp = state.context.flows.stamp(flow_name);
        self.emit(&mut state, Draft::flow(event_name, options, stamp));
    }
}

impl PlatformEvents for OmniLog {
    fn experience_loaded(
        &self,
        routing: &RoutingDescriptor,
        experience_id: Option<Uuid>,
        options: EventOptions,
    ) {
        let mut state = self.lock();
        let experience_id = experience_id.unwrap_or_else(|| state.ids.next_id());
        let source_experience_id = options.source.as_ref().and_then(|s| s.experience_id);
        state
            .context
            .experience
            .load(routing, experience_id, source_experience_id);
        Self::transition(&mut state, FlowTransition::Reset);
        self.emit(&mut state, Draft::platform(names::EXPERIENCE_LOADED, options));
    }

    fn experience_unloaded(
        &self,
        _routing: &RoutingDescriptor,
        experience_id: Option<Uuid>,
        options: EventOptions,
    ) {
        let mut state = self.lock();
        let draft =
            Draft::platform(names::EXPERIENCE_UNLOADED, options).for_experience(experience_id);
        self.emit(&mut state, draft);
    }

    fn app_started(&self, options: EventOptions) {
        self.platform(names::APP_STARTED, options);
    }

    fn app_stopped(&self, options: EventOptions) {
        self.platform(names::APP_STOPPED, options);
    }

    fn session_started(&self) {
        let mut state = self.lock();
        let session_id = state.ids.next_id();
        if let Some(previous) = state.context.session_id.replace(session_id) {
            debug!(%previous, %session_id, "session replaced without an end signal");
        }
        self.emit(
            &mut state,
            Draft::platform(names::SESSION_STARTED, EventOptions::default()),
        );
    }

    fn session_ended(&self) {
        let mut state = self.lock();
        self.emit(
            &mut state,
            Draft::platform(names::SESSION_ENDED, EventOptions::default()),
        );
        state.context.session_id = None;
    }

    fn ab_registered(&self, test_name: &str, test_variant_id: &str) {
        let options = EventOptions::default()
            .with_detail(names::TEST_NAME_KEY, test_name)
            .with_detail(names::TEST_VARIANT_ID_KEY, test_variant_id);
        self.platform(names::AB_REGISTERED, options);
    }

    fn heartbeat(&self) {
        self.platform(names::HEARTBEAT, EventOptions::default());
    }
}

impl FlowEvents for OmniLog {
    fn reset_flows(&self) {
        let mut state = self.lock();
        Self::transition(&mut state, FlowTransition::Reset);
    }

    fn flow_started(&self, flow_name: &str, options: EventOptions) {
        let mut state = self.lock();
        let flow_id = state.ids.next_id();
        Self::transition(
            &mut state,
            FlowTransition::Start {
                name: flow_name,
                flow_id,
            },
        );
        let stamp = state.context.flows.stamp(flow_name);
        self.emit(
            &mut state,
            Draft::flow(names::flow_started(flow_name), options, stamp),
        );
    }

    fn flow_completed(&self, flow_name: &str, options: EventOptions) {
        let mut state = self.lock();
        Self::finish_flow(&mut state, flow_name);
        let stamp = state.context.flows.stamp(flow_name);
        self.emit(
            &mut state,
            Draft::flow(names::flow_completed(flow_name), options, stamp),
        );
    }

    fn flow_abandoned(&self, flow_name: &str) {
        let mut state = self.lock();
        Self::finish_flow(&mut state, flow_name);
        debug!(flow_name, "flow abandoned");
    }

    fn flow_step_loaded(&self, flow_name: &str, step_name: &str, options: EventOptions) {
        self.step(flow_name, names::step_loaded(flow_name, step_name), true, options);
    }

    fn flow_step_unloaded(&self, flow_name: &str, step_name: &str, options: EventOptions) {
        self.step(flow_name, names::step_unloaded(flow_name, step_name), false, options);
    }

    fn flow_step_completed(&self, flow_name: &str, step_name: &str, options: EventOptions) {
        self.step(flow_name, names::step_completed(flow_name, step_name), true, options);
    }
}

impl InteractionEvents for OmniLog {
    fn send_interaction_event(&self, event_name: &str, source: Option<EventSource>) {
        let mut state = self.lock();
        let stamp = state.context.flows.active_stamp();
        let draft =
            Draft::new(event_name, EventCategory::Interaction, source.into()).with_flow(stamp);
        self.emit(&mut state, draft);
    }

    fn send_user_error(&self, event_name: &str, options: EventOptions) {
        let mut state = self.lock();
        let stamp = state.context.flows.active_stamp();
        let draft = Draft::new(event_name, EventCategory::UserError, options).with_flow(stamp);
        self.emit(&mut state, draft);
    }
}

impl OutcomeEvents for OmniLog {
    fn send_outcome_event(
        &self,
        event_name: &str,
        details: EventDetails,
        error_code: i32,
        error_message: Option<&str>,
    ) {
        let mut state = self.lock();
        let stamp = state.context.flows.active_stamp();
        let mut draft = Draft::new(
            event_name,
            EventCategory::Outcome,
            EventOptions::default().with_details(details),
        )
        .with_flow(stamp)
        .with_extra(names::ERROR_CODE_KEY, error_code.to_string());
        if let Some(message) = error_message {
            draft = draft.with_extra(names::ERROR_MESSAGE_KEY, message);
        }
        self.emit(&mut state, draft);
    }
}
