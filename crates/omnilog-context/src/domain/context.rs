//! Experience, flow and session context.
//!
//! All experience mutation goes through [`ExperienceContext::load`] and all
//! flow mutation goes through [`FlowContext::apply`]. The engine keeps both
//! inside one [`ContextState`] guarded by a single lock.

use omnilog_core::event::{ExperienceStamp, FlowStamp};
use omnilog_core::routing::{Environment, Namespace, RoutingDescriptor};
use uuid::Uuid;

/// The experience the user is currently on. Retained until the next load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceContext {
    experience_id: Option<Uuid>,
    experience_name: Option<String>,
    experience_arguments_json: Option<String>,
    product: Option<Namespace>,
    product_variant: Option<String>,
    environment: Option<Environment>,
    referrer_experience_id: Option<Uuid>,
}

impl ExperienceContext {
    /// Switches to a new experience.
    ///
    /// The referrer becomes `source_experience_id` when the triggering
    /// element carried one, otherwise the experience being left.
    pub fn load(
        &mut self,
        routing: &RoutingDescriptor,
        experience_id: Uuid,
        source_experience_id: Option<Uuid>,
    ) {
        self.referrer_experience_id = source_experience_id.or(self.experience_id);
        self.experience_id = Some(experience_id);
        self.experience_name = Some(routing.experience.clone());
        self.experience_arguments_json = Some(routing.experience_arguments_json.clone());
        self.product = Some(routing.namespace);
        self.product_variant = Some(routing.site_name.clone());
        self.environment = Some(routing.environment);
    }

    #[must_use]
    pub fn experience_id(&self) -> Option<Uuid> {
        self.experience_id
    }

    #[must_use]
    pub fn referrer_experience_id(&self) -> Option<Uuid> {
        self.referrer_experience_id
    }

    #[must_use]
    pub fn experience_name(&self) -> Option<&str> {
        self.experience_name.as_deref()
    }

    #[must_use]
    pub fn experience_arguments_json(&self) -> Option<&str> {
        self.experience_arguments_json.as_deref()
    }

    #[must_use]
    pub fn product(&self) -> Option<Namespace> {
        self.product
    }

    #[must_use]
    pub fn product_variant(&self) -> Option<&str> {
        self.product_variant.as_deref()
    }

    /// Copies the context onto an outgoing record.
    #[must_use]
    pub fn stamp(&self) -> ExperienceStamp {
        ExperienceStamp {
            experience_id: self.experience_id,
            experience_name: self.experience_name.clone(),
            product: self.product,
            product_variant: self.product_variant.clone(),
            environment: self.environment,
            referrer_experience_id: self.referrer_experience_id,
        }
    }
}

/// A change to the flow stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowTransition<'a> {
    /// Abandon every pending flow.
    Reset,
    /// Push `name` and switch to `flow_id`.
    Start { name: &'a str, flow_id: Uuid },
    /// Remove `name` and switch the remaining context to `flow_id`.
    Finish { name: &'a str, flow_id: Uuid },
    /// A step of `name` was reported; `advance` bumps the counter.
    Step { name: &'a str, advance: bool },
}

/// Caller misuse detected, and recovered from, while applying a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowAnomaly {
    /// A flow was finished while no flow was active. Nothing was removed.
    FinishedWhileIdle { name: String },
    /// A flow was finished while nested flows were still open above it. The
    /// named entry was removed; `still_open` stayed on the stack.
    FinishedOutOfOrder {
        name: String,
        still_open: Vec<String>,
    },
    /// The finished flow was not on the stack. The top entry was popped.
    FinishedUnknown { name: String, popped: String },
    /// A step was reported while no flow was active.
    StepWhileIdle { name: String },
    /// A step was reported for a flow that is not on the stack.
    StepForInactiveFlow { name: String, active: String },
}

/// The stack of in-progress flows and the shared step counter.
///
/// The counter resets only when a flow starts on an empty stack or on
/// [`FlowTransition::Reset`]; nested flows keep counting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowContext {
    flow_id: Option<Uuid>,
    names: Vec<String>,
    step: u32,
}

impl FlowContext {
    /// Applies `transition`, returning the anomaly it recovered from, if any.
    pub fn apply(&mut self, transition: FlowTransition<'_>) -> Option<FlowAnomaly> {
        match transition {
            FlowTransition::Reset => {
                self.names.clear();
                self.step = 0;
                self.flow_id = None;
                None
            }
            FlowTransition::Start { name, flow_id } => {
                if self.names.is_empty() {
                    self.step = 0;
                }
                self.names.push(name.to_owned());
                self.flow_id = Some(flow_id);
                None
            }
            FlowTransition::Finish { name, flow_id } => {
                let anomaly = self.remove(name);
                self.flow_id = Some(flow_id);
                anomaly
            }
            FlowTransition::Step { name, advance } => {
                if advance {
                    self.step = self.step.saturating_add(1);
                }
                match self.names.last() {
                    None => Some(FlowAnomaly::StepWhileIdle {
                        name: name.to_owned(),
                    }),
                    Some(top) if !self.names.iter().any(|n| n == name) => {
                        Some(FlowAnomaly::StepForInactiveFlow {
                            name: name.to_owned(),
                            active: top.clone(),
                        })
                    }
                    Some(_) => None,
                }
            }
        }
    }

    /// Pop policy: exact top match, else nearest match from the top, else
    /// the top itself.
    fn remove(&mut self, name: &str) -> Option<FlowAnomaly> {
        match self.names.iter().rposition(|n| n == name) {
            Some(idx) if idx + 1 == self.names.len() => {
                self.names.pop();
                None
            }
            Some(idx) => {
                self.names.remove(idx);
                Some(FlowAnomaly::FinishedOutOfOrder {
                    name: name.to_owned(),
                    still_open: self.names[idx..].to_vec(),
                })
            }
            None => match self.names.pop() {
                Some(popped) => Some(FlowAnomaly::FinishedUnknown {
                    name: name.to_owned(),
                    popped,
                }),
                None => Some(FlowAnomaly::FinishedWhileIdle {
                    name: name.to_owned(),
                }),
            },
        }
    }

    #[must_use]
    pub fn flow_id(&self) -> Option<Uuid> {
        self.flow_id
    }

    #[must_use]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Flow names, outermost first.
    #[must_use]
    pub fn stack(&self) -> &[String] {
        &self.names
    }

    /// The innermost active flow.
    #[must_use]
    pub fn active_flow(&self) -> Option<&str> {
        self.names.last().map(String::as_str)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.names.is_empty()
    }

    /// Stamp for an event reported against `flow_name`.
    #[must_use]
    pub fn stamp(&self, flow_name: &str) -> FlowStamp {
        FlowStamp {
            flow_name: flow_name.to_owned(),
            flow_id: self.flow_id,
            flow_step: self.step,
        }
    }

    /// Stamp for the innermost flow, or `None` when idle.
    #[must_use]
    pub fn active_stamp(&self) -> Option<FlowStamp> {
        self.active_flow().map(|name| self.stamp(name))
    }
}

/// Everything the engine remembers between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextState {
    pub(crate) experience: ExperienceContext,
    pub(crate) flows: FlowContext,
    pub(crate) session_id: Option<Uuid>,
}

impl ContextState {
    #[must_use]
    pub fn experience(&self) -> &ExperienceContext {
        &self.experience
    }

    #[must_use]
    pub fn flows(&self) -> &FlowContext {
        &self.flows
    }

    /// The session opened by the last `session_started`, if still open.
    #[must_use]
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routing(experience: &str) -> RoutingDescriptor {
        RoutingDescriptor::new(Namespace::Houzz, "HOUZZ_US", Environment::Production, experience)
    }

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_first_load_has_no_referrer() {
        // Arrange
        let mut ctx = ExperienceContext::default();

        // Act
        ctx.load(&routing("home"), id(1), None);

        // Assert
        assert_eq!(ctx.experience_id(), Some(id(1)));
        assert_eq!(ctx.referrer_experience_id(), None);
        assert_eq!(ctx.experience_name(), Some("home"));
        assert_eq!(ctx.product(), Some(Namespace::Houzz));
        assert_eq!(ctx.product_variant(), Some("HOUZZ_US"));
        assert_eq!(ctx.experience_arguments_json(), Some("{}"));
    }

    #[test]
    fn test_load_uses_previous_experience_as_referrer() {
        let mut ctx = ExperienceContext::default();
        ctx.load(&routing("home"), id(1), None);

        ctx.load(&routing("photos"), id(2), None);

        assert_eq!(ctx.experience_id(), Some(id(2)));
        assert_eq!(ctx.referrer_experience_id(), Some(id(1)));
    }

    #[test]
    fn test_source_experience_id_wins_over_previous() {
        let mut ctx = ExperienceContext::default();
        ctx.load(&routing("home"), id(1), None);

        ctx.load(&routing("photos"), id(2), Some(id(77)));

        assert_eq!(ctx.referrer_experience_id(), Some(id(77)));
    }

    #[test]
    fn test_start_on_empty_stack_resets_step() {
        // Arrange
        let mut flows = FlowContext::default();
        flows.apply(FlowTransition::Step { name: "x", advance: true });
        flows.apply(FlowTransition::Step { name: "x", advance: true });
        assert_eq!(flows.step(), 2);

        // Act
        let anomaly = flows.apply(FlowTransition::Start { name: "signup", flow_id: id(10) });

        // Assert
        assert!(anomaly.is_none());
        assert_eq!(flows.step(), 0);
        assert_eq!(flows.stack(), ["signup".to_owned()]);
        assert_eq!(flows.flow_id(), Some(id(10)));
    }

    #[test]
    fn test_nested_start_keeps_step() {
        let mut flows = FlowContext::default();
        flows.apply(FlowTransition::Start { name: "signup", flow_id: id(10) });
        flows.apply(FlowTransition::Step { name: "signup", advance: true });

        flows.apply(FlowTransition::Start { name: "verify-phone", flow_id: id(11) });

        assert_eq!(flows.step(), 1);
        assert_eq!(flows.active_flow(), Some("verify-phone"));
        assert_eq!(flows.flow_id(), Some(id(11)));
    }

    #[test]
    fn test_finish_top_pops_and_switches_id_without_touching_step() {
        let mut flows = FlowContext::default();
        flows.apply(FlowTransition::Start { name: "signup", flow_id: id(10) });
        flows.apply(FlowTransition::Step { name: "signup", advance: true });
        flows.apply(FlowTransition::Start { name: "verify-phone", flow_id: id(11) });

        let anomaly = flows.apply(FlowTransition::Finish { name: "verify-phone", flow_id: id(12) });

        assert!(anomaly.is_none());
        assert_eq!(flows.stack(), ["signup".to_owned()]);
        assert_eq!(flows.flow_id(), Some(id(12)));
        assert_eq!(flows.step(), 1);
    }

    #[test]
    fn test_finish_last_flow_keeps_step_until_next_start() {
        let mut flows = FlowContext::default();
        flows.apply(FlowTransition::Start { name: "signup", flow_id: id(10) });
        flows.apply(FlowTransition::Step { name: "signup", advance: true });

        flows.apply(FlowTransition::Finish { name: "signup", flow_id: id(11) });

        assert!(!flows.is_active());
        assert_eq!(flows.step(), 1);
        assert_eq!(flows.flow_id(), Some(id(11)));
    }

    #[test]
    fn test_finish_below_top_removes_nearest_match() {
        // Arrange
        let mut flows = FlowContext::default();
        flows.apply(FlowTransition::Start { name: "a", flow_id: id(1) });
        flows.apply(FlowTransition::Start { name: "b", flow_id: id(2) });
        flows.apply(FlowTransition::Start { name: "a", flow_id: id(3) });
        flows.apply(FlowTransition::Start { name: "c", flow_id: id(4) });

        // Act
        let anomaly = flows.apply(FlowTransition::Finish { name: "a", flow_id: id(5) });

        // Assert
        assert_eq!(
            anomaly,
            Some(FlowAnomaly::FinishedOutOfOrder {
                name: "a".to_owned(),
                still_open: vec!["c".to_owned()],
            })
        );
        assert_eq!(flows.stack(), ["a".to_owned(), "b".to_owned(), "c".to_owned()]);
    }

    #[test]
    fn test_finish_unknown_name_pops_top() {
        let mut flows = FlowContext::default();
        flows.apply(FlowTransition::Start { name: "signup", flow_id: id(1) });
        flows.apply(FlowTransition::Start { name: "verify-phone", flow_id: id(2) });

        let anomaly = flows.apply(FlowTransition::Finish { name: "checkout", flow_id: id(3) });

        assert_eq!(
            anomaly,
            Some(FlowAnomaly::FinishedUnknown {
                name: "checkout".to_owned(),
                popped: "verify-phone".to_owned(),
            })
        );
        assert_eq!(flows.stack(), ["signup".to_owned()]);
    }

    #[test]
    fn test_finish_on_empty_stack_is_reported_and_harmless() {
        let mut flows = FlowContext::default();

        let anomaly = flows.apply(FlowTransition::Finish { name: "signup", flow_id: id(1) });

        assert_eq!(
            anomaly,
            Some(FlowAnomaly::FinishedWhileIdle { name: "signup".to_owned() })
        );
        assert!(flows.stack().is_empty());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut flows = FlowContext::default();
        flows.apply(FlowTransition::Start { name: "signup", flow_id: id(1) });
        flows.apply(FlowTransition::Step { name: "signup", advance: true });

        flows.apply(FlowTransition::Reset);
        let once = flows.clone();
        flows.apply(FlowTransition::Reset);

        assert_eq!(flows, once);
        assert!(flows.stack().is_empty());
        assert_eq!(flows.step(), 0);
        assert_eq!(flows.flow_id(), None);
    }

    #[test]
    fn test_step_on_idle_counts_and_reports() {
        let mut flows = FlowContext::default();

        let anomalies: Vec<_> = (0..3)
            .map(|_| flows.apply(FlowTransition::Step { name: "signup", advance: true }))
            .collect();

        assert_eq!(flows.step(), 3);
        assert!(anomalies.iter().all(|a| matches!(a, Some(FlowAnomaly::StepWhileIdle { .. }))));
    }

    #[test]
    fn test_step_without_advance_leaves_counter() {
        let mut flows = FlowContext::default();
        flows.apply(FlowTransition::Start { name: "signup", flow_id: id(1) });

        let anomaly = flows.apply(FlowTransition::Step { name: "signup", advance: false });

        assert!(anomaly.is_none());
        assert_eq!(flows.step(), 0);
    }

    #[test]
    fn test_step_for_outer_flow_is_not_an_anomaly() {
        let mut flows = FlowContext::default();
        flows.apply(FlowTransition::Start { name: "signup", flow_id: id(1) });
        flows.apply(FlowTransition::Start { name: "verify-phone", flow_id: id(2) });

        let outer = flows.apply(FlowTransition::Step { name: "signup", advance: true });
        let stranger = flows.apply(FlowTransition::Step { name: "checkout", advance: true });

        assert!(outer.is_none());
        assert_eq!(
            stranger,
            Some(FlowAnomaly::StepForInactiveFlow {
                name: "checkout".to_owned(),
                active: "verify-phone".to_owned(),
            })
        );
        assert_eq!(flows.step(), 2);
    }

    #[test]
    fn test_active_stamp_uses_innermost_flow() {
        let mut flows = FlowContext::default();
        assert!(flows.active_stamp().is_none());
        flows.apply(FlowTransition::Start { name: "signup", flow_id: id(1) });
        flows.apply(FlowTransition::Start { name: "verify-phone", flow_id: id(2) });

        let stamp = flows.active_stamp().unwrap();

        assert_eq!(stamp.flow_name, "verify-phone");
        assert_eq!(stamp.flow_id, Some(id(2)));
        assert_eq!(stamp.flow_step, 0);
    }
}
