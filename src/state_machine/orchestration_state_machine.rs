use super::actions::{PublishTransitionEventAction, StateAction};
use super::errors::{StateMachineError, StateMachineResult};
use super::events::StateEvent;
use super::guards::{DraftValidGuard, StaleSelectionGuard, StateGuard};
use super::states::OrchestrationState;
use crate::events::publisher::EventPublisher;
use crate::orchestration::engine::OrchestrationEngine;
use tracing::debug;

/// State machine for the client-observed enabled/disabled lifecycle of one
/// persisted orchestration.
///
/// Guard checks are synchronous over the in-memory engine; only the
/// post-transition actions (event publishing) are async. The machine holds
/// the current state itself: the server's answer is a confirmation, never
/// the trigger, so an in-flight request cannot reorder local transitions.
pub struct OrchestrationStateMachine {
    state: OrchestrationState,
    orchestration_id: Option<String>,
    event_publisher: EventPublisher,
}

impl OrchestrationStateMachine {
    /// Create a state machine for a freshly created, not yet saved draft
    pub fn new(event_publisher: EventPublisher) -> Self {
        Self {
            state: OrchestrationState::default(),
            orchestration_id: None,
            event_publisher,
        }
    }

    /// Create a state machine tracking an already persisted orchestration
    pub fn for_persisted(
        orchestration_id: impl Into<String>,
        enabled: bool,
        event_publisher: EventPublisher,
    ) -> Self {
        let state = if enabled {
            OrchestrationState::Enabled
        } else {
            OrchestrationState::Disabled
        };
        Self {
            state,
            orchestration_id: Some(orchestration_id.into()),
            event_publisher,
        }
    }

    /// Get the current client-observed state
    pub fn current_state(&self) -> OrchestrationState {
        self.state
    }

    /// Record the server-assigned id after a first successful save
    pub fn set_orchestration_id(&mut self, orchestration_id: impl Into<String>) {
        self.orchestration_id = Some(orchestration_id.into());
    }

    /// Attempt to transition the orchestration state
    pub async fn transition(
        &mut self,
        engine: &OrchestrationEngine,
        event: StateEvent,
    ) -> StateMachineResult<OrchestrationState> {
        let current_state = self.state;
        let target_state = self.determine_target_state(current_state, &event)?;

        self.check_guards(engine, current_state, target_state, &event)?;

        self.state = target_state;

        debug!(
            orchestration_id = self.orchestration_id.as_deref(),
            from_state = %current_state,
            to_state = %target_state,
            event = event.event_type(),
            "Orchestration state transition applied"
        );

        self.execute_actions(current_state, target_state, &event)
            .await?;

        Ok(target_state)
    }

    /// Determine the target state based on current state and event
    fn determine_target_state(
        &self,
        current_state: OrchestrationState,
        event: &StateEvent,
    ) -> StateMachineResult<OrchestrationState> {
        let target = match (current_state, event) {
            // Switching off, explicitly or reactively
            (OrchestrationState::Enabled, StateEvent::Disable) => OrchestrationState::Disabled,
            (OrchestrationState::Enabled, StateEvent::AutoDisable(_)) => {
                OrchestrationState::Disabled
            }

            // Save always requests enablement; the disabled -> enabled edge
            // exists only here, never as an automatic transition
            (_, StateEvent::Save) => OrchestrationState::Enabled,

            // Invalid transitions (e.g. disabling an already disabled entry)
            (from_state, event) => {
                return Err(StateMachineError::invalid_transition(
                    from_state.to_string(),
                    event.event_type(),
                ))
            }
        };

        Ok(target)
    }

    /// Check guard conditions for the transition
    fn check_guards(
        &self,
        engine: &OrchestrationEngine,
        current_state: OrchestrationState,
        target_state: OrchestrationState,
        event: &StateEvent,
    ) -> StateMachineResult<()> {
        match (current_state, target_state, event) {
            // Re-enabling through save requires a structurally valid draft
            (_, OrchestrationState::Enabled, StateEvent::Save) => {
                let guard = DraftValidGuard;
                guard.check(engine)?;
            }

            // Reactive disable must be backed by an actual stale selection
            (OrchestrationState::Enabled, OrchestrationState::Disabled, StateEvent::AutoDisable(_)) => {
                let guard = StaleSelectionGuard;
                guard.check(engine)?;
            }

            // No special guards for other transitions
            _ => {}
        }

        Ok(())
    }

    /// Execute actions after a successful transition
    async fn execute_actions(
        &self,
        from_state: OrchestrationState,
        to_state: OrchestrationState,
        event: &StateEvent,
    ) -> StateMachineResult<()> {
        let action = PublishTransitionEventAction::new(self.event_publisher.clone());
        action
            .execute(self.orchestration_id.as_deref(), from_state, to_state, event)
            .await?;

        Ok(())
    }
}
