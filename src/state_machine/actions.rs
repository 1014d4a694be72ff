use super::errors::{ActionError, ActionResult};
use super::events::StateEvent;
use super::states::OrchestrationState;
use crate::events::publisher::EventPublisher;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

/// Trait for implementing post-transition actions
#[async_trait]
pub trait StateAction {
    /// Execute the action after a successful transition
    async fn execute(
        &self,
        orchestration_id: Option<&str>,
        from_state: OrchestrationState,
        to_state: OrchestrationState,
        event: &StateEvent,
    ) -> ActionResult<()>;

    /// Get a description of this action for logging
    fn description(&self) -> &'static str;
}

/// Action to publish lifecycle events when state transitions occur
pub struct PublishTransitionEventAction {
    event_publisher: EventPublisher,
}

impl PublishTransitionEventAction {
    pub fn new(event_publisher: EventPublisher) -> Self {
        Self { event_publisher }
    }
}

#[async_trait]
impl StateAction for PublishTransitionEventAction {
    async fn execute(
        &self,
        orchestration_id: Option<&str>,
        from_state: OrchestrationState,
        to_state: OrchestrationState,
        event: &StateEvent,
    ) -> ActionResult<()> {
        let event_name = determine_event_name(to_state, event);

        let context = json!({
            "orchestration_id": orchestration_id,
            "from_state": from_state.to_string(),
            "to_state": to_state.to_string(),
            "event": event.event_type(),
            "reason": event.disable_reason(),
            "transitioned_at": Utc::now().to_rfc3339(),
        });

        self.event_publisher
            .publish(event_name, context)
            .await
            .map_err(|_| ActionError::EventPublishFailed {
                event_name: event_name.to_string(),
            })?;

        Ok(())
    }

    fn description(&self) -> &'static str {
        "Publish lifecycle event for orchestration transition"
    }
}

fn determine_event_name(to_state: OrchestrationState, event: &StateEvent) -> &'static str {
    use crate::constants::events;

    match (to_state, event) {
        (OrchestrationState::Disabled, StateEvent::AutoDisable(_)) => {
            events::ORCHESTRATION_AUTO_DISABLED
        }
        (OrchestrationState::Disabled, _) => events::ORCHESTRATION_DISABLED,
        (OrchestrationState::Enabled, _) => events::ORCHESTRATION_ENABLED,
    }
}
