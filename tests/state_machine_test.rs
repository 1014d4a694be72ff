//! State machine tests: the enabled/disabled lifecycle, its guards, and the
//! transition events it publishes.

use orchestration_core::constants::events;
use orchestration_core::events::EventPublisher;
use orchestration_core::models::{CommandWrapper, Scope};
use orchestration_core::orchestration::OrchestrationEngine;
use orchestration_core::registry::WrapperSnapshot;
use orchestration_core::state_machine::{
    OrchestrationState, OrchestrationStateMachine, StateEvent, StateMachineError,
};

fn wrapper(id: &str, contexts: &[&str], enabled: bool) -> CommandWrapper {
    CommandWrapper::new(id, id, id, contexts.iter().copied(), enabled)
}

/// Engine around a complete, valid two-step draft
fn valid_engine() -> OrchestrationEngine {
    let snapshot = WrapperSnapshot::new(
        Scope::Site,
        vec![
            wrapper("w1", &["session"], true),
            wrapper("w2", &["session"], true),
        ],
    );
    let mut engine = OrchestrationEngine::new(snapshot);
    engine.set_name("valid-chain");
    engine.set_first_step("w1").unwrap();
    engine.add_step();
    engine.select_step(1, Some("w2")).unwrap();
    engine
}

/// Engine whose second step went stale through an external disable
fn stale_engine() -> OrchestrationEngine {
    let mut engine = valid_engine();
    let refreshed = engine.snapshot().refreshed(vec![
        wrapper("w1", &["session"], true),
        wrapper("w2", &["session"], false),
    ]);
    engine.update_snapshot(refreshed);
    engine
}

#[tokio::test]
async fn explicit_disable_from_enabled() {
    let engine = valid_engine();
    let mut machine =
        OrchestrationStateMachine::for_persisted("42", true, EventPublisher::default());

    let state = machine
        .transition(&engine, StateEvent::Disable)
        .await
        .unwrap();
    assert_eq!(state, OrchestrationState::Disabled);
    assert_eq!(machine.current_state(), OrchestrationState::Disabled);
}

#[tokio::test]
async fn disable_when_already_disabled_is_invalid() {
    let engine = valid_engine();
    let mut machine =
        OrchestrationStateMachine::for_persisted("42", false, EventPublisher::default());

    let err = machine
        .transition(&engine, StateEvent::Disable)
        .await
        .unwrap_err();
    assert!(matches!(err, StateMachineError::InvalidTransition { .. }));
    assert_eq!(machine.current_state(), OrchestrationState::Disabled);
}

#[tokio::test]
async fn save_is_the_only_path_back_to_enabled() {
    let engine = valid_engine();
    let mut machine =
        OrchestrationStateMachine::for_persisted("42", false, EventPublisher::default());

    let state = machine
        .transition(&engine, StateEvent::Save)
        .await
        .unwrap();
    assert_eq!(state, OrchestrationState::Enabled);
}

#[tokio::test]
async fn save_guard_rejects_invalid_draft() {
    // One-step draft with no name cannot re-enable anything
    let snapshot = WrapperSnapshot::new(Scope::Site, vec![wrapper("w1", &["session"], true)]);
    let mut engine = OrchestrationEngine::new(snapshot);
    engine.set_first_step("w1").unwrap();

    let mut machine =
        OrchestrationStateMachine::for_persisted("42", false, EventPublisher::default());
    let err = machine
        .transition(&engine, StateEvent::Save)
        .await
        .unwrap_err();
    assert!(matches!(err, StateMachineError::GuardFailed(_)));
    assert_eq!(machine.current_state(), OrchestrationState::Disabled);
}

#[tokio::test]
async fn save_while_enabled_stays_enabled() {
    let engine = valid_engine();
    let mut machine =
        OrchestrationStateMachine::for_persisted("42", true, EventPublisher::default());

    let state = machine
        .transition(&engine, StateEvent::Save)
        .await
        .unwrap();
    assert_eq!(state, OrchestrationState::Enabled);
}

#[tokio::test]
async fn auto_disable_requires_a_stale_selection() {
    let engine = valid_engine();
    let mut machine =
        OrchestrationStateMachine::for_persisted("42", true, EventPublisher::default());

    let err = machine
        .transition(
            &engine,
            StateEvent::auto_disable_with_reason("disabled"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StateMachineError::GuardFailed(_)));
    assert_eq!(machine.current_state(), OrchestrationState::Enabled);
}

#[tokio::test]
async fn auto_disable_applies_when_a_selection_is_stale() {
    let engine = stale_engine();
    let mut machine =
        OrchestrationStateMachine::for_persisted("42", true, EventPublisher::default());

    let state = machine
        .transition(
            &engine,
            StateEvent::auto_disable_with_reason("disabled"),
        )
        .await
        .unwrap();
    assert_eq!(state, OrchestrationState::Disabled);
}

#[tokio::test]
async fn transitions_publish_lifecycle_events() {
    let engine = stale_engine();
    let publisher = EventPublisher::new(16);
    let mut receiver = publisher.subscribe();
    let mut machine = OrchestrationStateMachine::for_persisted("42", true, publisher);

    machine
        .transition(
            &engine,
            StateEvent::auto_disable_with_reason("disabled"),
        )
        .await
        .unwrap();

    let event = receiver.recv().await.unwrap();
    assert_eq!(event.name, events::ORCHESTRATION_AUTO_DISABLED);
    assert_eq!(event.context["orchestration_id"], "42");
    assert_eq!(event.context["from_state"], "enabled");
    assert_eq!(event.context["to_state"], "disabled");
    assert_eq!(event.context["reason"], "disabled");

    machine
        .transition(&engine, StateEvent::Save)
        .await
        .unwrap();
    let event = receiver.recv().await.unwrap();
    assert_eq!(event.name, events::ORCHESTRATION_ENABLED);
    assert_eq!(event.context["to_state"], "enabled");
}

#[tokio::test]
async fn fresh_machine_starts_enabled() {
    let machine = OrchestrationStateMachine::new(EventPublisher::default());
    assert_eq!(machine.current_state(), OrchestrationState::Enabled);
}
