//! # Editing Session
//!
//! Coordinates one engine instance with the external collaborators: the
//! wrapper source, the persistence endpoint, and the lifecycle event
//! publisher. One session corresponds to one open editing dialog; closing
//! it discards the draft unconditionally.
//!
//! The in-memory draft is the single source of truth. Collaborator
//! responses are confirmations: the reactive disable applies its state
//! locally before the store answers, while every other rejected request is
//! terminal for that operation, leaving the draft intact for a retry.

use super::engine::OrchestrationEngine;
use super::errors::{SessionError, SessionResult, TransportResult};
use super::types::{SelectabilityReport, SessionWarning};
use crate::events::{EventPublisher, LifecycleEvent};
use crate::models::{CommandWrapper, NewOrchestration, Orchestration, Scope};
use crate::registry::WrapperSnapshot;
use crate::state_machine::{OrchestrationState, OrchestrationStateMachine, StateEvent};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Supplies the current wrapper list for a scope on demand.
///
/// A refreshable snapshot, not a push stream: the session re-fetches when
/// the caller signals that enablement may have changed elsewhere.
#[async_trait]
pub trait WrapperSource: Send + Sync {
    async fn fetch(&self, scope: &Scope) -> TransportResult<Vec<CommandWrapper>>;
}

/// Stores orchestration records and enablement flags.
///
/// REST paths and verbs belong to the implementor; the session only sees
/// records in and records (or failures) out.
#[async_trait]
pub trait PersistenceEndpoint: Send + Sync {
    async fn save(&self, record: NewOrchestration) -> TransportResult<Orchestration>;
    async fn set_enabled(&self, id: &str, enabled: bool) -> TransportResult<()>;
    async fn delete(&self, id: &str) -> TransportResult<()>;
}

/// One open editing dialog: engine, collaborators, and the client-observed
/// state machine for the orchestration being edited.
pub struct EditingSession {
    session_id: Uuid,
    engine: OrchestrationEngine,
    persisted: Option<Orchestration>,
    machine: OrchestrationStateMachine,
    wrapper_source: Arc<dyn WrapperSource>,
    endpoint: Arc<dyn PersistenceEndpoint>,
    event_publisher: EventPublisher,
    warnings: Vec<SessionWarning>,
}

impl EditingSession {
    /// Open a session over a brand new draft in the given scope
    #[instrument(skip(wrapper_source, endpoint, event_publisher), fields(scope = %scope))]
    pub async fn open_new(
        scope: Scope,
        wrapper_source: Arc<dyn WrapperSource>,
        endpoint: Arc<dyn PersistenceEndpoint>,
        event_publisher: EventPublisher,
    ) -> SessionResult<Self> {
        let wrappers = wrapper_source
            .fetch(&scope)
            .await
            .map_err(SessionError::snapshot_fetch)?;
        let snapshot = WrapperSnapshot::new(scope.clone(), wrappers);

        let session = Self {
            session_id: Uuid::new_v4(),
            engine: OrchestrationEngine::new(snapshot),
            persisted: None,
            machine: OrchestrationStateMachine::new(event_publisher.clone()),
            wrapper_source,
            endpoint,
            event_publisher,
            warnings: Vec::new(),
        };

        session
            .event_publisher
            .publish_lifecycle(&LifecycleEvent::DraftOpened {
                session_id: session.session_id,
                scope,
                orchestration_id: None,
            })
            .await
            .ok();

        Ok(session)
    }

    /// Open a session editing an existing persisted orchestration.
    ///
    /// The freshly fetched snapshot is reconciled immediately: selections
    /// invalidated while the dialog was closed trigger the reactive
    /// downgrade on open.
    #[instrument(skip(orchestration, wrapper_source, endpoint, event_publisher), fields(orchestration_id = %orchestration.id))]
    pub async fn open_existing(
        orchestration: Orchestration,
        wrapper_source: Arc<dyn WrapperSource>,
        endpoint: Arc<dyn PersistenceEndpoint>,
        event_publisher: EventPublisher,
    ) -> SessionResult<Self> {
        let wrappers = wrapper_source
            .fetch(&orchestration.scope)
            .await
            .map_err(SessionError::snapshot_fetch)?;
        let snapshot = WrapperSnapshot::new(orchestration.scope.clone(), wrappers);

        let mut session = Self {
            session_id: Uuid::new_v4(),
            engine: OrchestrationEngine::load(&orchestration, snapshot),
            machine: OrchestrationStateMachine::for_persisted(
                orchestration.id.clone(),
                orchestration.enabled,
                event_publisher.clone(),
            ),
            persisted: Some(orchestration),
            wrapper_source,
            endpoint,
            event_publisher,
            warnings: Vec::new(),
        };

        session
            .event_publisher
            .publish_lifecycle(&LifecycleEvent::DraftOpened {
                session_id: session.session_id,
                scope: session.engine.scope().clone(),
                orchestration_id: session.persisted.as_ref().map(|o| o.id.clone()),
            })
            .await
            .ok();

        session.reconcile_staleness().await;

        Ok(session)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The engine, for reads (reports, candidates, validation)
    pub fn engine(&self) -> &OrchestrationEngine {
        &self.engine
    }

    /// The engine, for draft mutations. Mutations are synchronous; the
    /// reactive downgrade only fires on snapshot refreshes.
    pub fn engine_mut(&mut self) -> &mut OrchestrationEngine {
        &mut self.engine
    }

    /// The persisted orchestration this session is editing, if any
    pub fn persisted(&self) -> Option<&Orchestration> {
        self.persisted.as_ref()
    }

    /// State last confirmed by an applied transition
    pub fn confirmed_state(&self) -> OrchestrationState {
        self.machine.current_state()
    }

    /// State the UI host should display right now: stale selections force
    /// disabled regardless of the confirmed state
    pub fn effective_state(&self) -> OrchestrationState {
        self.engine.effective_state(self.machine.current_state())
    }

    /// Dismissible non-fatal warnings accumulated so far
    pub fn warnings(&self) -> &[SessionWarning] {
        &self.warnings
    }

    /// Drain the warning queue (the UI host shows them once)
    pub fn take_warnings(&mut self) -> Vec<SessionWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Re-fetch the wrapper list and install it as the next snapshot.
    ///
    /// A fetch failure is terminal for the refresh; the previous snapshot
    /// stays installed. On success, newly stale selections trigger the
    /// reactive downgrade for a persisted, enabled orchestration.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn refresh_snapshot(&mut self) -> SessionResult<&SelectabilityReport> {
        let scope = self.engine.scope().clone();
        let wrappers = self
            .wrapper_source
            .fetch(&scope)
            .await
            .map_err(SessionError::snapshot_fetch)?;

        let snapshot = self.engine.snapshot().refreshed(wrappers);
        let version = snapshot.version();
        let wrapper_count = snapshot.len();
        self.engine.update_snapshot(snapshot);

        self.event_publisher
            .publish_lifecycle(&LifecycleEvent::SnapshotRefreshed {
                session_id: self.session_id,
                version,
                wrapper_count,
            })
            .await
            .ok();

        self.reconcile_staleness().await;

        Ok(self.engine.report())
    }

    /// Persist the draft: validate, send, adopt the stored record.
    ///
    /// Save is the only path from disabled back to enabled. A stale
    /// selection does not block it; an endpoint rejection is terminal and
    /// leaves the draft untouched for retry.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn save(&mut self) -> SessionResult<Orchestration> {
        let record = self
            .engine
            .to_persistable_record()
            .map_err(|err| match err {
                super::errors::EngineError::ValidationFailed { reasons } => {
                    SessionError::Validation { reasons }
                }
                other => SessionError::Engine(other),
            })?;

        if self.engine.report().has_stale() {
            info!(
                stale_count = self.engine.report().stale_count(),
                "Saving with stale selections; reconciliation deferred to the user"
            );
        }

        let stored = self
            .endpoint
            .save(record)
            .await
            .map_err(|err| SessionError::transport("save", err))?;

        self.engine.set_persisted_id(stored.id.clone());
        self.machine.set_orchestration_id(stored.id.clone());
        self.persisted = Some(stored.clone());

        self.machine.transition(&self.engine, StateEvent::Save).await?;

        info!(
            orchestration_id = %stored.id,
            name = %stored.name,
            step_count = stored.step_count(),
            "💾 Orchestration saved"
        );

        self.event_publisher
            .publish_lifecycle(&LifecycleEvent::Saved {
                orchestration_id: stored.id.clone(),
                name: stored.name.clone(),
                step_count: stored.step_count(),
            })
            .await
            .ok();

        Ok(stored)
    }

    /// Explicitly disable the persisted orchestration.
    ///
    /// The endpoint is asked first; only a confirmed disable transitions
    /// the local state. Contrast with the reactive path, which flips
    /// locally regardless.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn disable(&mut self) -> SessionResult<()> {
        let id = self
            .persisted
            .as_ref()
            .map(|o| o.id.clone())
            .ok_or_else(|| SessionError::not_persisted("disable"))?;

        self.endpoint
            .set_enabled(&id, false)
            .await
            .map_err(|err| SessionError::transport("disable", err))?;

        self.machine
            .transition(&self.engine, StateEvent::Disable)
            .await?;
        if let Some(persisted) = self.persisted.as_mut() {
            persisted.enabled = false;
        }

        Ok(())
    }

    /// Delete the persisted orchestration; an exit from the model, not a
    /// state transition
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn delete(&mut self) -> SessionResult<()> {
        let id = self
            .persisted
            .as_ref()
            .map(|o| o.id.clone())
            .ok_or_else(|| SessionError::not_persisted("delete"))?;

        self.endpoint
            .delete(&id)
            .await
            .map_err(|err| SessionError::transport("delete", err))?;

        self.persisted = None;

        self.event_publisher
            .publish_lifecycle(&LifecycleEvent::Deleted {
                orchestration_id: id,
            })
            .await
            .ok();

        Ok(())
    }

    /// Close the dialog, discarding the draft unconditionally
    pub async fn close(self) {
        self.event_publisher
            .publish_lifecycle(&LifecycleEvent::DraftDiscarded {
                session_id: self.session_id,
            })
            .await
            .ok();
    }

    /// Reactive downgrade: when the engine sees stale selections for a
    /// persisted, enabled orchestration, the client-visible state flips
    /// immediately and the backing store is told best-effort. A rejected
    /// disable request becomes a warning, not an error; the next explicit
    /// save reconciles truth.
    async fn reconcile_staleness(&mut self) {
        let report = self.engine.report();
        if !report.has_stale() {
            return;
        }

        self.event_publisher
            .publish_lifecycle(&LifecycleEvent::StaleSelectionsDetected {
                session_id: self.session_id,
                stale_count: report.stale_count(),
            })
            .await
            .ok();

        let Some(persisted) = self.persisted.as_ref() else {
            return;
        };
        if !self.machine.current_state().is_enabled() {
            return;
        }

        let id = persisted.id.clone();
        let reason = report
            .stale_steps()
            .next()
            .and_then(|step| step.stale)
            .map(|reason| reason.to_string())
            .unwrap_or_else(|| "stale selection".to_string());

        // Local flip first; the store is a confirmation target
        if let Err(err) = self
            .machine
            .transition(&self.engine, StateEvent::auto_disable_with_reason(reason.clone()))
            .await
        {
            warn!(error = %err, "Reactive disable transition rejected");
            return;
        }
        if let Some(persisted) = self.persisted.as_mut() {
            persisted.enabled = false;
        }

        info!(
            orchestration_id = %id,
            reason = %reason,
            "Orchestration disabled reactively after stale selection"
        );

        if let Err(err) = self.endpoint.set_enabled(&id, false).await {
            warn!(
                orchestration_id = %id,
                error = %err,
                "Best-effort reactive disable request failed; will reconcile on next save"
            );
            self.warnings.push(SessionWarning::reactive_disable_failed(format!(
                "Could not disable orchestration {id} on the server: {err}"
            )));
        }
    }
}
