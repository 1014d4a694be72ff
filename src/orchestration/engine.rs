//! # Orchestration Configuration Engine
//!
//! Owns the draft and the current wrapper snapshot, applies mutations, and
//! keeps the selectability report current. Mutations are synchronous and
//! total: they return structured errors, never panic, and leave invalid
//! intermediate states representable until validate/save time.

use super::draft::OrchestrationDraft;
use super::errors::{EngineError, EngineResult};
use super::selectability::{compute_selectability, is_selectable};
use super::types::{Candidate, SelectabilityReport};
use super::validation::{self, ValidationError};
use crate::models::{NewOrchestration, Orchestration, Scope};
use crate::registry::WrapperSnapshot;
use crate::state_machine::OrchestrationState;
use std::collections::HashSet;
use tracing::debug;

/// Engine maintaining one draft against a refreshable wrapper snapshot.
///
/// The cached report is recomputed after every mutation and every snapshot
/// update, so reads are always consistent with the latest change.
#[derive(Debug, Clone)]
pub struct OrchestrationEngine {
    draft: OrchestrationDraft,
    snapshot: WrapperSnapshot,
    report: SelectabilityReport,
}

impl OrchestrationEngine {
    /// Create an engine with an empty draft for the snapshot's scope
    pub fn new(snapshot: WrapperSnapshot) -> Self {
        let draft = OrchestrationDraft::new(snapshot.scope().clone());
        let report = compute_selectability(&draft, &snapshot);
        Self {
            draft,
            snapshot,
            report,
        }
    }

    /// Create an engine editing an existing persisted orchestration
    pub fn load(orchestration: &Orchestration, snapshot: WrapperSnapshot) -> Self {
        let draft = OrchestrationDraft::from_orchestration(orchestration);
        let report = compute_selectability(&draft, &snapshot);
        Self {
            draft,
            snapshot,
            report,
        }
    }

    pub fn draft(&self) -> &OrchestrationDraft {
        &self.draft
    }

    pub fn snapshot(&self) -> &WrapperSnapshot {
        &self.snapshot
    }

    /// Latest selectability report; consistent with the last mutation
    pub fn report(&self) -> &SelectabilityReport {
        &self.report
    }

    /// Context tags established by the current first step
    pub fn context_set(&self) -> &HashSet<String> {
        &self.report.context_set
    }

    pub fn scope(&self) -> &Scope {
        self.draft.scope()
    }

    /// Rename the draft
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.set_name(name);
    }

    /// Designate the step holding `wrapper_id` as first, redefining the
    /// shared context set and re-evaluating every other step.
    ///
    /// The wrapper must be known to the snapshot (it may be disabled; that
    /// only produces a stale flag). If no slot currently holds it, it is
    /// selected into position 0, creating the slot when the draft is empty.
    pub fn set_first_step(&mut self, wrapper_id: &str) -> EngineResult<()> {
        if !self.snapshot.contains(wrapper_id) {
            return Err(EngineError::unknown_wrapper(wrapper_id));
        }

        match self.draft.position_of(wrapper_id) {
            Some(index) => self.draft.mark_first(index)?,
            None => {
                if self.draft.step_count() == 0 {
                    self.draft.add_step();
                }
                self.draft.select(0, Some(wrapper_id.to_string()))?;
                self.draft.mark_first(0)?;
            }
        }

        debug!(wrapper_id = wrapper_id, "First step designated");
        self.recompute();
        Ok(())
    }

    /// Set or clear the selection at `index`.
    ///
    /// Changing the first slot's selection redefines the context set, which
    /// the recomputation picks up; every step's stale flag is refreshed.
    pub fn select_step(&mut self, index: usize, selection: Option<&str>) -> EngineResult<()> {
        if let Some(wrapper_id) = selection {
            if !self.snapshot.contains(wrapper_id) {
                return Err(EngineError::unknown_wrapper(wrapper_id));
            }
        }

        self.draft.select(index, selection.map(str::to_string))?;

        debug!(index = index, selection = selection, "Step selection changed");
        self.recompute();
        Ok(())
    }

    /// Append an empty slot at the end
    pub fn add_step(&mut self) {
        self.draft.add_step();
        self.recompute();
    }

    /// Remove the slot at `index`.
    ///
    /// Removing the first step promotes the first remaining slot whose
    /// selection still carries a non-empty context set, adopting
    /// `set_first_step` semantics; with no such slot the flag falls back to
    /// position 0, and an emptied draft resets the context set entirely.
    pub fn remove_step(&mut self, index: usize) -> EngineResult<()> {
        let removed = self.draft.remove(index)?;

        if removed.first {
            if let Some(promoted) = self.promotion_candidate() {
                self.draft.mark_first(promoted)?;
            }
            // Otherwise the draft's own invariant already put the flag on
            // position 0 (or the draft is empty)
        }

        debug!(
            index = index,
            removed_selection = removed.selection.as_deref(),
            was_first = removed.first,
            "Step removed"
        );
        self.recompute();
        Ok(())
    }

    /// Apply an explicit permutation from drag-and-drop.
    ///
    /// If the occupant of position 0 changes, this is equivalent to
    /// `set_first_step` on the new occupant: the flag moves to position 0
    /// and the previous first step is demoted.
    pub fn reorder_steps(&mut self, new_order: &[usize]) -> EngineResult<()> {
        self.draft.reorder(new_order)?;

        if new_order.first().is_some_and(|&source| source != 0) {
            self.draft.mark_first(0)?;
        }

        debug!(new_order = ?new_order, "Steps reordered");
        self.recompute();
        Ok(())
    }

    /// Install a refreshed snapshot and recompute against it
    pub fn update_snapshot(&mut self, snapshot: WrapperSnapshot) -> &SelectabilityReport {
        debug!(
            version = snapshot.version(),
            wrapper_count = snapshot.len(),
            "Snapshot updated"
        );
        self.snapshot = snapshot;
        self.recompute();
        &self.report
    }

    /// Pure recomputation of the selectability report.
    ///
    /// Equal to the cached [`report`](Self::report) between mutations;
    /// calling it repeatedly without intervening changes yields identical
    /// results.
    pub fn compute_selectability(&self) -> SelectabilityReport {
        compute_selectability(&self.draft, &self.snapshot)
    }

    /// Wrappers offered for selection at `index`, in snapshot order.
    ///
    /// The first slot accepts any enabled wrapper (it defines the context
    /// set); other slots apply the full selectability rule.
    pub fn selectable_candidates(&self, index: usize) -> EngineResult<Vec<Candidate>> {
        let slot = self
            .draft
            .steps()
            .get(index)
            .ok_or_else(|| EngineError::index_out_of_bounds(index, self.draft.step_count()))?;

        let candidates = self
            .snapshot
            .iter()
            .map(|wrapper| Candidate {
                wrapper_id: wrapper.wrapper_id.clone(),
                name: wrapper.name.clone(),
                label: wrapper.label.clone(),
                selectable: if slot.first {
                    wrapper.enabled
                } else {
                    is_selectable(wrapper, &self.report.context_set)
                },
            })
            .collect();

        Ok(candidates)
    }

    /// Validate the draft against the fixed error taxonomy.
    ///
    /// Stale selections never appear here; they are soft warnings only.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validation::validate(&self.draft)
    }

    /// Build the persistable record for a draft that passes validation
    pub fn to_persistable_record(&self) -> EngineResult<NewOrchestration> {
        self.validate()
            .map_err(|reasons| EngineError::ValidationFailed { reasons })?;
        Ok(self.draft.to_record())
    }

    /// Adopt the server-assigned id after a successful save
    pub fn set_persisted_id(&mut self, id: impl Into<String>) {
        self.draft.set_id(id);
    }

    /// Runtime state the UI host should display: any stale selection forces
    /// disabled, independent of the state the server last confirmed
    pub fn effective_state(&self, confirmed: OrchestrationState) -> OrchestrationState {
        if self.report.has_stale() {
            OrchestrationState::Disabled
        } else {
            confirmed
        }
    }

    fn recompute(&mut self) {
        self.report = compute_selectability(&self.draft, &self.snapshot);
    }

    fn promotion_candidate(&self) -> Option<usize> {
        self.draft.steps().iter().position(|slot| {
            slot.selection
                .as_deref()
                .and_then(|wrapper_id| self.snapshot.get(wrapper_id))
                .is_some_and(|wrapper| !wrapper.contexts.is_empty())
        })
    }
}
