//! # Orchestration Draft
//!
//! The mutable configuration being edited in one dialog session. The draft
//! is the single source of truth for the chain: selectability reports are
//! projections of it, and rendering never feeds state back in.

use super::errors::{EngineError, EngineResult};
use super::types::StepSlot;
use crate::models::{NewOrchestration, Orchestration, Scope};
use serde::{Deserialize, Serialize};

/// In-progress, unsaved orchestration configuration.
///
/// Maintains the flag invariant: whenever any steps exist, exactly one slot
/// carries the first flag. Position 0 is first by default; `mark_first`
/// reassigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationDraft {
    name: String,
    steps: Vec<StepSlot>,
    scope: Scope,
    /// Present when editing an already persisted orchestration
    id: Option<String>,
}

impl OrchestrationDraft {
    /// Create an empty draft for the given scope
    pub fn new(scope: Scope) -> Self {
        Self {
            name: String::new(),
            steps: Vec::new(),
            scope,
            id: None,
        }
    }

    /// Rebuild an equivalent draft from a persisted orchestration.
    ///
    /// Name and ordered wrapper ids are preserved exactly; the first flag
    /// lands on position 0, matching the persisted execution order.
    pub fn from_orchestration(orchestration: &Orchestration) -> Self {
        let steps = orchestration
            .wrapper_ids
            .iter()
            .enumerate()
            .map(|(index, wrapper_id)| StepSlot {
                selection: Some(wrapper_id.clone()),
                first: index == 0,
            })
            .collect();

        Self {
            name: orchestration.name.clone(),
            steps,
            scope: orchestration.scope.clone(),
            id: Some(orchestration.id.clone()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Adopt the server-assigned id after a first successful save
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn steps(&self) -> &[StepSlot] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Number of slots that hold a selection
    pub fn selected_count(&self) -> usize {
        self.steps.iter().filter(|slot| !slot.is_empty()).count()
    }

    /// Index of the slot carrying the first flag
    pub fn first_index(&self) -> Option<usize> {
        self.steps.iter().position(|slot| slot.first)
    }

    /// Selection of the first-flagged slot
    pub fn first_selection(&self) -> Option<&str> {
        self.first_index()
            .and_then(|index| self.steps[index].selection.as_deref())
    }

    /// Selected wrapper ids in execution order (empty slots omitted)
    pub fn wrapper_ids(&self) -> Vec<String> {
        self.steps
            .iter()
            .filter_map(|slot| slot.selection.clone())
            .collect()
    }

    /// Append an empty slot at the end; no reordering side effects
    pub fn add_step(&mut self) {
        self.steps.push(StepSlot::empty());
        self.ensure_first();
    }

    /// Set or clear the selection at `index`
    pub fn select(&mut self, index: usize, selection: Option<String>) -> EngineResult<()> {
        let len = self.steps.len();
        let slot = self
            .steps
            .get_mut(index)
            .ok_or_else(|| EngineError::index_out_of_bounds(index, len))?;
        slot.selection = selection;
        Ok(())
    }

    /// Remove the slot at `index`, returning it
    pub fn remove(&mut self, index: usize) -> EngineResult<StepSlot> {
        if index >= self.steps.len() {
            return Err(EngineError::index_out_of_bounds(index, self.steps.len()));
        }
        let removed = self.steps.remove(index);
        self.ensure_first();
        Ok(removed)
    }

    /// Move the first flag to `index`, demoting every other slot
    pub fn mark_first(&mut self, index: usize) -> EngineResult<()> {
        if index >= self.steps.len() {
            return Err(EngineError::index_out_of_bounds(index, self.steps.len()));
        }
        for (position, slot) in self.steps.iter_mut().enumerate() {
            slot.first = position == index;
        }
        Ok(())
    }

    /// Find the first slot currently holding the given wrapper
    pub fn position_of(&self, wrapper_id: &str) -> Option<usize> {
        self.steps
            .iter()
            .position(|slot| slot.selection.as_deref() == Some(wrapper_id))
    }

    /// Apply an explicit permutation: the slot at `new_order[i]` moves to
    /// position `i`. Flags travel with their slots; the engine decides
    /// whether position 0 changed identity.
    pub fn reorder(&mut self, new_order: &[usize]) -> EngineResult<()> {
        if new_order.len() != self.steps.len() {
            return Err(EngineError::invalid_reorder(format!(
                "permutation length {} does not match step count {}",
                new_order.len(),
                self.steps.len()
            )));
        }

        let mut seen = vec![false; self.steps.len()];
        for &source in new_order {
            if source >= self.steps.len() {
                return Err(EngineError::invalid_reorder(format!(
                    "source index {source} out of bounds"
                )));
            }
            if seen[source] {
                return Err(EngineError::invalid_reorder(format!(
                    "source index {source} appears more than once"
                )));
            }
            seen[source] = true;
        }

        self.steps = new_order
            .iter()
            .map(|&source| self.steps[source].clone())
            .collect();
        Ok(())
    }

    /// Build the persistable record for this draft.
    ///
    /// Always requests `enabled: true`; the server owns final enablement.
    pub fn to_record(&self) -> NewOrchestration {
        NewOrchestration {
            id: self.id.clone(),
            name: self.name.clone(),
            enabled: true,
            wrapper_ids: self.wrapper_ids(),
            scope: self.scope.clone(),
        }
    }

    /// Restore the flag invariant after slots were added or removed
    fn ensure_first(&mut self) {
        if self.steps.is_empty() {
            return;
        }
        if self.first_index().is_none() {
            self.steps[0].first = true;
        }
    }
}
