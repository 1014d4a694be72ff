//! # Draft Validation
//!
//! Structural validation of an orchestration draft against the fixed error
//! taxonomy. Stale selections are deliberately not part of this taxonomy:
//! they are soft warnings so a user can save a partially stale chain and
//! reconcile it in stages.

use super::draft::OrchestrationDraft;
use crate::constants::MIN_ORCHESTRATION_STEPS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a draft cannot be persisted, in the fixed order they are reported
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Orchestration name must not be empty")]
    MissingName,

    #[error("An orchestration must chain at least {MIN_ORCHESTRATION_STEPS} commands")]
    TooFewSteps,

    #[error("Every step must have a command selected")]
    EmptySlotPresent,
}

/// Validate a draft for persistence.
///
/// Returns all applicable errors, ordered: name first, then step count, then
/// empty slots. Whitespace-only names count as missing.
pub fn validate(draft: &OrchestrationDraft) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if draft.name().trim().is_empty() {
        errors.push(ValidationError::MissingName);
    }

    if draft.selected_count() < MIN_ORCHESTRATION_STEPS {
        errors.push(ValidationError::TooFewSteps);
    }

    if draft.steps().iter().any(|slot| slot.is_empty()) {
        errors.push(ValidationError::EmptySlotPresent);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
