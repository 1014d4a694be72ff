use super::errors::{GuardError, GuardResult};
use crate::orchestration::engine::OrchestrationEngine;

/// Trait for implementing state transition guards.
///
/// Guards are synchronous: they read the in-memory draft and snapshot only,
/// so a transition attempt never blocks the calling thread.
pub trait StateGuard {
    /// Check if a transition is allowed
    fn check(&self, engine: &OrchestrationEngine) -> GuardResult<bool>;

    /// Get a description of this guard for logging
    fn description(&self) -> &'static str;
}

/// Guard requiring the current draft to pass structural validation.
///
/// Applied to the Save transition: a disabled orchestration can only come
/// back to enabled through a save of a valid draft.
pub struct DraftValidGuard;

impl StateGuard for DraftValidGuard {
    fn check(&self, engine: &OrchestrationEngine) -> GuardResult<bool> {
        match engine.validate() {
            Ok(()) => Ok(true),
            Err(reasons) => Err(GuardError::DraftInvalid { reasons }),
        }
    }

    fn description(&self) -> &'static str {
        "Draft must pass structural validation"
    }
}

/// Guard requiring at least one stale selection before a reactive disable.
///
/// Prevents spurious automatic downgrades when a snapshot refresh did not
/// actually invalidate anything.
pub struct StaleSelectionGuard;

impl StateGuard for StaleSelectionGuard {
    fn check(&self, engine: &OrchestrationEngine) -> GuardResult<bool> {
        if engine.report().has_stale() {
            Ok(true)
        } else {
            Err(GuardError::business_rule_violation(
                "Reactive disable requested but no step selection is stale",
            ))
        }
    }

    fn description(&self) -> &'static str {
        "At least one step selection must be stale"
    }
}
