//! # State Machine Error Types
//!
//! Structured errors for orchestration state transitions, guards, and
//! post-transition actions.

use crate::orchestration::validation::ValidationError;
use thiserror::Error;

/// Errors raised while evaluating a transition guard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    #[error("Draft failed validation: {reasons:?}")]
    DraftInvalid { reasons: Vec<ValidationError> },

    #[error("Business rule violation: {message}")]
    BusinessRuleViolation { message: String },
}

impl GuardError {
    /// Create a business rule violation with the given message
    pub fn business_rule_violation(message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation {
            message: message.into(),
        }
    }
}

/// Errors raised while executing a post-transition action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Failed to publish lifecycle event: {event_name}")]
    EventPublishFailed { event_name: String },
}

/// Errors raised by the orchestration state machine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateMachineError {
    #[error("Invalid transition from {from} on event {event}")]
    InvalidTransition { from: String, event: String },

    #[error("Guard check failed: {0}")]
    GuardFailed(#[from] GuardError),

    #[error("Action execution failed: {0}")]
    ActionFailed(#[from] ActionError),

    #[error("Internal state machine error: {0}")]
    Internal(String),
}

impl StateMachineError {
    /// Create an invalid transition error from state and event descriptors
    pub fn invalid_transition(from: impl Into<String>, event: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.into(),
            event: event.into(),
        }
    }
}

/// Result type alias for guard checks
pub type GuardResult<T> = Result<T, GuardError>;

/// Result type alias for action execution
pub type ActionResult<T> = Result<T, ActionError>;

/// Result type alias for state machine operations
pub type StateMachineResult<T> = Result<T, StateMachineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StateMachineError::invalid_transition("disabled", "disable");
        let display = err.to_string();
        assert!(display.contains("disabled"));
        assert!(display.contains("disable"));
    }

    #[test]
    fn test_guard_error_conversion() {
        let guard_err = GuardError::business_rule_violation("nothing stale");
        let machine_err: StateMachineError = guard_err.into();
        assert!(matches!(machine_err, StateMachineError::GuardFailed(_)));
    }
}
