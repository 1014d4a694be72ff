use std::fmt;

/// Crate-level error aggregating the module error types.
///
/// Collaborator hosts that do not care which layer failed can funnel every
/// operation through this type; the module errors convert losslessly into
/// their message form here.
#[derive(Debug, Clone, PartialEq)]
pub enum OrchestrationCoreError {
    SnapshotError(String),
    StateTransitionError(String),
    EngineError(String),
    EventError(String),
    ValidationError(String),
    ConfigurationError(String),
    SessionError(String),
}

impl fmt::Display for OrchestrationCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SnapshotError(msg) => write!(f, "Snapshot error: {msg}"),
            Self::StateTransitionError(msg) => write!(f, "State transition error: {msg}"),
            Self::EngineError(msg) => write!(f, "Engine error: {msg}"),
            Self::EventError(msg) => write!(f, "Event error: {msg}"),
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
            Self::SessionError(msg) => write!(f, "Session error: {msg}"),
        }
    }
}

impl std::error::Error for OrchestrationCoreError {}

impl From<crate::orchestration::EngineError> for OrchestrationCoreError {
    fn from(err: crate::orchestration::EngineError) -> Self {
        match err {
            crate::orchestration::EngineError::ValidationFailed { .. } => {
                Self::ValidationError(err.to_string())
            }
            other => Self::EngineError(other.to_string()),
        }
    }
}

impl From<crate::orchestration::SessionError> for OrchestrationCoreError {
    fn from(err: crate::orchestration::SessionError) -> Self {
        match err {
            crate::orchestration::SessionError::Validation { .. } => {
                Self::ValidationError(err.to_string())
            }
            other => Self::SessionError(other.to_string()),
        }
    }
}

impl From<crate::state_machine::StateMachineError> for OrchestrationCoreError {
    fn from(err: crate::state_machine::StateMachineError) -> Self {
        Self::StateTransitionError(err.to_string())
    }
}

impl From<crate::events::PublishError> for OrchestrationCoreError {
    fn from(err: crate::events::PublishError) -> Self {
        Self::EventError(err.to_string())
    }
}

impl From<crate::config::ConfigurationError> for OrchestrationCoreError {
    fn from(err: crate::config::ConfigurationError) -> Self {
        Self::ConfigurationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OrchestrationCoreError>;
