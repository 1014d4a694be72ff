//! # Engine and Session Error Types
//!
//! Structured errors for draft mutations, session coordination, and the
//! transport boundary. Mutation errors are values, never panics: invalid
//! intermediate drafts stay representable and are only rejected at
//! validate/save time.

use super::validation::ValidationError;
use crate::state_machine::StateMachineError;
use thiserror::Error;

/// Errors returned by draft mutation operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown wrapper: {wrapper_id}")]
    UnknownWrapper { wrapper_id: String },

    #[error("Step index {index} out of bounds (draft has {len} steps)")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid reorder: {reason}")]
    InvalidReorder { reason: String },

    #[error("Draft failed validation: {reasons:?}")]
    ValidationFailed { reasons: Vec<ValidationError> },
}

impl EngineError {
    /// Create an unknown wrapper error
    pub fn unknown_wrapper(wrapper_id: impl Into<String>) -> Self {
        Self::UnknownWrapper {
            wrapper_id: wrapper_id.into(),
        }
    }

    /// Create an index out of bounds error
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    /// Create an invalid reorder error
    pub fn invalid_reorder(reason: impl Into<String>) -> Self {
        Self::InvalidReorder {
            reason: reason.into(),
        }
    }
}

/// Failure reported by a collaborator at the transport boundary.
///
/// The wire format and the failure cause belong to the collaborator; the
/// session only relays the message verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors returned by editing session operations
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Draft failed validation: {reasons:?}")]
    Validation { reasons: Vec<ValidationError> },

    #[error("Persistence endpoint rejected {operation}: {message}")]
    Transport { operation: String, message: String },

    #[error("Wrapper source failed: {message}")]
    SnapshotFetch { message: String },

    #[error("No persisted orchestration to {operation}")]
    NotPersisted { operation: String },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    StateMachine(#[from] StateMachineError),
}

impl SessionError {
    /// Create a transport error for the named operation
    pub fn transport(operation: impl Into<String>, error: TransportError) -> Self {
        Self::Transport {
            operation: operation.into(),
            message: error.message,
        }
    }

    /// Create a snapshot fetch error
    pub fn snapshot_fetch(error: TransportError) -> Self {
        Self::SnapshotFetch {
            message: error.message,
        }
    }

    /// Create a not-persisted error for the named operation
    pub fn not_persisted(operation: impl Into<String>) -> Self {
        Self::NotPersisted {
            operation: operation.into(),
        }
    }
}

/// Result type alias for engine mutations
pub type EngineResult<T> = Result<T, EngineError>;

/// Result type alias for transport-boundary calls
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
