//! # Orchestration Configuration Engine
//!
//! Core of the crate: maintains a valid (or explicitly invalid, with
//! reasons) ordered selection of command-wrapper steps against a constantly
//! possibly-changing universe of available wrappers.
//!
//! ## Core Components
//!
//! - **OrchestrationDraft**: the mutable chain being edited; single source
//!   of truth for the session
//! - **OrchestrationEngine**: applies mutations and keeps the selectability
//!   report current against the installed snapshot
//! - **EditingSession**: coordinates the engine with the wrapper source,
//!   the persistence endpoint, and the lifecycle event publisher
//! - **validation**: the fixed save-blocking error taxonomy
//! - **selectability**: the pure recomputation of step and candidate flags
//!
//! Draft mutations are synchronous and total; only collaborator calls are
//! async. Stale selections warn but never block saving: that asymmetry is a
//! deliberate, preserved workflow (stage now, reconcile later).

pub mod draft;
pub mod engine;
pub mod errors;
pub mod selectability;
pub mod session;
pub mod types;
pub mod validation;

// Re-export core types and components for easy access
pub use draft::OrchestrationDraft;
pub use engine::OrchestrationEngine;
pub use errors::{
    EngineError, EngineResult, SessionError, SessionResult, TransportError, TransportResult,
};
pub use selectability::{compute_selectability, context_set_for, is_selectable};
pub use session::{EditingSession, PersistenceEndpoint, WrapperSource};
pub use types::{
    Candidate, SelectabilityReport, SessionWarning, StaleReason, StepSelectability, StepSlot,
    WarningKind,
};
pub use validation::{validate, ValidationError};
