#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Orchestration Core
//!
//! Headless Rust core for container command orchestration configuration,
//! designed to complement the imaging platform's administrative UI.
//!
//! ## Overview
//!
//! Administrators chain command wrappers into orchestrations: ordered
//! multi-step pipelines whose downstream choices are constrained by the
//! execution context the first step establishes. This crate owns the
//! in-memory model of that configuration work: the draft being edited, the
//! versioned snapshot of available wrappers and their enablement, the
//! derived selectability of every choice, the fixed validation taxonomy,
//! and the client-observed enabled/disabled state machine with its reactive
//! downgrade when a referenced wrapper is disabled elsewhere.
//!
//! Rendering, REST transport, and persistence mechanics stay with the host:
//! the engine consumes and produces plain data records and talks to
//! collaborators through the [`orchestration::WrapperSource`] and
//! [`orchestration::PersistenceEndpoint`] traits.
//!
//! ## Module Organization
//!
//! - [`models`] - Plain data records (commands, wrappers, orchestrations, scopes)
//! - [`registry`] - Versioned wrapper snapshots
//! - [`orchestration`] - Draft, engine, validation, selectability, editing session
//! - [`state_machine`] - Enabled/disabled lifecycle with guards and actions
//! - [`events`] - Lifecycle event publisher
//! - [`config`] - Configuration management
//! - [`error`] - Crate-level error aggregation
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use orchestration_core::models::{CommandWrapper, Scope};
//! use orchestration_core::orchestration::OrchestrationEngine;
//! use orchestration_core::registry::WrapperSnapshot;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let wrappers = vec![
//!     CommandWrapper::new("dcm2niix", "dcm2niix", "DICOM to NIfTI", ["session"], true),
//!     CommandWrapper::new("qc-report", "qc-report", "QC Report", ["session", "scan"], true),
//! ];
//! let mut engine = OrchestrationEngine::new(WrapperSnapshot::new(Scope::Site, wrappers));
//!
//! engine.set_first_step("dcm2niix")?;
//! engine.add_step();
//! engine.select_step(1, Some("qc-report"))?;
//! engine.set_name("convert-then-qc");
//!
//! assert!(engine.validate().is_ok());
//! let record = engine.to_persistable_record()?;
//! assert_eq!(record.wrapper_ids, vec!["dcm2niix".to_string(), "qc-report".to_string()]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency Model
//!
//! Draft mutations are synchronous, total, and lock-free: the draft is
//! mutated only by the single calling thread, and invalid intermediate
//! states are representable until validate/save time. Collaborator calls
//! are async; the session treats their responses as confirmations of state
//! it already applied optimistically.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod registry;
pub mod state_machine;

// Re-export the most commonly used types at the crate root
pub use config::CoreConfig;
pub use error::{OrchestrationCoreError, Result};
pub use events::EventPublisher;
pub use models::{Command, CommandWrapper, NewOrchestration, Orchestration, Scope};
pub use orchestration::{
    EditingSession, OrchestrationDraft, OrchestrationEngine, SelectabilityReport, ValidationError,
};
pub use registry::WrapperSnapshot;
pub use state_machine::{OrchestrationState, OrchestrationStateMachine, StateEvent};
