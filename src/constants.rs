//! # System Constants
//!
//! Core constants and event names that define the operational boundaries of
//! the orchestration configuration core.

// Re-export state type for convenience
pub use crate::state_machine::OrchestrationState as OrchestrationStatus;

/// Minimum number of selected steps an orchestration must chain
pub const MIN_ORCHESTRATION_STEPS: usize = 2;

/// Default capacity of the lifecycle event broadcast channel
pub const DEFAULT_EVENT_CAPACITY: usize = 1000;

/// Lifecycle events published by the engine, session, and state machine
pub mod events {
    // Draft lifecycle events
    pub const DRAFT_OPENED: &str = "orchestration.draft_opened";
    pub const DRAFT_DISCARDED: &str = "orchestration.draft_discarded";

    // Registry events
    pub const SNAPSHOT_REFRESHED: &str = "registry.snapshot_refreshed";
    pub const STALE_SELECTIONS_DETECTED: &str = "registry.stale_selections_detected";

    // Orchestration lifecycle events
    pub const ORCHESTRATION_SAVED: &str = "orchestration.saved";
    pub const ORCHESTRATION_DELETED: &str = "orchestration.deleted";
    pub const ORCHESTRATION_ENABLED: &str = "orchestration.enabled";
    pub const ORCHESTRATION_DISABLED: &str = "orchestration.disabled";
    pub const ORCHESTRATION_AUTO_DISABLED: &str = "orchestration.auto_disabled";
}
