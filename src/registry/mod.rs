//! # Registry
//!
//! Snapshot-based wrapper registry. The orchestration engine reads wrapper
//! metadata and enablement exclusively through [`WrapperSnapshot`] values the
//! caller constructs, so refresh timing stays with the caller.

pub mod wrapper_registry;

pub use wrapper_registry::{SnapshotStats, WrapperSnapshot};
