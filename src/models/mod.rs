//! # Data Model
//!
//! Plain data records for the orchestration configuration core. These mirror
//! the server-side entities the UI host displays and the persistence endpoint
//! stores; the engine treats every identifier and image reference as opaque.

pub mod core;

pub use core::{Command, CommandWrapper, NewOrchestration, Orchestration, Scope};
