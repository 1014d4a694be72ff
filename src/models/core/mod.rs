//! Core data records shared across the engine, registry, and collaborators.

pub mod command;
pub mod command_wrapper;
pub mod orchestration;
pub mod scope;

pub use command::Command;
pub use command_wrapper::CommandWrapper;
pub use orchestration::{NewOrchestration, Orchestration};
pub use scope::Scope;
