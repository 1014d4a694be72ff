use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// CommandWrapper is one published entry point of a Command.
///
/// Orchestration steps reference wrappers, never raw commands. The `enabled`
/// flag is owned by the enablement subsystem: the engine observes it through
/// snapshots and never writes it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandWrapper {
    /// Opaque identifier, unique within scope and stable across the session
    pub wrapper_id: String,
    /// Wrapper name (display pass-through)
    pub name: String,
    /// Human-facing label (display pass-through)
    pub label: String,
    /// Data-hierarchy levels this wrapper can execute against
    pub contexts: HashSet<String>,
    /// Whether the wrapper is currently enabled in its scope
    pub enabled: bool,
}

impl CommandWrapper {
    pub fn new(
        wrapper_id: impl Into<String>,
        name: impl Into<String>,
        label: impl Into<String>,
        contexts: impl IntoIterator<Item = impl Into<String>>,
        enabled: bool,
    ) -> Self {
        Self {
            wrapper_id: wrapper_id.into(),
            name: name.into(),
            label: label.into(),
            contexts: contexts.into_iter().map(Into::into).collect(),
            enabled,
        }
    }

    /// Check if this wrapper can execute against the given context tag
    pub fn supports_context(&self, tag: &str) -> bool {
        self.contexts.contains(tag)
    }

    /// Check if this wrapper shares at least one context tag with `other`
    pub fn shares_context_with(&self, other: &HashSet<String>) -> bool {
        !self.contexts.is_disjoint(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_wrapper() -> CommandWrapper {
        CommandWrapper::new("w1", "dcm2niix", "DICOM to NIfTI", ["session"], true)
    }

    #[test]
    fn test_supports_context() {
        let wrapper = session_wrapper();
        assert!(wrapper.supports_context("session"));
        assert!(!wrapper.supports_context("scan"));
    }

    #[test]
    fn test_shares_context_with() {
        let wrapper = session_wrapper();
        let session_set: HashSet<String> = ["session".to_string()].into_iter().collect();
        let scan_set: HashSet<String> = ["scan".to_string()].into_iter().collect();
        assert!(wrapper.shares_context_with(&session_set));
        assert!(!wrapper.shares_context_with(&scan_set));
    }

    #[test]
    fn test_wrapper_serde_round_trip() {
        let wrapper = session_wrapper();
        let json = serde_json::to_string(&wrapper).unwrap();
        let parsed: CommandWrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, wrapper);
    }
}
