//! # Wrapper Snapshot Registry
//!
//! Explicit, versioned snapshot of the command wrappers available in the
//! active scope. The snapshot replaces the ambient global registries of the
//! legacy UI: callers fetch wrapper lists from the `WrapperSource`
//! collaborator and hand the engine a new snapshot whenever enablement may
//! have changed elsewhere. The engine only ever reads it.

use crate::models::{CommandWrapper, Scope};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Versioned, read-only view of the wrappers known in one scope.
///
/// Wrapper order is the order the source supplied, which the UI host uses
/// for candidate listings. Lookups go through an id index.
#[derive(Debug, Clone)]
pub struct WrapperSnapshot {
    version: u64,
    scope: Scope,
    fetched_at: DateTime<Utc>,
    wrappers: Vec<CommandWrapper>,
    index: HashMap<String, usize>,
}

/// Summary counts for the UI host's chrome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotStats {
    pub total_wrappers: usize,
    pub enabled_wrappers: usize,
    pub disabled_wrappers: usize,
    pub context_tags: Vec<String>,
}

impl WrapperSnapshot {
    /// Build the first snapshot of a session (version 1).
    ///
    /// Duplicate wrapper ids in the source list are tolerated, last wins;
    /// stale external snapshots are resolved by re-fetching, not by erroring.
    pub fn new(scope: Scope, wrappers: Vec<CommandWrapper>) -> Self {
        Self::with_version(scope, wrappers, 1)
    }

    /// Build an empty snapshot, useful before the first fetch completes
    pub fn empty(scope: Scope) -> Self {
        Self::with_version(scope, Vec::new(), 0)
    }

    /// Successor snapshot carrying the same scope with a bumped version
    pub fn refreshed(&self, wrappers: Vec<CommandWrapper>) -> Self {
        Self::with_version(self.scope.clone(), wrappers, self.version + 1)
    }

    fn with_version(scope: Scope, wrappers: Vec<CommandWrapper>, version: u64) -> Self {
        let mut index = HashMap::with_capacity(wrappers.len());
        for (position, wrapper) in wrappers.iter().enumerate() {
            if let Some(previous) = index.insert(wrapper.wrapper_id.clone(), position) {
                warn!(
                    wrapper_id = %wrapper.wrapper_id,
                    previous_position = previous,
                    "Duplicate wrapper id in snapshot, keeping the later entry"
                );
            }
        }

        debug!(
            scope = %scope,
            version = version,
            wrapper_count = wrappers.len(),
            "Wrapper snapshot constructed"
        );

        Self {
            version,
            scope,
            fetched_at: Utc::now(),
            wrappers,
            index,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Look up a wrapper by id
    pub fn get(&self, wrapper_id: &str) -> Option<&CommandWrapper> {
        self.index
            .get(wrapper_id)
            .and_then(|position| self.wrappers.get(*position))
    }

    /// Check whether the wrapper id is known to this snapshot
    pub fn contains(&self, wrapper_id: &str) -> bool {
        self.index.contains_key(wrapper_id)
    }

    /// Check whether the wrapper is known and currently enabled
    pub fn is_enabled(&self, wrapper_id: &str) -> bool {
        self.get(wrapper_id).is_some_and(|wrapper| wrapper.enabled)
    }

    /// Iterate wrappers in source order
    pub fn iter(&self) -> impl Iterator<Item = &CommandWrapper> {
        self.wrappers.iter()
    }

    pub fn len(&self) -> usize {
        self.wrappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wrappers.is_empty()
    }

    /// Summary counts over the snapshot
    pub fn stats(&self) -> SnapshotStats {
        let enabled = self.wrappers.iter().filter(|w| w.enabled).count();
        let mut context_tags: Vec<String> = self
            .wrappers
            .iter()
            .flat_map(|w| w.contexts.iter().cloned())
            .collect();
        context_tags.sort();
        context_tags.dedup();

        SnapshotStats {
            total_wrappers: self.wrappers.len(),
            enabled_wrappers: enabled,
            disabled_wrappers: self.wrappers.len() - enabled,
            context_tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapper(id: &str, contexts: &[&str], enabled: bool) -> CommandWrapper {
        CommandWrapper::new(id, format!("{id}-name"), format!("{id}-label"), contexts.iter().copied(), enabled)
    }

    #[test]
    fn test_snapshot_lookup_and_enablement() {
        let snapshot = WrapperSnapshot::new(
            Scope::Site,
            vec![wrapper("w1", &["session"], true), wrapper("w2", &["scan"], false)],
        );

        assert_eq!(snapshot.version(), 1);
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains("w1"));
        assert!(snapshot.is_enabled("w1"));
        assert!(!snapshot.is_enabled("w2"));
        assert!(!snapshot.is_enabled("missing"));
        assert_eq!(snapshot.get("w2").unwrap().label, "w2-label");
    }

    #[test]
    fn test_refreshed_bumps_version_and_replaces_contents() {
        let first = WrapperSnapshot::new(Scope::project("p1"), vec![wrapper("w1", &["session"], true)]);
        let second = first.refreshed(vec![wrapper("w1", &["session"], false)]);

        assert_eq!(second.version(), 2);
        assert_eq!(second.scope(), &Scope::project("p1"));
        assert!(first.is_enabled("w1"));
        assert!(!second.is_enabled("w1"));
    }

    #[test]
    fn test_duplicate_ids_last_wins() {
        let snapshot = WrapperSnapshot::new(
            Scope::Site,
            vec![wrapper("w1", &["session"], false), wrapper("w1", &["scan"], true)],
        );
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.is_enabled("w1"));
        assert!(snapshot.get("w1").unwrap().supports_context("scan"));
    }

    #[test]
    fn test_stats() {
        let snapshot = WrapperSnapshot::new(
            Scope::Site,
            vec![
                wrapper("w1", &["session"], true),
                wrapper("w2", &["scan", "session"], false),
            ],
        );
        let stats = snapshot.stats();
        assert_eq!(stats.total_wrappers, 2);
        assert_eq!(stats.enabled_wrappers, 1);
        assert_eq!(stats.disabled_wrappers, 1);
        assert_eq!(stats.context_tags, vec!["scan".to_string(), "session".to_string()]);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = WrapperSnapshot::empty(Scope::Site);
        assert_eq!(snapshot.version(), 0);
        assert!(snapshot.is_empty());
        assert!(!snapshot.contains("w1"));
    }
}
