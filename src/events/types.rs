use crate::constants::events;
use crate::models::Scope;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Typed payloads for every externally observable lifecycle transition.
///
/// Each variant maps to one canonical event name from [`crate::constants::events`];
/// untyped consumers can match on the name, typed consumers deserialize the
/// context back into this enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum LifecycleEvent {
    /// An editing session opened a draft, new or loaded from a persisted record
    DraftOpened {
        session_id: Uuid,
        scope: Scope,
        orchestration_id: Option<String>,
    },
    /// An editing session discarded its draft on close
    DraftDiscarded { session_id: Uuid },
    /// A refreshed wrapper snapshot was installed into the engine
    SnapshotRefreshed {
        session_id: Uuid,
        version: u64,
        wrapper_count: usize,
    },
    /// The latest recomputation flagged stale step selections
    StaleSelectionsDetected {
        session_id: Uuid,
        stale_count: usize,
    },
    /// A draft was persisted successfully
    Saved {
        orchestration_id: String,
        name: String,
        step_count: usize,
    },
    /// A persisted orchestration was deleted
    Deleted { orchestration_id: String },
}

impl LifecycleEvent {
    /// Canonical event name for this payload
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::DraftOpened { .. } => events::DRAFT_OPENED,
            Self::DraftDiscarded { .. } => events::DRAFT_DISCARDED,
            Self::SnapshotRefreshed { .. } => events::SNAPSHOT_REFRESHED,
            Self::StaleSelectionsDetected { .. } => events::STALE_SELECTIONS_DETECTED,
            Self::Saved { .. } => events::ORCHESTRATION_SAVED,
            Self::Deleted { .. } => events::ORCHESTRATION_DELETED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let saved = LifecycleEvent::Saved {
            orchestration_id: "42".to_string(),
            name: "convert-then-qc".to_string(),
            step_count: 2,
        };
        assert_eq!(saved.event_name(), events::ORCHESTRATION_SAVED);

        let deleted = LifecycleEvent::Deleted {
            orchestration_id: "42".to_string(),
        };
        assert_eq!(deleted.event_name(), events::ORCHESTRATION_DELETED);
    }

    #[test]
    fn test_lifecycle_event_serde() {
        let event = LifecycleEvent::StaleSelectionsDetected {
            session_id: Uuid::new_v4(),
            stale_count: 3,
        };
        let json = serde_json::to_string(&event).unwrap();
        let parsed: LifecycleEvent = serde_json::from_str(&json).unwrap();
        match parsed {
            LifecycleEvent::StaleSelectionsDetected { stale_count, .. } => {
                assert_eq!(stale_count, 3)
            }
            other => panic!("Unexpected variant: {other:?}"),
        }
    }
}
