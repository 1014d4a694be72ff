//! # Orchestration Types
//!
//! Shared types for the configuration engine: step slots, stale reasons,
//! selectability reports, candidate listings, and session warnings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One position in the draft's ordered chain.
///
/// `selection == None` is the distinguished "no selection" marker; the slot
/// still occupies its position and blocks saving until filled or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSlot {
    /// Selected wrapper id, if any
    pub selection: Option<String>,
    /// Whether this slot defines the shared execution context
    pub first: bool,
}

impl StepSlot {
    /// Create an unselected slot
    pub fn empty() -> Self {
        Self {
            selection: None,
            first: false,
        }
    }

    /// Check if this slot holds no selection
    pub fn is_empty(&self) -> bool {
        self.selection.is_none()
    }
}

/// Why a currently selected wrapper is no longer allowed at its step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaleReason {
    /// Enablement was revoked externally, or the wrapper left the snapshot
    Disabled,
    /// The first step's context set no longer overlaps this wrapper's
    ContextMismatch,
}

impl StaleReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::ContextMismatch => "context-mismatch",
        }
    }
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-step result of a selectability recomputation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSelectability {
    pub index: usize,
    pub first: bool,
    pub selection: Option<String>,
    /// Present when the current selection is no longer allowed
    pub stale: Option<StaleReason>,
}

impl StepSelectability {
    /// The "selected and disallowed" condition that forces the runtime
    /// enabled state off
    pub fn disabled_but_selected(&self) -> bool {
        self.stale.is_some()
    }
}

/// Pure projection of draft + snapshot produced by every recomputation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectabilityReport {
    /// Version of the snapshot this report was computed against
    pub snapshot_version: u64,
    /// Context tags established by the first step; empty when none chosen
    pub context_set: HashSet<String>,
    pub steps: Vec<StepSelectability>,
}

impl SelectabilityReport {
    /// Check whether any step selection is stale
    pub fn has_stale(&self) -> bool {
        self.steps.iter().any(StepSelectability::disabled_but_selected)
    }

    /// Iterate the stale steps
    pub fn stale_steps(&self) -> impl Iterator<Item = &StepSelectability> {
        self.steps.iter().filter(|s| s.disabled_but_selected())
    }

    pub fn stale_count(&self) -> usize {
        self.stale_steps().count()
    }
}

/// One wrapper offered for selection at a given slot, with its current
/// selectability flag (display fields are pass-through for the UI host)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub wrapper_id: String,
    pub name: String,
    pub label: String,
    pub selectable: bool,
}

/// Kind of a dismissible, non-fatal session warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The best-effort reactive disable request was rejected by the endpoint
    ReactiveDisableFailed,
}

/// Dismissible, non-fatal warning surfaced to the UI host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWarning {
    pub kind: WarningKind,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

impl SessionWarning {
    /// Warning for a failed best-effort reactive disable request
    pub fn reactive_disable_failed(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ReactiveDisableFailed,
            message: message.into(),
            occurred_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_reason_strings() {
        assert_eq!(StaleReason::Disabled.to_string(), "disabled");
        assert_eq!(StaleReason::ContextMismatch.to_string(), "context-mismatch");
        assert_eq!(
            serde_json::to_string(&StaleReason::ContextMismatch).unwrap(),
            "\"context-mismatch\""
        );
    }

    #[test]
    fn test_report_stale_accounting() {
        let report = SelectabilityReport {
            snapshot_version: 1,
            context_set: HashSet::new(),
            steps: vec![
                StepSelectability {
                    index: 0,
                    first: true,
                    selection: Some("w1".to_string()),
                    stale: None,
                },
                StepSelectability {
                    index: 1,
                    first: false,
                    selection: Some("w2".to_string()),
                    stale: Some(StaleReason::Disabled),
                },
            ],
        };
        assert!(report.has_stale());
        assert_eq!(report.stale_count(), 1);
        assert_eq!(report.stale_steps().next().unwrap().index, 1);
    }
}
