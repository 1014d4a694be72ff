use serde::{Deserialize, Serialize};

/// Events that can trigger orchestration state transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum StateEvent {
    /// Explicit user action to switch the orchestration off
    Disable,
    /// Automatic downgrade after the engine observed a stale selection
    AutoDisable(String),
    /// Successful save of a currently valid draft
    Save,
}

impl StateEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Disable => "disable",
            Self::AutoDisable(_) => "auto_disable",
            Self::Save => "save",
        }
    }

    /// Extract the downgrade reason if this is a reactive disable
    pub fn disable_reason(&self) -> Option<&str> {
        match self {
            Self::AutoDisable(reason) => Some(reason),
            _ => None,
        }
    }

    /// Check if this event was initiated by the engine rather than the user
    pub fn is_automatic(&self) -> bool {
        matches!(self, Self::AutoDisable(_))
    }

    /// Create a reactive disable event with the given reason
    pub fn auto_disable_with_reason(reason: impl Into<String>) -> Self {
        Self::AutoDisable(reason.into())
    }
}
