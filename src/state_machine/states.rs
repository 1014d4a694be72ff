use serde::{Deserialize, Serialize};
use std::fmt;

/// Client-observed state of a persisted orchestration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestrationState {
    /// Orchestration may be triggered by platform events
    Enabled,
    /// Orchestration is switched off, explicitly or reactively
    Disabled,
}

impl OrchestrationState {
    /// Check if the orchestration may currently run
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Check if the orchestration is switched off
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

impl fmt::Display for OrchestrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => write!(f, "enabled"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

impl std::str::FromStr for OrchestrationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enabled" => Ok(Self::Enabled),
            "disabled" => Ok(Self::Disabled),
            _ => Err(format!("Invalid orchestration state: {s}")),
        }
    }
}

/// Server sets enabled on first save, so a fresh orchestration starts enabled
impl Default for OrchestrationState {
    fn default() -> Self {
        Self::Enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_checks() {
        assert!(OrchestrationState::Enabled.is_enabled());
        assert!(!OrchestrationState::Enabled.is_disabled());
        assert!(OrchestrationState::Disabled.is_disabled());
        assert!(!OrchestrationState::Disabled.is_enabled());
    }

    #[test]
    fn test_state_string_conversion() {
        assert_eq!(OrchestrationState::Enabled.to_string(), "enabled");
        assert_eq!(
            "disabled".parse::<OrchestrationState>().unwrap(),
            OrchestrationState::Disabled
        );
        assert!("unknown".parse::<OrchestrationState>().is_err());
    }

    #[test]
    fn test_state_serde() {
        let json = serde_json::to_string(&OrchestrationState::Disabled).unwrap();
        assert_eq!(json, "\"disabled\"");
        let parsed: OrchestrationState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, OrchestrationState::Disabled);
    }

    #[test]
    fn test_default_state() {
        assert_eq!(OrchestrationState::default(), OrchestrationState::Enabled);
    }
}
