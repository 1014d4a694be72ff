use super::scope::Scope;
use serde::{Deserialize, Serialize};

/// Orchestration is the persisted, named, ordered chain of command-wrapper
/// steps. The client-side model is a read-through cache of the server entity;
/// the server owns the `id` and the final say on `enabled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orchestration {
    /// Server-assigned identifier
    pub id: String,
    pub name: String,
    pub enabled: bool,
    /// Execution order; references `CommandWrapper::wrapper_id`
    pub wrapper_ids: Vec<String>,
    pub scope: Scope,
}

/// NewOrchestration is the persistable record produced from a draft that
/// passed validation (without server-generated fields for first saves).
///
/// `enabled` is always `true` on save: the client requests enablement and the
/// server may later force it off when its own rules detect incompatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrchestration {
    /// Present when re-saving an existing orchestration
    pub id: Option<String>,
    pub name: String,
    pub enabled: bool,
    pub wrapper_ids: Vec<String>,
    pub scope: Scope,
}

impl Orchestration {
    pub fn step_count(&self) -> usize {
        self.wrapper_ids.len()
    }

    /// Check whether this orchestration references the given wrapper
    pub fn references_wrapper(&self, wrapper_id: &str) -> bool {
        self.wrapper_ids.iter().any(|id| id == wrapper_id)
    }
}

impl NewOrchestration {
    /// Check whether this record would update an existing orchestration
    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references_wrapper() {
        let orchestration = Orchestration {
            id: "42".to_string(),
            name: "convert-then-qc".to_string(),
            enabled: true,
            wrapper_ids: vec!["w1".to_string(), "w2".to_string()],
            scope: Scope::Site,
        };
        assert!(orchestration.references_wrapper("w1"));
        assert!(!orchestration.references_wrapper("w9"));
        assert_eq!(orchestration.step_count(), 2);
    }

    #[test]
    fn test_new_orchestration_is_update() {
        let record = NewOrchestration {
            id: None,
            name: "n".to_string(),
            enabled: true,
            wrapper_ids: vec![],
            scope: Scope::Site,
        };
        assert!(!record.is_update());
        let update = NewOrchestration {
            id: Some("7".to_string()),
            ..record
        };
        assert!(update.is_update());
    }
}
