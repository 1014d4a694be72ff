use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrative boundary within which an orchestration or a command
/// enablement setting applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "project_id", rename_all = "snake_case")]
pub enum Scope {
    /// Applies platform-wide.
    Site,
    /// Applies to a single project, identified by its opaque project id.
    Project(String),
}

impl Scope {
    /// Create a project scope from any string-ish id
    pub fn project(project_id: impl Into<String>) -> Self {
        Self::Project(project_id.into())
    }

    /// Check if this is the site-wide scope
    pub fn is_site(&self) -> bool {
        matches!(self, Self::Site)
    }

    /// Get the project id, if this is a project scope
    pub fn project_id(&self) -> Option<&str> {
        match self {
            Self::Site => None,
            Self::Project(id) => Some(id),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Site => write!(f, "site"),
            Self::Project(id) => write!(f, "project:{id}"),
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::Site
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_accessors() {
        assert!(Scope::Site.is_site());
        assert!(!Scope::project("p1").is_site());
        assert_eq!(Scope::project("p1").project_id(), Some("p1"));
        assert_eq!(Scope::Site.project_id(), None);
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::Site.to_string(), "site");
        assert_eq!(Scope::project("neuro").to_string(), "project:neuro");
    }

    #[test]
    fn test_scope_serde() {
        let json = serde_json::to_string(&Scope::project("neuro")).unwrap();
        let parsed: Scope = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Scope::project("neuro"));

        let site: Scope = serde_json::from_str("{\"type\":\"site\"}").unwrap();
        assert_eq!(site, Scope::Site);
    }
}
