use serde::{Deserialize, Serialize};

/// Command represents a unit of executable work known to the platform.
///
/// The engine never interprets the image reference; it is carried through to
/// the UI host and the persistence endpoint as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Opaque identifier, unique within its scope
    pub command_id: String,
    /// Container image the command runs in (opaque string)
    pub image: String,
}

impl Command {
    pub fn new(command_id: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            command_id: command_id.into(),
            image: image.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_round_trip() {
        let command = Command::new("dcm2niix", "registry.example.org/dcm2niix:1.0");
        let json = serde_json::to_string(&command).unwrap();
        let parsed: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, command);
    }
}
