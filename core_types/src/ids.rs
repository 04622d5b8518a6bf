//! Unique identifiers for namespaces

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a namespace
///
/// Every archive namespace gets its own identity token when it is created.
/// Paths, files and filesystems carry the token of the namespace they belong
/// to, and membership checks compare tokens by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NamespaceId(Uuid);

impl NamespaceId {
    /// Creates a new random namespace ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a namespace ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Returns the hyphenated form used in root identifiers
    pub fn hyphenated(&self) -> String {
        self.0.hyphenated().to_string()
    }
}

impl Default for NamespaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_id_creation() {
        let id1 = NamespaceId::new();
        let id2 = NamespaceId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_namespace_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = NamespaceId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
        assert_eq!(id, NamespaceId::from_uuid(uuid));
    }

    #[test]
    fn test_namespace_id_display() {
        let id = NamespaceId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("Namespace("));
    }

    #[test]
    fn test_hyphenated_form() {
        let id = NamespaceId::from_uuid(Uuid::nil());
        assert_eq!(id.hyphenated(), "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = NamespaceId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: NamespaceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
