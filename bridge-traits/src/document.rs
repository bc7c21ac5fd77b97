//! Opaque document references and access grants.

use serde::{Deserialize, Serialize};

/// Opaque, host-issued reference naming a document or directory.
///
/// The bridge never inspects the token; it is handed back to the host
/// provider unchanged. On Android-style hosts this is a content URI, on
/// desktop hosts a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentRef(String);

impl DocumentRef {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentRef {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for DocumentRef {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Access requested at picker launch and taken durably on the returned
/// reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantMode {
    Read,
    Write,
    ReadWrite,
}

impl GrantMode {
    pub fn allows_read(self) -> bool {
        matches!(self, GrantMode::Read | GrantMode::ReadWrite)
    }

    pub fn allows_write(self) -> bool {
        matches!(self, GrantMode::Write | GrantMode::ReadWrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_passes_token_through() {
        let reference = DocumentRef::new("content://documents/tree/primary%3AExports");
        assert_eq!(
            reference.to_string(),
            "content://documents/tree/primary%3AExports"
        );
        assert_eq!(reference.as_str(), reference.to_string());
    }

    #[test]
    fn test_grant_mode_directions() {
        assert!(GrantMode::Read.allows_read());
        assert!(!GrantMode::Read.allows_write());
        assert!(GrantMode::Write.allows_write());
        assert!(!GrantMode::Write.allows_read());
        assert!(GrantMode::ReadWrite.allows_read());
        assert!(GrantMode::ReadWrite.allows_write());
    }
}
