use crate::models::{Credential, RegistryEntry, TerminalKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown terminal kind: {0}")]
    UnknownKind(String),
}

/// Static lookup table from terminal kind to its metadata and credentials.
///
/// Built once at startup; there is no mutation API.
#[derive(Debug, Clone)]
pub struct CredentialRegistry {
    entries: Vec<RegistryEntry>,
}

impl CredentialRegistry {
    pub fn new(entries: Vec<RegistryEntry>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(crate::utils::get_default_registry_entries())
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn lookup(&self, kind: TerminalKind) -> Result<&RegistryEntry, RegistryError> {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind)
            .ok_or_else(|| RegistryError::UnknownKind(kind.to_string()))
    }

    pub fn lookup_str(&self, kind: &str) -> Result<&RegistryEntry, RegistryError> {
        let kind: TerminalKind = kind
            .parse()
            .map_err(|_| RegistryError::UnknownKind(kind.to_string()))?;
        self.lookup(kind)
    }

    /// First credential of `kind` matching both fields exactly.
    ///
    /// An unknown kind validates nothing.
    pub fn validate(&self, kind: TerminalKind, username: &str, password: &str) -> Option<&Credential> {
        self.lookup(kind)
            .ok()?
            .credentials
            .iter()
            .find(|credential| credential.matches(username, password))
    }
}

impl Default for CredentialRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
