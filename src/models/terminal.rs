use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::theme::TerminalTheme;

/// The fixed set of dashboard terminals a user can log into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TerminalKind {
    Sales,
    System,
    Analytics,
    Finance,
}

impl TerminalKind {
    pub const ALL: [TerminalKind; 4] = [
        TerminalKind::Sales,
        TerminalKind::System,
        TerminalKind::Analytics,
        TerminalKind::Finance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalKind::Sales => "sales",
            TerminalKind::System => "system",
            TerminalKind::Analytics => "analytics",
            TerminalKind::Finance => "finance",
        }
    }

    /// Name of the browsing context a terminal of this kind is opened in.
    pub fn window_name(&self) -> String {
        format!("terminal_{}", self.as_str())
    }

    /// Persistent storage key of the per-kind convenience record.
    pub fn session_key(&self) -> String {
        format!("{}_session", self.as_str())
    }
}

impl fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown terminal kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for TerminalKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TerminalKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: role.into(),
        }
    }

    /// Plaintext comparison of both fields.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Everything the launcher knows about one terminal kind.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    pub kind: TerminalKind,
    pub name: String,
    pub credentials: Vec<Credential>,
    pub theme: TerminalTheme,
    pub page: String,
}

/// Serializable view of a registry entry for the login forms. Passwords are left out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TerminalSummary {
    pub kind: TerminalKind,
    pub name: String,
    pub icon: String,
    pub accent: String,
    pub usernames: Vec<String>,
}

impl From<&RegistryEntry> for TerminalSummary {
    fn from(entry: &RegistryEntry) -> Self {
        Self {
            kind: entry.kind,
            name: entry.name.clone(),
            icon: entry.theme.icon.to_string(),
            accent: entry.theme.accent.to_hex(),
            usernames: entry.credentials.iter().map(|c| c.username.clone()).collect(),
        }
    }
}
