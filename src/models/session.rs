use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TerminalKind;

/// One authenticated terminal session, as held in the launcher's roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub terminal_kind: TerminalKind,
    pub terminal_name: String,
    pub username: String,
    pub role: String,
    pub login_timestamp: DateTime<Utc>,
    pub session_id: String,
}

impl SessionRecord {
    pub fn kind_session(&self) -> KindSession {
        KindSession {
            username: self.username.clone(),
            role: self.role.clone(),
            login_timestamp: self.login_timestamp,
        }
    }
}

/// Convenience record of the most recent login for a terminal kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KindSession {
    pub username: String,
    pub role: String,
    pub login_timestamp: DateTime<Utc>,
}

/// Identity carried to a terminal in its launch URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffParams {
    pub username: String,
    pub role: String,
    pub session_id: String,
    pub terminal: Option<TerminalKind>,
}

impl From<&SessionRecord> for HandoffParams {
    fn from(record: &SessionRecord) -> Self {
        Self {
            username: record.username.clone(),
            role: record.role.clone(),
            session_id: record.session_id.clone(),
            terminal: Some(record.terminal_kind),
        }
    }
}

/// A terminal's own copy of who it is. Lives only as long as the terminal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalSession {
    pub username: String,
    pub role: String,
    pub session_id: String,
    pub terminal: Option<TerminalKind>,
    pub login_timestamp: DateTime<Utc>,
}

impl LocalSession {
    pub fn from_handoff(params: HandoffParams, loaded_at: DateTime<Utc>) -> Self {
        Self {
            username: params.username,
            role: params.role,
            session_id: params.session_id,
            terminal: params.terminal,
            login_timestamp: loaded_at,
        }
    }
}
