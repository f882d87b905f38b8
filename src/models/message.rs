use serde::{Deserialize, Serialize};

/// Messages a terminal may post to the launcher that opened it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminalMessage {
    CloseTerminalSession {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
}

/// A posted message together with the origin of the context that sent it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageEnvelope {
    pub origin: String,
    pub message: TerminalMessage,
}

impl MessageEnvelope {
    pub fn new(origin: impl Into<String>, message: TerminalMessage) -> Self {
        Self {
            origin: origin.into(),
            message,
        }
    }
}
