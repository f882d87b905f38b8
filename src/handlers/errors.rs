use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::{LoginError, RegistryError, StorageError, TerminalError};

#[derive(Error, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("{message}")]
    InvalidCredentials { message: String },

    #[error("{message}")]
    PopupBlocked { message: String },

    #[error("Invalid terminal access: {message}")]
    IllegitimateTerminalLaunch { message: String },

    #[error("Unknown terminal: {message}")]
    UnknownTerminal { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CommandError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    pub fn popup_blocked(message: impl Into<String>) -> Self {
        Self::PopupBlocked {
            message: message.into(),
        }
    }

    pub fn illegitimate_launch(message: impl Into<String>) -> Self {
        Self::IllegitimateTerminalLaunch {
            message: message.into(),
        }
    }

    pub fn unknown_terminal(message: impl Into<String>) -> Self {
        Self::UnknownTerminal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Errors shown inline under the login form and dismissed after a while.
    pub fn is_inline_notice(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::InvalidCredentials { .. })
    }
}

impl From<LoginError> for CommandError {
    fn from(error: LoginError) -> Self {
        let message = error.to_string();
        match error {
            LoginError::InvalidInput => Self::invalid_input(message),
            LoginError::InvalidCredentials { .. } => Self::invalid_credentials(message),
            LoginError::UnknownTerminal(_) => Self::unknown_terminal(message),
            LoginError::PopupBlocked => Self::popup_blocked(message),
            LoginError::Handoff(_) => Self::internal(message),
            LoginError::Storage(_) => Self::storage(message),
        }
    }
}

impl From<TerminalError> for CommandError {
    fn from(error: TerminalError) -> Self {
        match error {
            TerminalError::IllegitimateLaunch(e) => Self::illegitimate_launch(e.to_string()),
            TerminalError::Storage(e) => Self::storage(e.to_string()),
        }
    }
}

impl From<RegistryError> for CommandError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::UnknownKind(kind) => Self::unknown_terminal(kind),
        }
    }
}

impl From<StorageError> for CommandError {
    fn from(error: StorageError) -> Self {
        Self::storage(error.to_string())
    }
}

impl From<CommandError> for String {
    fn from(error: CommandError) -> Self {
        error.to_string()
    }
}

pub type CommandResult<T> = Result<T, CommandError>;
