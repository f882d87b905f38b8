use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use url::Url;

use super::handoff::{self, HandoffError};
use super::storage::{read_json, write_json, KeyValueStore, StorageError};
use crate::models::{LocalSession, MessageEnvelope, TerminalMessage};

/// Ephemeral key holding a terminal's own session copy.
pub const LOCAL_SESSION_KEY: &str = "terminalSession";

/// Channel a terminal uses to post messages to the launcher that opened it.
pub type Opener = mpsc::UnboundedSender<MessageEnvelope>;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Invalid terminal access: {0}")]
    IllegitimateLaunch(#[from] HandoffError),

    #[error("Terminal storage failed: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// Whether the close request reached a live opener. Nothing is acknowledged.
    pub delivered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackAction {
    /// The launcher is still open behind this window; just close.
    CloseWindow,
    /// No launcher to return to; load it in this window instead.
    Navigate(Url),
}

/// A terminal browsing context, built from the URL it was opened at.
///
/// The context never touches the launcher's roster. Everything it knows
/// about itself comes from the launch URL and lives in its own store.
pub struct TerminalContext {
    url: Url,
    name: String,
    store: Arc<dyn KeyValueStore>,
    opener: Option<Opener>,
    session: LocalSession,
}

impl std::fmt::Debug for TerminalContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalContext")
            .field("url", &self.url.as_str())
            .field("name", &self.name)
            .field("session", &self.session)
            .finish()
    }
}

impl TerminalContext {
    /// Initializes a terminal from its launch URL.
    ///
    /// Fails with `IllegitimateLaunch` when any of `username`, `role` or
    /// `sessionId` is missing; the caller must close the window without
    /// rendering anything.
    pub fn load(
        url: Url,
        name: impl Into<String>,
        store: Arc<dyn KeyValueStore>,
        opener: Option<Opener>,
    ) -> Result<Self, TerminalError> {
        let name = name.into();
        let params = match handoff::parse_launch_url(&url) {
            Ok(params) => params,
            Err(e) => {
                log::warn!("Invalid terminal access to '{}': {}", name, e);
                return Err(e.into());
            }
        };

        let session = LocalSession::from_handoff(params, Utc::now());
        write_json(store.as_ref(), LOCAL_SESSION_KEY, &session)?;
        log::info!(
            "Terminal '{}' loaded for {} ({}), session {}",
            name,
            session.username,
            session.role,
            session.session_id
        );

        Ok(Self {
            url,
            name,
            store,
            opener,
            session,
        })
    }

    pub fn session(&self) -> &LocalSession {
        &self.session
    }

    /// Reads the stored session copy back. `None` once logged out.
    pub fn stored_session(&self) -> Result<Option<LocalSession>, StorageError> {
        read_json(self.store.as_ref(), LOCAL_SESSION_KEY)
    }

    pub fn title(&self) -> String {
        format!("{} - {}", self.session.username, self.name)
    }

    pub fn opener_alive(&self) -> bool {
        self.opener.as_ref().is_some_and(|opener| !opener.is_closed())
    }

    /// Asks the launcher to drop this session, clears the local copy and closes.
    ///
    /// The request is fire-and-forget. The local copy is cleared and the
    /// terminal closed whether or not it was delivered.
    pub fn logout(self) -> LogoutOutcome {
        let message = TerminalMessage::CloseTerminalSession {
            session_id: self.session.session_id.clone(),
        };
        let envelope = MessageEnvelope::new(handoff::origin_of(&self.url), message);

        let delivered = match &self.opener {
            Some(opener) if !opener.is_closed() => opener.send(envelope).is_ok(),
            _ => false,
        };
        if !delivered {
            log::warn!(
                "Opener unreachable; session {} stays in the launcher roster",
                self.session.session_id
            );
        }

        if let Err(e) = self.store.remove(LOCAL_SESSION_KEY) {
            log::error!("Failed to clear local session for '{}': {}", self.name, e);
        }
        log::info!("Terminal '{}' logged out and closed", self.name);

        LogoutOutcome { delivered }
    }

    pub fn back_to_launcher(&self) -> Result<BackAction, HandoffError> {
        if self.opener_alive() {
            Ok(BackAction::CloseWindow)
        } else {
            Ok(BackAction::Navigate(handoff::launcher_url(&self.url)?))
        }
    }
}
