use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::mpsc;
use url::Url;

use super::handoff::{self, HandoffError};
use super::registry::{CredentialRegistry, RegistryError};
use super::roster::SessionRoster;
use super::storage::{KeyValueStore, StorageError};
use super::window::{WindowHandle, WindowHost};
use crate::models::{Credential, MessageEnvelope, SessionRecord, TerminalKind, TerminalMessage};

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Please enter both username and password")]
    InvalidInput,

    #[error("Invalid credentials. Try: {hint}")]
    InvalidCredentials { hint: String },

    #[error(transparent)]
    UnknownTerminal(#[from] RegistryError),

    #[error("Please allow pop-ups for this website to open terminals.")]
    PopupBlocked,

    #[error("Could not build terminal URL: {0}")]
    Handoff(#[from] HandoffError),

    #[error("Session storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Receives the roster after every change so it can be redrawn.
pub trait RosterListener: Send + Sync {
    fn roster_changed(&self, sessions: &[SessionRecord]);
}

/// Result of a successful login: the issued session and where it was opened.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub session: SessionRecord,
    pub url: Url,
    pub window: WindowHandle,
}

/// The launcher context: validates logins, owns the session roster and
/// opens or closes terminal windows.
pub struct Launcher {
    registry: CredentialRegistry,
    roster: SessionRoster,
    windows: Arc<dyn WindowHost>,
    handles: Mutex<HashMap<String, WindowHandle>>,
    pages_base: Url,
    allowed_origin: Option<String>,
    listener: Option<Arc<dyn RosterListener>>,
}

impl Launcher {
    pub fn new(
        registry: CredentialRegistry,
        store: Arc<dyn KeyValueStore>,
        windows: Arc<dyn WindowHost>,
        pages_base: Url,
    ) -> Self {
        let allowed_origin = Some(handoff::origin_of(&pages_base));
        Self {
            registry,
            roster: SessionRoster::new(store),
            windows,
            handles: Mutex::new(HashMap::new()),
            pages_base,
            allowed_origin,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn RosterListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Restricts accepted terminal messages to `origin`. `None` accepts any origin.
    pub fn with_allowed_origin(mut self, origin: Option<String>) -> Self {
        self.allowed_origin = origin;
        self
    }

    pub fn registry(&self) -> &CredentialRegistry {
        &self.registry
    }

    pub fn roster(&self) -> &SessionRoster {
        &self.roster
    }

    pub fn sessions(&self) -> Result<Vec<SessionRecord>, StorageError> {
        self.roster.list()
    }

    /// Handles a submitted login form: validate, issue, then open the terminal.
    ///
    /// Issuance and handoff succeed or fail together. If the window cannot be
    /// opened the new roster entry is removed and the previous per-kind record
    /// restored.
    pub fn login(&self, kind: TerminalKind, username: &str, password: &str) -> Result<LoginSuccess, LoginError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(LoginError::InvalidInput);
        }

        let entry = self.registry.lookup(kind)?;
        let Some(credential) = self.registry.validate(kind, username, password) else {
            log::info!("Rejected login for '{}' on {} terminal", username, kind);
            let hint = entry
                .credentials
                .first()
                .map(|c| format!("{}/{}", c.username, c.password))
                .unwrap_or_default();
            return Err(LoginError::InvalidCredentials { hint });
        };

        let previous = self.roster.kind_session(kind)?;
        let session = self.issue(kind, username, credential)?;

        match self.launch(&session) {
            Ok((url, window)) => Ok(LoginSuccess { session, url, window }),
            Err(e) => {
                log::warn!("Rolling back session {}: {}", session.session_id, e);
                self.roster.remove_by_id(&session.session_id)?;
                match previous {
                    Some(previous) => self.roster.set_kind_session(kind, &previous)?,
                    None => self.roster.clear_kind_session(kind)?,
                }
                self.refresh();
                Err(e)
            }
        }
    }

    /// Turns a validated credential into a stored session.
    ///
    /// Either both the roster entry and the per-kind record are written, or
    /// the roster is left as it was.
    pub fn issue(
        &self,
        kind: TerminalKind,
        username: &str,
        credential: &Credential,
    ) -> Result<SessionRecord, LoginError> {
        let entry = self.registry.lookup(kind)?;
        let session_id = self.fresh_session_id()?;

        let record = SessionRecord {
            terminal_kind: kind,
            terminal_name: entry.name.clone(),
            username: username.to_string(),
            role: credential.role.clone(),
            login_timestamp: Utc::now(),
            session_id,
        };

        self.roster.append(record.clone())?;
        if let Err(e) = self.roster.set_kind_session(kind, &record.kind_session()) {
            log::warn!("Rolling back session {}: {}", record.session_id, e);
            self.roster.remove_by_id(&record.session_id)?;
            return Err(e.into());
        }
        log::info!(
            "Issued session {} for {} ({}) on {}",
            record.session_id,
            record.username,
            record.role,
            entry.name
        );

        self.refresh();
        Ok(record)
    }

    /// Opens the terminal window for `session`, handing its identity over in the URL.
    pub fn launch(&self, session: &SessionRecord) -> Result<(Url, WindowHandle), LoginError> {
        let entry = self.registry.lookup(session.terminal_kind)?;
        let url = handoff::build_launch_url(&self.pages_base, entry, session)?;
        let name = session.terminal_kind.window_name();

        let handle = self.windows.open(&url, &name).ok_or(LoginError::PopupBlocked)?;
        if let Ok(mut handles) = self.handles.lock() {
            handles.insert(session.session_id.clone(), handle.clone());
        }
        log::info!("Opened '{}' at {}", name, url.path());
        Ok((url, handle))
    }

    /// Drops a session from the roster and closes its window if still open.
    ///
    /// Returns `false` when no such session exists; calling twice is harmless.
    pub fn close_session(&self, session_id: &str) -> Result<bool, StorageError> {
        let Some(record) = self.roster.get(session_id)? else {
            log::debug!("Session {} already closed", session_id);
            return Ok(false);
        };

        self.roster.remove_by_id(session_id)?;
        self.roster.clear_kind_session(record.terminal_kind)?;
        self.refresh();
        log::info!("Closed session {} ({} on {})", session_id, record.username, record.terminal_name);

        let handle = self
            .handles
            .lock()
            .ok()
            .and_then(|mut handles| handles.remove(session_id));
        let closed = match handle {
            Some(handle) => self.windows.close(&handle),
            // Issued before a restart; all that is left is the window name.
            None => self.windows.close_named(&record.terminal_kind.window_name()),
        };
        if !closed {
            log::debug!("Window for session {} was already closed by the user", session_id);
        }

        Ok(true)
    }

    /// Applies a message posted by a terminal. Returns whether a session was closed.
    pub fn handle_message(&self, envelope: MessageEnvelope) -> Result<bool, StorageError> {
        if let Some(allowed) = &self.allowed_origin {
            if &envelope.origin != allowed {
                log::warn!("Ignoring message from untrusted origin {}", envelope.origin);
                return Ok(false);
            }
        }

        match envelope.message {
            TerminalMessage::CloseTerminalSession { session_id } => {
                log::info!("Terminal requested close of session {}", session_id);
                self.close_session(&session_id)
            }
        }
    }

    /// Applies every message already waiting in `mailbox` without blocking.
    pub fn process_pending(&self, mailbox: &mut mpsc::UnboundedReceiver<MessageEnvelope>) -> usize {
        let mut handled = 0;
        while let Ok(envelope) = mailbox.try_recv() {
            if let Err(e) = self.handle_message(envelope) {
                log::error!("Failed to apply terminal message: {}", e);
            }
            handled += 1;
        }
        handled
    }

    fn fresh_session_id(&self) -> Result<String, StorageError> {
        let existing = self.roster.list()?;
        loop {
            let candidate = crate::utils::generate_session_id();
            if !existing.iter().any(|record| record.session_id == candidate) {
                return Ok(candidate);
            }
        }
    }

    fn refresh(&self) {
        let Some(listener) = &self.listener else {
            return;
        };
        match self.roster.list() {
            Ok(sessions) => listener.roster_changed(&sessions),
            Err(e) => log::error!("Failed to read roster for display: {}", e),
        }
    }
}
