pub mod errors;

use crate::models::*;
use crate::services::{Launcher, LocalWindowHost};
use errors::{CommandError, CommandResult};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub session: SessionRecord,
    pub terminal_url: String,
    pub message: String,
}

// Terminal catalog

pub fn get_terminal_catalog(launcher: &Launcher) -> CommandResult<Vec<TerminalSummary>> {
    log::debug!("Getting terminal catalog");
    Ok(launcher
        .registry()
        .entries()
        .iter()
        .map(TerminalSummary::from)
        .collect())
}

// Login form handlers

pub fn login_terminal(
    launcher: &Launcher,
    terminal: &str,
    username: &str,
    password: &str,
) -> CommandResult<LoginResponse> {
    log::info!("Login requested for '{}' on terminal '{}'", username.trim(), terminal);
    if terminal.trim().is_empty() {
        return Err(CommandError::invalid_input("Terminal cannot be empty"));
    }
    let kind = launcher.registry().lookup_str(terminal.trim())?.kind;

    let success = launcher.login(kind, username, password).map_err(|e| {
        log::warn!("Login to '{}' failed: {}", terminal, e);
        CommandError::from(e)
    })?;

    Ok(LoginResponse {
        message: format!("{} accessed successfully!", success.session.terminal_name),
        terminal_url: success.url.to_string(),
        session: success.session,
    })
}

// Session roster handlers

pub fn list_active_sessions(launcher: &Launcher) -> CommandResult<Vec<SessionRecord>> {
    Ok(launcher.sessions()?)
}

pub fn close_session(launcher: &Launcher, session_id: &str) -> CommandResult<bool> {
    log::info!("Closing session {}", session_id);
    if session_id.trim().is_empty() {
        return Err(CommandError::invalid_input("Session ID cannot be empty"));
    }
    Ok(launcher.close_session(session_id.trim())?)
}

// Terminal windows

/// Loads a terminal page typed straight into a window's address bar.
///
/// Returns the name of the window now showing it.
pub fn open_terminal_url(host: &LocalWindowHost, url: &str) -> CommandResult<String> {
    log::info!("Opening terminal page {}", url);
    let url = Url::parse(url.trim()).map_err(|e| CommandError::invalid_input(format!("Invalid URL: {}", e)))?;
    Ok(host.open_direct(&url)?.name)
}

/// Alerts raised by launched windows that closed themselves, oldest first.
pub fn take_terminal_alerts(host: &LocalWindowHost) -> Vec<CommandError> {
    host.take_alerts().into_iter().map(CommandError::from).collect()
}

// Cross-window messages

/// Applies a raw JSON message posted by a terminal window.
pub fn receive_terminal_message(launcher: &Launcher, origin: &str, payload: &str) -> CommandResult<bool> {
    let message: TerminalMessage = serde_json::from_str(payload).map_err(|e| {
        log::warn!("Dropping malformed terminal message from {}: {}", origin, e);
        CommandError::invalid_input(format!("Malformed terminal message: {}", e))
    })?;
    Ok(launcher.handle_message(MessageEnvelope::new(origin, message))?)
}
