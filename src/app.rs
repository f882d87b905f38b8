//! # Application Module
//!
//! This module contains the launcher console: a line-oriented stand-in for the
//! launcher page that drives logins, the session roster and the terminal windows.
//!
//! ## Architecture
//!
//! The console owns the [`Launcher`] and the launcher's mailbox. Terminal windows
//! live in a [`LocalWindowHost`]; each holds only its own ephemeral store and a
//! sender into the mailbox. Messages posted by terminals are applied between
//! console commands, the way a page handles `message` events between user actions.
//!
//! ## Commands
//!
//! - `kinds`: list the terminals and their accounts
//! - `login <kind> <user> <password>`: submit a login form
//! - `sessions`: show the active-session roster
//! - `close <sessionId>`: close a session from the roster
//! - `logout <kind>` / `back <kind>`: press a terminal window's buttons
//! - `open <url>`: type a terminal page URL into a new window's address bar
//! - `windows`: list open terminal windows
//! - `block-popups on|off`: simulate the browser's pop-up blocker
//! - `status`: show the inline login error, if still visible

use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::display::{render_roster, ConsoleRoster};
use crate::handlers::{self, errors::CommandError};
use crate::models::{MessageEnvelope, TerminalKind};
use crate::services::{BackAction, CredentialRegistry, FileStore, Launcher, LocalWindowHost};

const HELP: &str = "\
Commands:
  kinds                          list terminals
  login <kind> <user> <password> log into a terminal
  sessions                       show active sessions
  close <sessionId>              close a session
  logout <kind>                  log out from inside a terminal window
  back <kind>                    press a terminal window's back button
  open <url>                     load a terminal page directly
  windows                        list open terminal windows
  block-popups on|off            toggle the pop-up blocker
  status                         show the current login error
  help                           show this help
  quit                           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help,
    Kinds,
    Login {
        terminal: String,
        username: String,
        password: String,
    },
    Sessions,
    Close(String),
    Logout(String),
    Back(String),
    Open(String),
    Windows,
    BlockPopups(bool),
    Status,
    Quit,
}

/// Parses one console line. Empty lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match (command, args) {
        ("help", []) => ConsoleCommand::Help,
        ("kinds", []) => ConsoleCommand::Kinds,
        ("login", [terminal, username, password]) => ConsoleCommand::Login {
            terminal: terminal.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        },
        // Empty fields are allowed through so the form validation can reject them.
        ("login", [terminal, username]) => ConsoleCommand::Login {
            terminal: terminal.to_string(),
            username: username.to_string(),
            password: String::new(),
        },
        ("sessions", []) => ConsoleCommand::Sessions,
        ("close", [id]) => ConsoleCommand::Close(id.to_string()),
        ("logout", [kind]) => ConsoleCommand::Logout(kind.to_string()),
        ("back", [kind]) => ConsoleCommand::Back(kind.to_string()),
        ("open", [url]) => ConsoleCommand::Open(url.to_string()),
        ("windows", []) => ConsoleCommand::Windows,
        ("block-popups", ["on"]) => ConsoleCommand::BlockPopups(true),
        ("block-popups", ["off"]) => ConsoleCommand::BlockPopups(false),
        ("status", []) => ConsoleCommand::Status,
        ("quit" | "exit", []) => ConsoleCommand::Quit,
        _ => return Err(format!("Unrecognised command: {}. Type 'help'.", line.trim())),
    };
    Ok(Some(command))
}

struct Notice {
    message: String,
    shown_at: Instant,
}

enum ConsoleEvent {
    Line(Option<String>),
    Message(MessageEnvelope),
}

pub struct LauncherConsole {
    launcher: Arc<Launcher>,
    host: Arc<LocalWindowHost>,
    mailbox: mpsc::UnboundedReceiver<MessageEnvelope>,
    notice: Option<Notice>,
    notice_timeout: Duration,
    colour: bool,
}

impl LauncherConsole {
    pub fn new(
        launcher: Arc<Launcher>,
        host: Arc<LocalWindowHost>,
        mailbox: mpsc::UnboundedReceiver<MessageEnvelope>,
        notice_timeout: Duration,
    ) -> Self {
        Self {
            launcher,
            host,
            mailbox,
            notice: None,
            notice_timeout,
            colour: false,
        }
    }

    pub fn with_colour(mut self, colour: bool) -> Self {
        self.colour = colour;
        self
    }

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    pub fn host(&self) -> &LocalWindowHost {
        &self.host
    }

    /// Runs one command, then applies any messages the terminals posted meanwhile.
    pub fn execute(&mut self, command: ConsoleCommand) -> String {
        let output = self.dispatch(command);
        self.launcher.process_pending(&mut self.mailbox);
        output
    }

    fn dispatch(&mut self, command: ConsoleCommand) -> String {
        match command {
            ConsoleCommand::Help => HELP.to_string(),
            ConsoleCommand::Kinds => self.kinds(),
            ConsoleCommand::Login {
                terminal,
                username,
                password,
            } => self.login(&terminal, &username, &password),
            ConsoleCommand::Sessions => match handlers::list_active_sessions(&self.launcher) {
                Ok(sessions) => render_roster(&sessions, self.colour),
                Err(e) => e.to_string(),
            },
            ConsoleCommand::Close(id) => match handlers::close_session(&self.launcher, &id) {
                Ok(true) => format!("Session {} closed", id),
                Ok(false) => format!("No active session {}", id),
                Err(e) => e.to_string(),
            },
            ConsoleCommand::Logout(kind) => self.with_window(&kind, |host, name| match host.logout(name) {
                Some(outcome) if outcome.delivered => "Logged out; launcher notified".to_string(),
                Some(_) => "Logged out; launcher was unreachable".to_string(),
                None => format!("No open window '{}'", name),
            }),
            ConsoleCommand::Back(kind) => self.with_window(&kind, |host, name| match host.back(name) {
                Some(BackAction::CloseWindow) => format!("Window '{}' closed", name),
                Some(BackAction::Navigate(url)) => format!("Window '{}' navigated to {}", name, url),
                None => format!("No open window '{}'", name),
            }),
            ConsoleCommand::Open(url) => match handlers::open_terminal_url(&self.host, &url) {
                Ok(name) => format!("Window '{}' opened", name),
                Err(e @ CommandError::IllegitimateTerminalLaunch { .. }) => format!("ALERT: {}", e),
                Err(e) => e.to_string(),
            },
            ConsoleCommand::Windows => {
                let windows = self.host.open_windows();
                if windows.is_empty() {
                    "No open terminal windows".to_string()
                } else {
                    windows
                        .into_iter()
                        .map(|(name, title)| format!("{}: {}", name, title))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            ConsoleCommand::BlockPopups(blocked) => {
                self.host.set_popups_blocked(blocked);
                format!("Pop-up blocker {}", if blocked { "on" } else { "off" })
            }
            ConsoleCommand::Status => {
                let expired = self
                    .notice
                    .as_ref()
                    .map_or(true, |notice| notice.shown_at.elapsed() >= self.notice_timeout);
                if expired {
                    self.notice = None;
                }
                self.notice
                    .as_ref()
                    .map(|notice| notice.message.clone())
                    .unwrap_or_else(|| "No notices".to_string())
            }
            ConsoleCommand::Quit => "Bye".to_string(),
        }
    }

    fn kinds(&self) -> String {
        match handlers::get_terminal_catalog(&self.launcher) {
            Ok(catalog) => catalog
                .iter()
                .map(|t| format!("{:<10} {} [{}]", t.kind.as_str(), t.name, t.usernames.join(", ")))
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => e.to_string(),
        }
    }

    fn login(&mut self, terminal: &str, username: &str, password: &str) -> String {
        self.notice = None;
        match handlers::login_terminal(&self.launcher, terminal, username, password) {
            Ok(response) => {
                let mut output = format!("{}\nOpening {}", response.message, response.terminal_url);
                for alert in handlers::take_terminal_alerts(&self.host) {
                    output.push_str(&format!("\nALERT: {}", alert));
                }
                output
            }
            Err(e @ CommandError::PopupBlocked { .. }) => format!("ALERT: {}", e),
            Err(e) if e.is_inline_notice() => {
                let message = e.to_string();
                self.notice = Some(Notice {
                    message: message.clone(),
                    shown_at: Instant::now(),
                });
                message
            }
            Err(e) => e.to_string(),
        }
    }

    fn with_window(&self, kind: &str, action: impl FnOnce(&LocalWindowHost, &str) -> String) -> String {
        match kind.parse::<TerminalKind>() {
            Ok(kind) => action(&self.host, &kind.window_name()),
            Err(e) => e.to_string(),
        }
    }

    /// Reads commands from stdin until `quit` or end of input.
    pub async fn run(mut self) -> Result<()> {
        println!("{}", HELP);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let event = tokio::select! {
                line = lines.next_line() => ConsoleEvent::Line(line?),
                Some(envelope) = self.mailbox.recv() => ConsoleEvent::Message(envelope),
            };

            match event {
                ConsoleEvent::Line(None) => break,
                ConsoleEvent::Line(Some(line)) => match parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(ConsoleCommand::Quit)) => break,
                    Ok(Some(command)) => println!("{}", self.execute(command)),
                    Err(message) => println!("{}", message),
                },
                ConsoleEvent::Message(envelope) => {
                    if let Err(e) = self.launcher.handle_message(envelope) {
                        log::error!("Failed to apply terminal message: {}", e);
                    }
                }
            }
        }

        log::info!("Launcher console exiting");
        Ok(())
    }
}

/// Wires the launcher, its persistent store and the window host together.
pub fn build_console(config: &AppConfig) -> Result<LauncherConsole> {
    let settings = &config.app;
    let pages_base = settings.pages_base()?;
    let storage_path = settings.resolved_storage_path();
    let store = Arc::new(FileStore::open(&storage_path)?);
    log::info!("Session storage at {}", storage_path.display());

    let registry = CredentialRegistry::builtin();
    let (opener, mailbox) = mpsc::unbounded_channel();
    let host = Arc::new(LocalWindowHost::new(registry.clone(), opener));

    let launcher = Launcher::new(registry, store, host.clone(), pages_base)
        .with_allowed_origin(Some(settings.message_origin()?))
        .with_listener(Arc::new(ConsoleRoster { colour: true }));

    Ok(LauncherConsole::new(
        Arc::new(launcher),
        host,
        mailbox,
        Duration::from_secs(settings.notice_timeout_secs),
    )
    .with_colour(true))
}

pub async fn run_console(config: AppConfig) -> Result<()> {
    log::info!("Starting {}", config.app.name);
    let console = build_console(&config)?;
    let sessions = console.launcher().sessions()?;
    println!("{}", render_roster(&sessions, true));
    console.run().await
}
