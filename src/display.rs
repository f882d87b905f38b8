//! # Display Module
//!
//! Text rendering of the active-session roster for the launcher console.

use chrono::{DateTime, Local, Utc};

use crate::models::SessionRecord;
use crate::services::RosterListener;
use crate::theme::{paint, TerminalTheme};

/// Formats a login time as local `HH:MM`
pub fn format_login_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

/// Renders the roster, one block per session in roster order
///
/// With `colour` set, each block's marker is drawn in the terminal's accent colour.
pub fn render_roster(sessions: &[SessionRecord], colour: bool) -> String {
    if sessions.is_empty() {
        return "No active terminal sessions".to_string();
    }

    sessions
        .iter()
        .map(|session| {
            let marker = if colour {
                paint("▌", TerminalTheme::for_kind(session.terminal_kind).accent)
            } else {
                "|".to_string()
            };
            format!(
                "{marker} {}\n{marker} {} ({})\n{marker} Logged in: {}  [{}]",
                session.terminal_name,
                session.username,
                session.role,
                format_login_time(&session.login_timestamp),
                session.session_id,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Redraws the roster on stdout whenever it changes
pub struct ConsoleRoster {
    pub colour: bool,
}

impl RosterListener for ConsoleRoster {
    fn roster_changed(&self, sessions: &[SessionRecord]) {
        println!("-- Active sessions ({}) --", sessions.len());
        println!("{}", render_roster(sessions, self.colour));
    }
}
