use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;
use uuid::Uuid;

use super::registry::CredentialRegistry;
use super::storage::{MemoryStore, StorageError};
use super::terminal::{BackAction, LogoutOutcome, Opener, TerminalContext, TerminalError};
use crate::models::{LocalSession, RegistryEntry};

/// Concrete reference to one opened browsing context.
///
/// Reopening a window under the same name yields a new handle, so a stale
/// handle never closes the context that replaced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowHandle {
    pub id: Uuid,
    pub name: String,
}

impl WindowHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Opens and closes terminal contexts on behalf of the launcher.
pub trait WindowHost: Send + Sync {
    /// Opens `url` in the context named `name`, replacing whatever was there.
    /// `None` means the open was refused (pop-up blocked).
    fn open(&self, url: &Url, name: &str) -> Option<WindowHandle>;

    /// Closes the context `handle` refers to. `false` if it is already gone.
    fn close(&self, handle: &WindowHandle) -> bool;

    /// Closes whatever context currently holds `name`. `false` if none does.
    fn close_named(&self, name: &str) -> bool;
}

struct OpenWindow {
    handle: WindowHandle,
    terminal: TerminalContext,
}

/// Hosts terminal contexts inside this process.
///
/// Each terminal gets its own ephemeral store and a sender to the launcher's
/// mailbox; nothing else is shared with the launcher.
pub struct LocalWindowHost {
    registry: CredentialRegistry,
    opener: Opener,
    windows: Mutex<HashMap<String, OpenWindow>>,
    alerts: Mutex<Vec<TerminalError>>,
    popups_blocked: AtomicBool,
}

impl LocalWindowHost {
    pub fn new(registry: CredentialRegistry, opener: Opener) -> Self {
        Self {
            registry,
            opener,
            windows: Mutex::new(HashMap::new()),
            alerts: Mutex::new(Vec::new()),
            popups_blocked: AtomicBool::new(false),
        }
    }

    pub fn set_popups_blocked(&self, blocked: bool) {
        self.popups_blocked.store(blocked, Ordering::SeqCst);
    }

    pub fn popups_blocked(&self) -> bool {
        self.popups_blocked.load(Ordering::SeqCst)
    }

    /// Names and titles of the open terminals, sorted by name.
    pub fn open_windows(&self) -> Vec<(String, String)> {
        let Ok(windows) = self.windows.lock() else {
            return Vec::new();
        };
        let mut open: Vec<_> = windows
            .iter()
            .map(|(name, window)| (name.clone(), window.terminal.title()))
            .collect();
        open.sort();
        open
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.windows
            .lock()
            .map(|windows| windows.contains_key(name))
            .unwrap_or(false)
    }

    pub fn session_of(&self, name: &str) -> Option<LocalSession> {
        let windows = self.windows.lock().ok()?;
        windows.get(name).map(|window| window.terminal.session().clone())
    }

    /// Runs the logout button of the terminal named `name`. The window is gone afterwards.
    pub fn logout(&self, name: &str) -> Option<LogoutOutcome> {
        let window = self.windows.lock().ok()?.remove(name)?;
        Some(window.terminal.logout())
    }

    /// Runs the back button of the terminal named `name`.
    pub fn back(&self, name: &str) -> Option<BackAction> {
        let mut windows = self.windows.lock().ok()?;
        let action = match windows.get(name)?.terminal.back_to_launcher() {
            Ok(action) => action,
            Err(e) => {
                log::error!("Cannot resolve launcher page for '{}': {}", name, e);
                return None;
            }
        };
        if action == BackAction::CloseWindow {
            windows.remove(name);
        }
        Some(action)
    }

    /// Drains the alerts raised by launched windows that refused to load.
    pub fn take_alerts(&self) -> Vec<TerminalError> {
        self.alerts
            .lock()
            .map(|mut alerts| std::mem::take(&mut *alerts))
            .unwrap_or_default()
    }

    /// Loads `url` as if typed into a fresh window's address bar, with no opener.
    ///
    /// The window takes the name of the terminal whose page it shows, so a later
    /// launch of that kind replaces it.
    pub fn open_direct(&self, url: &Url) -> Result<WindowHandle, TerminalError> {
        let name = self
            .entry_for(url)
            .map(|entry| entry.kind.window_name())
            .unwrap_or_else(|| page_of(url).to_string());
        let mut windows = self.windows.lock().map_err(|_| StorageError::Poisoned)?;
        self.load_window(&mut windows, url, &name, None)
    }

    fn load_window(
        &self,
        windows: &mut HashMap<String, OpenWindow>,
        url: &Url,
        name: &str,
        opener: Option<Opener>,
    ) -> Result<WindowHandle, TerminalError> {
        if windows.remove(name).is_some() {
            log::info!("Reusing window '{}' for a new terminal", name);
        }

        let store = Arc::new(MemoryStore::new());
        let terminal = TerminalContext::load(url.clone(), self.page_title(url), store, opener)?;
        let handle = WindowHandle::new(name);
        windows.insert(
            name.to_string(),
            OpenWindow {
                handle: handle.clone(),
                terminal,
            },
        );
        Ok(handle)
    }

    fn entry_for(&self, url: &Url) -> Option<&RegistryEntry> {
        let page = page_of(url);
        self.registry.entries().iter().find(|entry| entry.page == page)
    }

    fn page_title(&self, url: &Url) -> String {
        self.entry_for(url)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| page_of(url).to_string())
    }
}

fn page_of(url: &Url) -> &str {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
}

impl WindowHost for LocalWindowHost {
    fn open(&self, url: &Url, name: &str) -> Option<WindowHandle> {
        if self.popups_blocked() {
            log::warn!("Pop-up blocked while opening '{}'", name);
            return None;
        }

        let mut windows = self.windows.lock().ok()?;
        match self.load_window(&mut windows, url, name, Some(self.opener.clone())) {
            Ok(handle) => Some(handle),
            Err(e) => {
                // The page alerted and closed itself before rendering; the open itself succeeded.
                log::warn!("Window '{}' closed itself: {}", name, e);
                if let Ok(mut alerts) = self.alerts.lock() {
                    alerts.push(e);
                }
                Some(WindowHandle::new(name))
            }
        }
    }

    fn close(&self, handle: &WindowHandle) -> bool {
        let Ok(mut windows) = self.windows.lock() else {
            return false;
        };
        let current = windows
            .get(&handle.name)
            .is_some_and(|window| window.handle.id == handle.id);
        if current {
            windows.remove(&handle.name);
        }
        current
    }

    fn close_named(&self, name: &str) -> bool {
        self.windows
            .lock()
            .map(|mut windows| windows.remove(name).is_some())
            .unwrap_or(false)
    }
}
