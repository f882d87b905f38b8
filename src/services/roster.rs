use std::sync::{Arc, Mutex};

use super::storage::{read_json, write_json, KeyValueStore, StorageError};
use crate::models::{KindSession, SessionRecord, TerminalKind};

/// Persistent key holding the ordered list of active sessions.
pub const ROSTER_KEY: &str = "activeSessions";

/// Repository over the persistent roster and the per-kind convenience records.
///
/// All roster mutation goes through `append` and `remove_by_id`; each one is a
/// full read-modify-write of the stored list, serialized within this process.
pub struct SessionRoster {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl SessionRoster {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Active sessions in insertion order.
    pub fn list(&self) -> Result<Vec<SessionRecord>, StorageError> {
        Ok(read_json(self.store.as_ref(), ROSTER_KEY)?.unwrap_or_default())
    }

    pub fn get(&self, session_id: &str) -> Result<Option<SessionRecord>, StorageError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|record| record.session_id == session_id))
    }

    pub fn contains(&self, session_id: &str) -> Result<bool, StorageError> {
        Ok(self.get(session_id)?.is_some())
    }

    pub fn append(&self, record: SessionRecord) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut records = self.list()?;
        records.push(record);
        write_json(self.store.as_ref(), ROSTER_KEY, &records)
    }

    /// Removes the record with `session_id`, returning it. Absent ids are a no-op.
    pub fn remove_by_id(&self, session_id: &str) -> Result<Option<SessionRecord>, StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut records = self.list()?;
        let Some(index) = records.iter().position(|r| r.session_id == session_id) else {
            return Ok(None);
        };
        let removed = records.remove(index);
        write_json(self.store.as_ref(), ROSTER_KEY, &records)?;
        Ok(Some(removed))
    }

    pub fn kind_session(&self, kind: TerminalKind) -> Result<Option<KindSession>, StorageError> {
        read_json(self.store.as_ref(), &kind.session_key())
    }

    pub fn set_kind_session(&self, kind: TerminalKind, session: &KindSession) -> Result<(), StorageError> {
        write_json(self.store.as_ref(), &kind.session_key(), session)
    }

    pub fn clear_kind_session(&self, kind: TerminalKind) -> Result<(), StorageError> {
        self.store.remove(&kind.session_key())
    }
}
