#![cfg(feature = "std")]

//! In-memory registry of sessions, keyed by match id.
//!
//! Sessions are kept as encoded bytes, the same form a database row would
//! hold, so every load goes through the full decode and validation path.
//! The store is an ordinary value: the service owns it and hands out
//! `&mut` access, which also serializes calls per match.

use std::collections::HashMap;

use anyhow::Context;

use crate::record::RecordError;
use crate::session::{Session, SessionRecord};

#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the session stored under `id`.
    pub fn save(&mut self, id: &str, session: &Session) -> anyhow::Result<()> {
        let bytes = bincode::serialize(&session.to_portable())
            .with_context(|| format!("encoding session {}", id))?;
        log::debug!("saved session {} ({} bytes)", id, bytes.len());
        self.sessions.insert(id.to_string(), bytes);
        Ok(())
    }

    /// Load the session stored under `id`, or `None` if there is none.
    pub fn load(&self, id: &str) -> anyhow::Result<Option<Session>> {
        let Some(bytes) = self.sessions.get(id) else {
            return Ok(None);
        };
        let record: SessionRecord = bincode::deserialize(bytes)
            .map_err(RecordError::from)
            .with_context(|| format!("decoding session {}", id))?;
        let session = Session::from_portable(&record)
            .with_context(|| format!("rebuilding session {}", id))?;
        Ok(Some(session))
    }

    /// Drop a session. Returns whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
