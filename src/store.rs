use chrono::NaiveDate;
use std::{collections::BTreeMap, collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::entry::EmotionEntry;

/// One diary: at most one entry per calendar day, iterated in date order.
#[derive(Debug, Default, Clone)]
pub struct EntryStore {
    entries: BTreeMap<NaiveDate, EmotionEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for its date. Returns the replaced entry.
    pub fn upsert(&mut self, entry: EmotionEntry) -> Option<EmotionEntry> {
        self.entries.insert(entry.date, entry)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&EmotionEntry> {
        self.entries.get(&date)
    }

    /// Entries with `start <= date <= end`, ascending.
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> Vec<EmotionEntry> {
        if start > end {
            return Vec::new();
        }
        self.entries
            .range(start..=end)
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// Remove every entry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// In-memory diaries keyed by session id (single-instance deployments).
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, EntryStore>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(id, EntryStore::new());
        id
    }

    /// Run `f` against the session's store, or `None` if the session is unknown.
    pub async fn read<T>(&self, id: Uuid, f: impl FnOnce(&EntryStore) -> T) -> Option<T> {
        let sessions = self.sessions.read().await;
        sessions.get(&id).map(f)
    }

    pub async fn write<T>(&self, id: Uuid, f: impl FnOnce(&mut EntryStore) -> T) -> Option<T> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(&id).map(f)
    }
}
