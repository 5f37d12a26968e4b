//! In-memory drink store
//!
//! Mirrors the SQLite store's id assignment and ordering so tool tests can
//! run without a database.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use super::DrinkRepository;
use crate::db::{DbError, DbResult};
use crate::models::{DrinkEntry, DrinkEntryCreate, DrinkEntryUpdate, DrinkType};

#[derive(Default)]
struct Inner {
    last_id: i64,
    entries: Vec<DrinkEntry>,
    last_volumes: HashMap<DrinkType, i64>,
}

/// Drink store held in memory, for tests and throwaway sessions
#[derive(Default)]
pub struct InMemoryDrinkRepository {
    inner: RwLock<Inner>,
}

impl InMemoryDrinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DrinkRepository for InMemoryDrinkRepository {
    fn query(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DbResult<Vec<DrinkEntry>> {
        let inner = self.inner.read().map_err(|_| DbError::Poisoned)?;

        let mut entries: Vec<DrinkEntry> = inner
            .entries
            .iter()
            .filter(|e| matches!(e.timestamp, Some(t) if t >= start && t < end))
            .cloned()
            .collect();

        // Same order as the SQL store
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    fn create(&self, data: &DrinkEntryCreate) -> DbResult<DrinkEntry> {
        let mut inner = self.inner.write().map_err(|_| DbError::Poisoned)?;

        inner.last_id += 1;
        let entry = DrinkEntry {
            id: inner.last_id,
            drink_type: data.drink_type.clone(),
            volume_ml: data.volume_ml,
            timestamp: data.timestamp,
        };
        inner.entries.push(entry.clone());
        Ok(entry)
    }

    fn get(&self, id: i64) -> DbResult<Option<DrinkEntry>> {
        let inner = self.inner.read().map_err(|_| DbError::Poisoned)?;
        Ok(inner.entries.iter().find(|e| e.id == id).cloned())
    }

    fn update(&self, id: i64, data: &DrinkEntryUpdate) -> DbResult<Option<DrinkEntry>> {
        let mut inner = self.inner.write().map_err(|_| DbError::Poisoned)?;

        Ok(inner.entries.iter_mut().find(|e| e.id == id).map(|entry| {
            data.apply_to(entry);
            entry.clone()
        }))
    }

    fn delete(&self, id: i64) -> DbResult<bool> {
        let mut inner = self.inner.write().map_err(|_| DbError::Poisoned)?;

        let before = inner.entries.len();
        inner.entries.retain(|e| e.id != id);
        Ok(inner.entries.len() < before)
    }

    fn last_volume(&self, base: &DrinkType) -> DbResult<Option<i64>> {
        let inner = self.inner.read().map_err(|_| DbError::Poisoned)?;
        Ok(inner.last_volumes.get(base).copied())
    }

    fn remember_volume(&self, base: &DrinkType, volume_ml: i64) -> DbResult<()> {
        let mut inner = self.inner.write().map_err(|_| DbError::Poisoned)?;
        inner.last_volumes.insert(base.clone(), volume_ml);
        Ok(())
    }
}
