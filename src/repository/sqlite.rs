//! SQLite drink store
//!
//! Thin adapter from the repository trait to the model functions, each call
//! on its own pooled connection.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::DrinkRepository;
use crate::db::{Database, DbResult};
use crate::models::{DrinkEntry, DrinkEntryCreate, DrinkEntryUpdate, DrinkType, LastVolume};

/// Drink store backed by the `drinks` table
#[derive(Clone)]
pub struct SqliteDrinkRepository {
    database: Database,
}

impl SqliteDrinkRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl DrinkRepository for SqliteDrinkRepository {
    fn query(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DbResult<Vec<DrinkEntry>> {
        let entries = self
            .database
            .with_conn(|conn| DrinkEntry::list_between(conn, start, end))?;
        debug!(%start, %end, count = entries.len(), "Queried drinks");
        Ok(entries)
    }

    fn create(&self, data: &DrinkEntryCreate) -> DbResult<DrinkEntry> {
        self.database.with_conn(|conn| DrinkEntry::create(conn, data))
    }

    fn get(&self, id: i64) -> DbResult<Option<DrinkEntry>> {
        self.database.with_conn(|conn| DrinkEntry::get_by_id(conn, id))
    }

    fn update(&self, id: i64, data: &DrinkEntryUpdate) -> DbResult<Option<DrinkEntry>> {
        self.database.with_conn(|conn| DrinkEntry::update(conn, id, data))
    }

    fn delete(&self, id: i64) -> DbResult<bool> {
        self.database.with_conn(|conn| DrinkEntry::delete(conn, id))
    }

    fn last_volume(&self, base: &DrinkType) -> DbResult<Option<i64>> {
        self.database.with_conn(|conn| LastVolume::get(conn, base))
    }

    fn remember_volume(&self, base: &DrinkType, volume_ml: i64) -> DbResult<()> {
        self.database.with_conn(|conn| LastVolume::set(conn, base, volume_ml))
    }
}
