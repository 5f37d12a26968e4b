//! Drink repository
//!
//! The storage seam between the tool layer and the entry store. Tools only
//! see `&dyn DrinkRepository`, so the SQLite store and the in-memory store
//! used in tests are interchangeable.

mod memory;
mod sqlite;

use chrono::{DateTime, Utc};

use crate::db::DbResult;
use crate::models::{DrinkEntry, DrinkEntryCreate, DrinkEntryUpdate, DrinkType};

pub use memory::InMemoryDrinkRepository;
pub use sqlite::SqliteDrinkRepository;

pub trait DrinkRepository: Send + Sync {
    /// Entries with `start <= timestamp < end`, newest first
    fn query(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DbResult<Vec<DrinkEntry>>;

    /// Store a new entry and assign its id
    fn create(&self, data: &DrinkEntryCreate) -> DbResult<DrinkEntry>;

    fn get(&self, id: i64) -> DbResult<Option<DrinkEntry>>;

    /// `None` when no entry has this id
    fn update(&self, id: i64, data: &DrinkEntryUpdate) -> DbResult<Option<DrinkEntry>>;

    /// `false` when no entry has this id
    fn delete(&self, id: i64) -> DbResult<bool>;

    /// Volume last logged for a base drink type
    fn last_volume(&self, base: &DrinkType) -> DbResult<Option<i64>>;

    fn remember_volume(&self, base: &DrinkType, volume_ml: i64) -> DbResult<()>;
}
