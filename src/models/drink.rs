//! Drink entry model
//!
//! A single logged drink. Only the raw facts are persisted; hydration and
//! nutrition figures are derived by `crate::hydration` on every read.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DrinkType;
use crate::db::{DbError, DbResult};

/// A logged drink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkEntry {
    pub id: i64,
    #[serde(default = "unknown_drink_type")]
    pub drink_type: DrinkType,
    pub volume_ml: i64,
    /// `None` sorts before every real instant
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

fn unknown_drink_type() -> DrinkType {
    DrinkType::Custom(String::new())
}

/// Data for logging a drink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkEntryCreate {
    pub drink_type: DrinkType,
    pub volume_ml: i64,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Data for editing a drink. Unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrinkEntryUpdate {
    pub drink_type: Option<DrinkType>,
    pub volume_ml: Option<i64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl DrinkEntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.drink_type.is_none() && self.volume_ml.is_none() && self.timestamp.is_none()
    }

    /// Apply to an entry in place. Id is never touched.
    pub fn apply_to(&self, entry: &mut DrinkEntry) {
        if let Some(ref drink_type) = self.drink_type {
            entry.drink_type = drink_type.clone();
        }
        if let Some(volume_ml) = self.volume_ml {
            entry.volume_ml = volume_ml;
        }
        if let Some(timestamp) = self.timestamp {
            entry.timestamp = Some(timestamp);
        }
    }
}

struct DrinkRow {
    id: i64,
    drink_type: String,
    volume_ml: i64,
    timestamp_ms: Option<i64>,
}

impl DrinkRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            drink_type: row.get("drink_type")?,
            volume_ml: row.get("volume_ml")?,
            timestamp_ms: row.get("timestamp_ms")?,
        })
    }

    fn into_entry(self) -> DbResult<DrinkEntry> {
        let timestamp = match self.timestamp_ms {
            Some(ms) => Some(
                DateTime::<Utc>::from_timestamp_millis(ms).ok_or(DbError::InvalidTimestamp(ms))?,
            ),
            None => None,
        };

        Ok(DrinkEntry {
            id: self.id,
            drink_type: DrinkType::parse(&self.drink_type),
            volume_ml: self.volume_ml,
            timestamp,
        })
    }
}

impl DrinkEntry {
    /// Log a new drink
    pub fn create(conn: &Connection, data: &DrinkEntryCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO drinks (drink_type, volume_ml, timestamp_ms)
            VALUES (?1, ?2, ?3)
            "#,
            params![
                data.drink_type.as_str(),
                data.volume_ml,
                data.timestamp.map(|t| t.timestamp_millis()),
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, drink_type = %data.drink_type, volume_ml = data.volume_ml, "Drink logged");

        Self::get_by_id(conn, id)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a drink by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM drinks WHERE id = ?1")?;

        match stmt.query_row([id], DrinkRow::from_row) {
            Ok(row) => Ok(Some(row.into_entry()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Drinks with `start <= timestamp < end`, newest first.
    ///
    /// Entries without a timestamp never match a range.
    pub fn list_between(
        conn: &Connection,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM drinks
            WHERE timestamp_ms >= ?1 AND timestamp_ms < ?2
            ORDER BY timestamp_ms DESC, id DESC
            "#,
        )?;

        let rows = stmt
            .query_map(
                params![start.timestamp_millis(), end.timestamp_millis()],
                DrinkRow::from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(DrinkRow::into_entry).collect()
    }

    /// Edit a drink. Id is preserved, and the original timestamp too unless
    /// the update carries a new one.
    pub fn update(conn: &Connection, id: i64, data: &DrinkEntryUpdate) -> DbResult<Option<Self>> {
        let Some(mut entry) = Self::get_by_id(conn, id)? else {
            return Ok(None);
        };

        if data.is_empty() {
            return Ok(Some(entry));
        }

        data.apply_to(&mut entry);

        conn.execute(
            r#"
            UPDATE drinks SET
                drink_type = ?1,
                volume_ml = ?2,
                timestamp_ms = ?3,
                updated_at = datetime('now')
            WHERE id = ?4
            "#,
            params![
                entry.drink_type.as_str(),
                entry.volume_ml,
                entry.timestamp.map(|t| t.timestamp_millis()),
                id,
            ],
        )?;

        Ok(Some(entry))
    }

    /// Delete a drink
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM drinks WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Count all logged drinks
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM drinks", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use chrono::TimeZone;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, 0, 0).unwrap()
    }

    fn log(conn: &Connection, t: &str, ml: i64, ts: Option<DateTime<Utc>>) -> DrinkEntry {
        DrinkEntry::create(
            conn,
            &DrinkEntryCreate { drink_type: DrinkType::parse(t), volume_ml: ml, timestamp: ts },
        )
        .unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let conn = conn();
        let entry = log(&conn, "milk", 150, Some(at(9)));

        assert_eq!(entry.drink_type, DrinkType::Milk);
        assert_eq!(entry.volume_ml, 150);
        assert_eq!(entry.timestamp, Some(at(9)));
        assert_eq!(DrinkEntry::get_by_id(&conn, entry.id).unwrap(), Some(entry));
        assert_eq!(DrinkEntry::get_by_id(&conn, 999).unwrap(), None);
    }

    #[test]
    fn test_list_between_is_half_open_and_newest_first() {
        let conn = conn();
        let early = log(&conn, "water", 200, Some(at(8)));
        let late = log(&conn, "tea", 150, Some(at(12)));
        log(&conn, "water", 300, Some(at(16)));
        log(&conn, "water", 100, None);

        let listed = DrinkEntry::list_between(&conn, at(8), at(16)).unwrap();
        assert_eq!(listed, vec![late, early]);
    }

    #[test]
    fn test_update_preserves_id_and_timestamp() {
        let conn = conn();
        let entry = log(&conn, "water", 200, Some(at(9)));

        let updated = DrinkEntry::update(
            &conn,
            entry.id,
            &DrinkEntryUpdate {
                drink_type: Some(DrinkType::Coffee),
                volume_ml: Some(120),
                timestamp: None,
            },
        )
        .unwrap()
        .unwrap();

        assert_eq!(updated.id, entry.id);
        assert_eq!(updated.timestamp, Some(at(9)));
        assert_eq!(updated.drink_type, DrinkType::Coffee);
        assert_eq!(DrinkEntry::get_by_id(&conn, entry.id).unwrap(), Some(updated));
    }

    #[test]
    fn test_update_missing_returns_none() {
        let conn = conn();
        let result = DrinkEntry::update(&conn, 42, &DrinkEntryUpdate::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_delete() {
        let conn = conn();
        let entry = log(&conn, "juice", 250, Some(at(10)));

        assert!(DrinkEntry::delete(&conn, entry.id).unwrap());
        assert!(!DrinkEntry::delete(&conn, entry.id).unwrap());
        assert_eq!(DrinkEntry::count(&conn).unwrap(), 0);
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let entry: DrinkEntry = serde_json::from_str(r#"{"id": 1, "volume_ml": 50}"#).unwrap();
        assert_eq!(entry.drink_type, DrinkType::Custom(String::new()));
        assert_eq!(entry.timestamp, None);
    }
}
