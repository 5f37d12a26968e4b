//! Remembered volumes
//!
//! The volume last logged for each base drink type, offered as the default
//! the next time that type is logged without a volume.

use rusqlite::{params, Connection};
use tracing::debug;

use super::DrinkType;
use crate::db::DbResult;

pub struct LastVolume;

impl LastVolume {
    /// Volume last remembered for `base`, if any
    pub fn get(conn: &Connection, base: &DrinkType) -> DbResult<Option<i64>> {
        let mut stmt = conn.prepare("SELECT volume_ml FROM last_volumes WHERE drink_type = ?1")?;

        match stmt.query_row([base.as_str()], |row| row.get::<_, i64>(0)) {
            Ok(volume_ml) => Ok(Some(volume_ml)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remember `volume_ml` for `base`, replacing any earlier value
    pub fn set(conn: &Connection, base: &DrinkType, volume_ml: i64) -> DbResult<()> {
        conn.execute(
            "INSERT INTO last_volumes (drink_type, volume_ml) VALUES (?1, ?2)
             ON CONFLICT(drink_type) DO UPDATE SET
                volume_ml = excluded.volume_ml,
                updated_at = datetime('now')",
            params![base.as_str(), volume_ml],
        )?;

        debug!(drink_type = %base, volume_ml, "Remembered volume");
        Ok(())
    }
}
