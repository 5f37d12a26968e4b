//! Drink MCP Tools
//!
//! Tools for logging drinks and reading back hydration figures. Every tool
//! takes the repository it works against, so tests run on the in-memory
//! store and the server on SQLite.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::hydration::{
    daily_summary, day_bounds, entry_figures, hydration_factor, local_midnight, DailyAggregate,
    NutritionEstimate,
};
use crate::models::{
    find_quick_pick, quick_picks, DrinkEntry, DrinkEntryCreate, DrinkEntryUpdate, DrinkType,
    QuickPick,
};
use crate::repository::DrinkRepository;

/// Longest range `hydration_history` will walk
pub const MAX_HISTORY_DAYS: i64 = 366;

/// Largest single drink accepted, the top of the volume slider
pub const MAX_VOLUME_ML: i64 = 2000;

/// Volume used when none is given and none is remembered for the type
pub const DEFAULT_VOLUME_ML: i64 = 200;

/// A drink with its derived figures
#[derive(Debug, Serialize)]
pub struct DrinkDetail {
    pub id: i64,
    pub drink_type: String,
    pub label: String,
    pub volume_ml: i64,
    pub timestamp: Option<DateTime<Utc>>,
    pub hydration_ml: i64,
    pub hydration_percent: i64,
    pub nutrition: NutritionEstimate,
}

impl From<&DrinkEntry> for DrinkDetail {
    fn from(entry: &DrinkEntry) -> Self {
        let figures = entry_figures(entry);
        Self {
            id: entry.id,
            drink_type: entry.drink_type.as_str().to_string(),
            label: entry.drink_type.label().to_string(),
            volume_ml: entry.volume_ml,
            timestamp: entry.timestamp,
            hydration_ml: figures.hydration_ml,
            hydration_percent: figures.hydration_percent,
            nutrition: figures.nutrition,
        }
    }
}

/// Response for delete_drink
#[derive(Debug, Serialize)]
pub struct DeleteDrinkResponse {
    pub id: i64,
    pub deleted: bool,
}

/// Response for day_summary
#[derive(Debug, Serialize)]
pub struct DaySummaryResponse {
    pub date: String,
    pub goal_ml: i64,
    /// Newest first
    pub drinks: Vec<DrinkDetail>,
    pub totals: DailyAggregate,
}

/// One day in a history listing
#[derive(Debug, Serialize)]
pub struct HistoryDay {
    pub date: String,
    pub drink_count: usize,
    pub totals: DailyAggregate,
}

/// Response for hydration_history
#[derive(Debug, Serialize)]
pub struct HydrationHistoryResponse {
    pub start_date: String,
    pub end_date: String,
    pub goal_ml: i64,
    pub days: Vec<HistoryDay>,
    pub days_goal_met: usize,
}

#[derive(Debug, Serialize)]
pub struct DrinkTypeInfo {
    pub name: String,
    pub label: String,
    pub hydration_factor: f64,
    pub sub_options: Vec<String>,
}

/// Response for list_drink_types
#[derive(Debug, Serialize)]
pub struct DrinkTypesResponse {
    pub types: Vec<DrinkTypeInfo>,
    pub quick_picks: Vec<QuickPick>,
}

// ============================================================================
// Parsing helpers
// ============================================================================

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("Invalid timestamp '{}' (expected RFC 3339): {}", raw, e))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}' (expected YYYY-MM-DD)", raw))
}

fn day_start<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Result<DateTime<Tz>, String> {
    local_midnight(tz, date).ok_or_else(|| format!("No local start of day for {}", date))
}

fn validate_volume(volume_ml: i64) -> Result<(), String> {
    if !(0..=MAX_VOLUME_ML).contains(&volume_ml) {
        return Err(format!(
            "volume_ml must be between 0 and {}, got {}",
            MAX_VOLUME_ML, volume_ml
        ));
    }
    Ok(())
}

/// Last positive volume logged under `base`, else the default
fn remembered_volume(repo: &dyn DrinkRepository, base: Option<&DrinkType>) -> Result<i64, String> {
    let remembered = match base {
        Some(base) => repo
            .last_volume(base)
            .map_err(|e| format!("Failed to read last volume: {}", e))?,
        None => None,
    };
    Ok(remembered.filter(|v| *v > 0).unwrap_or(DEFAULT_VOLUME_ML))
}

fn remember_volume(repo: &dyn DrinkRepository, entry: &DrinkEntry) -> Result<(), String> {
    match entry.drink_type.base_type() {
        Some(base) => repo
            .remember_volume(&base, entry.volume_ml)
            .map_err(|e| format!("Failed to remember volume: {}", e)),
        None => Ok(()),
    }
}

// ============================================================================
// Drink Tools
// ============================================================================

/// Log a drink. Timestamp defaults to now.
///
/// Without a volume, the last volume logged under the same base type is
/// used (a sub-option such as "Latte" shares coffee's), falling back to
/// `DEFAULT_VOLUME_ML`.
pub fn log_drink(
    repo: &dyn DrinkRepository,
    drink_type: &str,
    volume_ml: Option<i64>,
    timestamp: Option<&str>,
) -> Result<DrinkDetail, String> {
    let parsed = DrinkType::parse(drink_type);
    let volume_ml = match volume_ml {
        Some(volume_ml) => volume_ml,
        None => remembered_volume(repo, parsed.base_type().as_ref())?,
    };
    validate_volume(volume_ml)?;

    let timestamp = match timestamp {
        Some(raw) => parse_timestamp(raw)?,
        None => Utc::now(),
    };

    let entry = repo
        .create(&DrinkEntryCreate {
            drink_type: parsed,
            volume_ml,
            timestamp: Some(timestamp),
        })
        .map_err(|e| format!("Failed to log drink: {}", e))?;
    remember_volume(repo, &entry)?;

    info!(id = entry.id, drink_type, volume_ml, "Logged drink");
    Ok(DrinkDetail::from(&entry))
}

/// Log one of the quick-pick presets, now
pub fn log_quick_pick(repo: &dyn DrinkRepository, name: &str) -> Result<DrinkDetail, String> {
    let pick = find_quick_pick(name).ok_or_else(|| {
        let known: Vec<String> = quick_picks().iter().map(|p| p.drink_type.to_string()).collect();
        format!("No quick pick named '{}'. Available: {}", name, known.join(", "))
    })?;

    log_drink(repo, pick.drink_type.as_str(), Some(pick.volume_ml), None)
}

/// Get a drink by ID
pub fn get_drink(repo: &dyn DrinkRepository, id: i64) -> Result<Option<DrinkDetail>, String> {
    let entry = repo
        .get(id)
        .map_err(|e| format!("Failed to get drink: {}", e))?;

    Ok(entry.as_ref().map(DrinkDetail::from))
}

/// Edit a drink's type, volume or timestamp. Id and, unless given, the
/// original timestamp are kept.
pub fn update_drink(
    repo: &dyn DrinkRepository,
    id: i64,
    drink_type: Option<&str>,
    volume_ml: Option<i64>,
    timestamp: Option<&str>,
) -> Result<Option<DrinkDetail>, String> {
    if let Some(volume_ml) = volume_ml {
        validate_volume(volume_ml)?;
    }

    let data = DrinkEntryUpdate {
        drink_type: drink_type.map(DrinkType::parse),
        volume_ml,
        timestamp: timestamp.map(parse_timestamp).transpose()?,
    };

    let updated = repo
        .update(id, &data)
        .map_err(|e| format!("Failed to update drink: {}", e))?;

    match &updated {
        Some(entry) if volume_ml.is_some() => remember_volume(repo, entry)?,
        Some(_) => {}
        None => warn!(id, "Update for unknown drink"),
    }
    Ok(updated.as_ref().map(DrinkDetail::from))
}

/// Delete a drink
pub fn delete_drink(repo: &dyn DrinkRepository, id: i64) -> Result<DeleteDrinkResponse, String> {
    let deleted = repo
        .delete(id)
        .map_err(|e| format!("Failed to delete drink: {}", e))?;

    if deleted {
        info!(id, "Deleted drink");
    }
    Ok(DeleteDrinkResponse { id, deleted })
}

// ============================================================================
// Summary Tools
// ============================================================================

/// Drinks and totals for a local day. `date` defaults to today.
pub fn day_summary(
    repo: &dyn DrinkRepository,
    date: Option<&str>,
    goal_ml: i64,
) -> Result<DaySummaryResponse, String> {
    let date = match date {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    day_summary_in(repo, &Local, date, goal_ml)
}

/// `day_summary` with an explicit time zone
pub fn day_summary_in<Tz: TimeZone>(
    repo: &dyn DrinkRepository,
    tz: &Tz,
    date: NaiveDate,
    goal_ml: i64,
) -> Result<DaySummaryResponse, String> {
    let reference = day_start(tz, date)?;
    let (start, end) = day_bounds(&reference);

    let entries = repo
        .query(start, end)
        .map_err(|e| format!("Failed to query drinks: {}", e))?;

    let totals = daily_summary(&reference, &entries, goal_ml).map_err(|e| e.to_string())?;

    Ok(DaySummaryResponse {
        date: date.format("%Y-%m-%d").to_string(),
        goal_ml,
        drinks: entries.iter().map(DrinkDetail::from).collect(),
        totals,
    })
}

/// One aggregate per local day, `start_date` to `end_date` inclusive
pub fn hydration_history(
    repo: &dyn DrinkRepository,
    start_date: &str,
    end_date: &str,
    goal_ml: i64,
) -> Result<HydrationHistoryResponse, String> {
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;
    hydration_history_in(repo, &Local, start, end, goal_ml)
}

/// `hydration_history` with an explicit time zone
pub fn hydration_history_in<Tz: TimeZone>(
    repo: &dyn DrinkRepository,
    tz: &Tz,
    start: NaiveDate,
    end: NaiveDate,
    goal_ml: i64,
) -> Result<HydrationHistoryResponse, String> {
    if end < start {
        return Err("end_date must not be before start_date".to_string());
    }
    let span = (end - start).num_days() + 1;
    if span > MAX_HISTORY_DAYS {
        return Err(format!("Range covers {} days; the maximum is {}", span, MAX_HISTORY_DAYS));
    }

    let first = day_start(tz, start)?;
    let last = day_start(tz, end)?;
    let (range_start, _) = day_bounds(&first);
    let (_, range_end) = day_bounds(&last);

    let entries = repo
        .query(range_start, range_end)
        .map_err(|e| format!("Failed to query drinks: {}", e))?;

    let mut days = Vec::with_capacity(span as usize);
    for date in start.iter_days().take(span as usize) {
        let reference = day_start(tz, date)?;
        let (day_start, day_end) = day_bounds(&reference);
        let drink_count = entries
            .iter()
            .filter(|e| matches!(e.timestamp, Some(t) if t >= day_start && t < day_end))
            .count();
        let totals = daily_summary(&reference, &entries, goal_ml).map_err(|e| e.to_string())?;

        days.push(HistoryDay {
            date: date.format("%Y-%m-%d").to_string(),
            drink_count,
            totals,
        });
    }

    let days_goal_met = days.iter().filter(|d| d.totals.hydration_percent >= 100).count();

    Ok(HydrationHistoryResponse {
        start_date: start.format("%Y-%m-%d").to_string(),
        end_date: end.format("%Y-%m-%d").to_string(),
        goal_ml,
        days,
        days_goal_met,
    })
}

/// The drink catalogue: base types, their sub-options, and quick picks
pub fn list_drink_types() -> DrinkTypesResponse {
    let types = DrinkType::BASE
        .iter()
        .map(|t| DrinkTypeInfo {
            name: t.as_str().to_string(),
            label: t.label().to_string(),
            hydration_factor: hydration_factor(t),
            sub_options: t.sub_options().iter().map(|s| s.to_string()).collect(),
        })
        .collect();

    DrinkTypesResponse {
        types,
        quick_picks: quick_picks(),
    }
}
