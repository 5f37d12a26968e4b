//! Hydration calculator
//!
//! Pure functions from drink entries to hydration and nutrition figures.
//! Nothing here is cached or stored: every figure is recomputed from the
//! snapshot of entries passed in.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use super::nutrition::scale;
use super::{HydrationError, NutritionEstimate};
use crate::models::{DrinkEntry, DrinkType};

/// Volume of the splash of milk assumed in every tea and coffee.
///
/// Applied whether or not milk was actually added.
pub const MILK_SPLASH_ML: i64 = 15;

/// Default daily hydration goal
pub const DEFAULT_GOAL_ML: i64 = 2500;

/// Aggregate figures over one day's entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyAggregate {
    pub total_volume_ml: i64,
    pub hydration_ml: i64,
    /// Always within 0..=100
    pub hydration_percent: i64,
    pub total_nutrition: NutritionEstimate,
}

/// Figures for a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryFigures {
    pub hydration_ml: i64,
    /// Share of the volume that counts, 80 or 100
    pub hydration_percent: i64,
    pub nutrition: NutritionEstimate,
}

// Caffeinated drinks count for 80%. Custom labels are matched by substring
// so "iced coffee" or "green tea" fall in the same bucket.
fn factor_percent(drink_type: &DrinkType) -> i64 {
    match drink_type {
        DrinkType::Tea | DrinkType::Coffee => 80,
        DrinkType::Custom(label) if label.contains("coffee") || label.contains("tea") => 80,
        _ => 100,
    }
}

/// Fraction of a drink's volume that counts toward the goal
pub fn hydration_factor(drink_type: &DrinkType) -> f64 {
    factor_percent(drink_type) as f64 / 100.0
}

/// Millilitres of an entry that count toward the goal, truncated toward zero
pub fn hydration_contribution(entry: &DrinkEntry) -> i64 {
    scale(entry.volume_ml, factor_percent(&entry.drink_type), 100)
}

/// Hydration factor of an entry as a whole percentage
pub fn entry_hydration_percent(entry: &DrinkEntry) -> i64 {
    factor_percent(&entry.drink_type)
}

/// Estimated nutrition of an entry.
///
/// Milk uses the milk formula on its own volume. Plain "tea" and "coffee"
/// get the milk formula on a fixed splash on top of any base rule. Every
/// other type, custom labels included, is zero.
pub fn nutrition_estimate(entry: &DrinkEntry) -> NutritionEstimate {
    let mut estimate = match entry.drink_type {
        DrinkType::Milk => NutritionEstimate::milk(entry.volume_ml),
        _ => NutritionEstimate::zero(),
    };

    if matches!(entry.drink_type, DrinkType::Tea | DrinkType::Coffee) {
        estimate += NutritionEstimate::milk(MILK_SPLASH_ML);
    }

    estimate
}

pub fn entry_figures(entry: &DrinkEntry) -> EntryFigures {
    EntryFigures {
        hydration_ml: hydration_contribution(entry),
        hydration_percent: entry_hydration_percent(entry),
        nutrition: nutrition_estimate(entry),
    }
}

/// First instant of `date` in `tz`.
///
/// When a DST jump skips midnight the day starts at the first local time
/// that exists.
pub fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..24 * 60)
        .map(|m| midnight + Duration::minutes(m))
        .find_map(|t| tz.from_local_datetime(&t).earliest())
}

/// Local midnight on or before `reference`
pub fn start_of_day<Tz: TimeZone>(reference: &DateTime<Tz>) -> DateTime<Tz> {
    // The scan reaches the reference's own local time, which exists
    local_midnight(&reference.timezone(), reference.date_naive())
        .unwrap_or_else(|| reference.clone())
}

/// Half-open UTC bounds of the local day containing `reference`
pub fn day_bounds<Tz: TimeZone>(reference: &DateTime<Tz>) -> (DateTime<Utc>, DateTime<Utc>) {
    let tz = reference.timezone();
    let start = start_of_day(reference);
    let end = reference
        .date_naive()
        .succ_opt()
        .and_then(|next| local_midnight(&tz, next))
        .unwrap_or_else(|| start.clone() + Duration::days(1));

    (start.with_timezone(&Utc), end.with_timezone(&Utc))
}

/// Entries logged on the local day containing `reference`.
///
/// Entries without a timestamp are treated as distant past and dropped.
/// Input order is kept.
pub fn day_window<'a, Tz, I>(reference: &DateTime<Tz>, entries: I) -> Vec<&'a DrinkEntry>
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'a DrinkEntry>,
{
    let (start, end) = day_bounds(reference);
    entries
        .into_iter()
        .filter(|e| matches!(e.timestamp, Some(t) if t >= start && t < end))
        .collect()
}

/// Sum the given entries against a daily goal.
///
/// A goal of zero or less is a caller error and is rejected up front. A
/// total that leaves the `i64` range is reported as `Overflow`.
pub fn aggregate<'a, I>(entries: I, goal_ml: i64) -> Result<DailyAggregate, HydrationError>
where
    I: IntoIterator<Item = &'a DrinkEntry>,
{
    if goal_ml <= 0 {
        return Err(HydrationError::InvalidGoal(goal_ml));
    }

    let mut total_volume_ml: i64 = 0;
    let mut hydration_ml: i64 = 0;
    let mut total_nutrition = NutritionEstimate::zero();

    for entry in entries {
        total_volume_ml = total_volume_ml
            .checked_add(entry.volume_ml)
            .ok_or(HydrationError::Overflow("volume"))?;
        hydration_ml = hydration_ml
            .checked_add(hydration_contribution(entry))
            .ok_or(HydrationError::Overflow("hydration"))?;
        total_nutrition = total_nutrition
            .checked_add(nutrition_estimate(entry))
            .ok_or(HydrationError::Overflow("nutrition"))?;
    }

    // i128 so that `hydration_ml * 100` cannot overflow before the clamp
    let hydration_percent =
        (i128::from(hydration_ml) * 100 / i128::from(goal_ml)).clamp(0, 100) as i64;

    Ok(DailyAggregate {
        total_volume_ml,
        hydration_ml,
        hydration_percent,
        total_nutrition,
    })
}

/// `aggregate` over the local day containing `reference`
pub fn daily_summary<'a, Tz, I>(
    reference: &DateTime<Tz>,
    entries: I,
    goal_ml: i64,
) -> Result<DailyAggregate, HydrationError>
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'a DrinkEntry>,
{
    aggregate(day_window(reference, entries), goal_ml)
}
