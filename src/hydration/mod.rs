//! Hydration and nutrition calculations
//!
//! Stateless; safe to call from any thread with any snapshot of entries.

pub mod calculator;
mod nutrition;

use thiserror::Error;

pub use calculator::{
    aggregate, daily_summary, day_bounds, day_window, entry_figures, entry_hydration_percent,
    hydration_contribution, hydration_factor, local_midnight, nutrition_estimate, start_of_day,
    DailyAggregate, EntryFigures, DEFAULT_GOAL_ML, MILK_SPLASH_ML,
};
pub use nutrition::NutritionEstimate;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HydrationError {
    #[error("Hydration goal must be greater than 0 ml, got {0}")]
    InvalidGoal(i64),

    #[error("Daily {0} total is too large to represent")]
    Overflow(&'static str),
}
