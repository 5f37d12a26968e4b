//! JustHydrate Status Tool
//!
//! Provides runtime status information about the service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Drink logging instructions for AI assistants
pub const HYDRATION_INSTRUCTIONS: &str = r#"
# JustHydrate Logging Instructions

## Logging a drink

Call `log_drink` with:
- `drink_type`: one of `water`, `juice`, `tea`, `coffee`, `milk`, `alcohol`,
  `softdrink`, `sweet`, `sports`, or any free-form label ("oat latte").
  Names are case-sensitive; use the lowercase base name when one fits.
- `volume_ml` (optional): whole millilitres, 0 to 2000. Leave it out to
  reuse the last volume logged for that drink type (200 ml the first time).
  Sub-options such as "Latte" share the volume of their base type.
- `timestamp` (optional): RFC 3339, e.g. `2026-01-13T08:30:00+01:00`.
  Leave it out to log the drink as drunk now.

For the common presets use `log_quick_pick` with `water` (200 ml),
`tea` (150 ml), `coffee` (100 ml) or `milk` (150 ml).

## How hydration is counted

| Drink | Counts toward goal |
|-------|--------------------|
| tea, coffee, and any label containing "tea" or "coffee" | 80% |
| everything else | 100% |

The daily percentage is hydration ml × 100 / goal, capped at 100.

## Nutrition estimate

- `milk`: 0.5 kcal, 0.05 g carbs, 0.035 g protein, 0.02 g fat per ml.
- `tea` and `coffee`: a 15 ml splash of milk is always assumed (+7 kcal).
- Everything else: zero.

## Reading back

- `day_summary` (date `YYYY-MM-DD`, default today): the day's drinks and totals.
- `hydration_history` (start/end date): one total per day.
- `update_drink` / `delete_drink` fix mistakes; editing keeps the original time.
"#;

/// Service status information
#[derive(Debug, Serialize)]
pub struct HydrateStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub goal_ml: i64,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Tracks service runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    goal_ml: i64,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf, goal_ml: i64) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            goal_ml,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> HydrateStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        HydrateStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            goal_ml: self.goal_ml,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
