//! Runtime configuration
//!
//! Read from the environment:
//! - `JUSTHYDRATE_DATABASE_PATH`: SQLite file (default `<project>/data/justhydrate.db`)
//! - `JUSTHYDRATE_GOAL_ML`: daily hydration goal in ml (default 2500)

use std::path::PathBuf;

use thiserror::Error;

use crate::hydration::DEFAULT_GOAL_ML;

pub const DATABASE_PATH_VAR: &str = "JUSTHYDRATE_DATABASE_PATH";
pub const GOAL_VAR: &str = "JUSTHYDRATE_GOAL_ML";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JUSTHYDRATE_GOAL_ML is not a whole number of millilitres: {0:?}")]
    UnparsableGoal(String),

    #[error("JUSTHYDRATE_GOAL_ML must be greater than 0, got {0}")]
    NonPositiveGoal(i64),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub goal_ml: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_path: database_path(std::env::var(DATABASE_PATH_VAR).ok()),
            goal_ml: parse_goal(std::env::var(GOAL_VAR).ok().as_deref())?,
        })
    }
}

/// Explicit path, or `data/justhydrate.db` under the project root
pub fn database_path(explicit: Option<String>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("justhydrate.db");
    path
}

/// Goal from its raw value; unset or blank means the default
pub fn parse_goal(raw: Option<&str>) -> Result<i64, ConfigError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(DEFAULT_GOAL_ML),
        Some(raw) => raw,
    };

    let goal: i64 = raw
        .parse()
        .map_err(|_| ConfigError::UnparsableGoal(raw.to_string()))?;

    if goal <= 0 {
        return Err(ConfigError::NonPositiveGoal(goal));
    }
    Ok(goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_defaults() {
        assert_eq!(parse_goal(None), Ok(2500));
        assert_eq!(parse_goal(Some("  ")), Ok(2500));
    }

    #[test]
    fn test_goal_parses() {
        assert_eq!(parse_goal(Some("3000")), Ok(3000));
        assert_eq!(parse_goal(Some(" 1800 ")), Ok(1800));
    }

    #[test]
    fn test_goal_rejects_bad_values() {
        assert_eq!(parse_goal(Some("0")), Err(ConfigError::NonPositiveGoal(0)));
        assert_eq!(parse_goal(Some("-5")), Err(ConfigError::NonPositiveGoal(-5)));
        assert_eq!(
            parse_goal(Some("2.5l")),
            Err(ConfigError::UnparsableGoal("2.5l".to_string()))
        );
    }

    #[test]
    fn test_explicit_database_path() {
        assert_eq!(
            database_path(Some("/tmp/hydrate.db".to_string())),
            PathBuf::from("/tmp/hydrate.db")
        );
        assert!(database_path(None).ends_with("data/justhydrate.db"));
    }
}
