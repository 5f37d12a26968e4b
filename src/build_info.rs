//! Build stamp
//!
//! `build.rs` bumps a counter in `build_number.txt` and records the compile
//! time. Both reach the binary as `JUSTHYDRATE_BUILD_*` env vars, so the
//! status tool can tell which server build answered.

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

const RAW_BUILD_NUMBER: Option<&str> = option_env!("JUSTHYDRATE_BUILD_NUMBER");
const RAW_BUILD_TIMESTAMP: Option<&str> = option_env!("JUSTHYDRATE_BUILD_TIMESTAMP");

/// Which JustHydrate build is running
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// 0 when built without the build script
    pub build_number: u64,
    /// UTC, `unknown` when built without the build script
    pub build_timestamp: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_stamp(RAW_BUILD_NUMBER, RAW_BUILD_TIMESTAMP)
    }

    fn from_stamp(number: Option<&str>, timestamp: Option<&'static str>) -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: number.and_then(|n| n.trim().parse().ok()).unwrap_or(0),
            build_timestamp: timestamp.unwrap_or("unknown"),
            description: DESCRIPTION,
        }
    }

    /// One line for stderr: name, version, build number and compile time
    pub fn banner(&self) -> String {
        format!(
            "{} {} #{} ({}), serving hydration tools on stdio",
            self.name, self.version, self.build_number, self.build_timestamp
        )
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Announce the build on stderr; stdout belongs to the MCP transport
pub fn print_startup_banner() {
    eprintln!("{}", BuildInfo::current().banner());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_parsing() {
        let stamped = BuildInfo::from_stamp(Some("42"), Some("2026-01-13T08:30:00Z"));
        assert_eq!(stamped.build_number, 42);
        assert_eq!(stamped.build_timestamp, "2026-01-13T08:30:00Z");

        let unstamped = BuildInfo::from_stamp(None, None);
        assert_eq!(unstamped.build_number, 0);
        assert_eq!(unstamped.build_timestamp, "unknown");

        assert_eq!(BuildInfo::from_stamp(Some("4a"), None).build_number, 0);
    }

    #[test]
    fn test_banner() {
        let info = BuildInfo::from_stamp(Some("7"), Some("2026-01-13T08:30:00Z"));
        assert_eq!(info.name, "justhydrate");
        assert_eq!(
            info.banner(),
            format!(
                "justhydrate {} #7 (2026-01-13T08:30:00Z), serving hydration tools on stdio",
                VERSION
            )
        );
    }
}
