//! Time source abstraction for evaluating schedules at the real or a pinned time.
//!
//! Schedule evaluation needs "now" in two places: the solar oracle picks the
//! date to compute sunrise and sunset for, and the wall clock refresh turns the
//! current instant into a minute-of-day. Both read through this module so the
//! CLI can pin "now" with `--at` and tests can run against a known instant.

use chrono::{DateTime, Local, TimeZone};
use once_cell::sync::OnceCell;
use std::sync::Arc;

static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Local>;

    /// Check if this is a pinned (non-real) time source
    fn is_simulated(&self) -> bool;
}

/// Real-time implementation that uses actual system time
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Time source frozen at a single instant.
///
/// Used by `--at` to ask "what would the schedule look like then", including
/// the sun times of that date.
pub struct FixedTimeSource {
    instant: DateTime<Local>,
}

impl FixedTimeSource {
    pub fn new(instant: DateTime<Local>) -> Self {
        Self { instant }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Local> {
        self.instant
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

/// Get the current time from the global time source
pub fn now() -> DateTime<Local> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource)).now()
}

/// Check if "now" is pinned
pub fn is_simulated() -> bool {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .is_simulated()
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS" as local time
pub fn parse_datetime(s: &str) -> Result<DateTime<Local>, String> {
    use chrono::NaiveDateTime;

    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))
        .and_then(|naive| {
            Local
                .from_local_datetime(&naive)
                .single()
                .ok_or_else(|| "Ambiguous or invalid local time".to_string())
        })
}
