//! Application constants and default values for brightcurve.
//!
//! This module contains the schedule domain limits, configuration defaults,
//! validation limits, and operational timing constants used throughout the
//! application.

// ═══ Schedule Domain ═══

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 1440;
pub const LAST_MINUTE_OF_DAY: u32 = MINUTES_PER_DAY - 1; // 23:59, the latest editable point
pub const MINIMUM_BRIGHTNESS: f64 = 0.0;
pub const MAXIMUM_BRIGHTNESS: f64 = 100.0;
pub const NEUTRAL_BRIGHTNESS: f64 = 50.0; // Returned by an empty curve
pub const FALLBACK_ENTRY_TIME: &str = "12:00"; // Used when an entry resolves to no time at all

// ═══ Preview Playback ═══

pub const PLAYBACK_CYCLE_MS: f64 = 5000.0; // Real milliseconds for one simulated day
pub const PREVIEW_THROTTLE_MS: u64 = 50; // Minimum gap between preview brightness notifications
pub const PREVIEW_FRAME_MS: u64 = 16; // Frame pacing for the terminal playback driver

// ═══ Configuration Defaults ═══

pub const CONFIG_FILE_NAME: &str = "brightcurve.toml";
pub const CONFIG_DIR_NAME: &str = "brightcurve";
pub const DEFAULT_RENDER_STEP: u32 = 15; // minutes between render samples
pub const DEFAULT_CLOCK_REFRESH_SECS: u64 = 60;

// ═══ Validation Limits ═══

pub const MINIMUM_RENDER_STEP: u32 = 1;
pub const MAXIMUM_RENDER_STEP: u32 = 720;
pub const MINIMUM_CLOCK_REFRESH_SECS: u64 = 1;
pub const MAXIMUM_CLOCK_REFRESH_SECS: u64 = 3600;

// ═══ Oracle Keys ═══

pub const ORACLE_KEY_SUNRISE: &str = "sunrise";
pub const ORACLE_KEY_SUNSET: &str = "sunset";
pub const ORACLE_KEY_SOLAR_NOON: &str = "solarNoon";

// ═══ Exit Codes ═══

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
