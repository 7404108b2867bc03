//! Schedule data model: persisted entries and their resolved points.
//!
//! A schedule is an ordered list of [`ScheduleEntry`] values owned by whoever
//! stores it (the config file, for the CLI). Entries are never assumed to be
//! sorted or unique in time. Before anything can be drawn or sampled the list
//! is run through [`resolve`], producing time-sorted [`ResolvedPoint`]s that
//! point back at their source entry by index.

pub mod resolver;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use resolver::{OracleQuery, resolve};

/// Per-display overrides carried with an entry.
///
/// The schedule engine never looks inside; it only keeps the map attached to
/// its entry through edits.
pub type MonitorOverrides = BTreeMap<String, toml::Value>;

/// One user-authored schedule record.
///
/// The serialized shape is
/// `{ time?, useOracle?, oracleKey?, brightness, monitorOverrides? }`; every
/// field except `brightness` may be absent. Snake-case spellings are accepted
/// on input so hand-written TOML reads naturally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Clock time text, `HH:MM` or 12-hour with `am`/`pm`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Brightness percentage (0-100).
    pub brightness: f64,

    /// Take the time from the sun oracle instead of `time`.
    #[serde(default, alias = "use_oracle")]
    pub use_oracle: bool,

    /// Oracle key such as `"sunrise"`; only meaningful with `use_oracle`.
    #[serde(default, alias = "oracle_key", skip_serializing_if = "Option::is_none")]
    pub oracle_key: Option<String>,

    #[serde(
        default,
        alias = "monitor_overrides",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub monitor_overrides: MonitorOverrides,
}

impl ScheduleEntry {
    /// A fixed-time entry with no overrides.
    pub fn fixed(time: impl Into<String>, brightness: f64) -> Self {
        Self {
            time: Some(time.into()),
            brightness,
            use_oracle: false,
            oracle_key: None,
            monitor_overrides: MonitorOverrides::new(),
        }
    }

    /// An oracle-linked entry. `fallback_time` is used when the oracle has no
    /// answer for `key`.
    pub fn linked(key: impl Into<String>, fallback_time: Option<String>, brightness: f64) -> Self {
        Self {
            time: fallback_time,
            brightness,
            use_oracle: true,
            oracle_key: Some(key.into()),
            monitor_overrides: MonitorOverrides::new(),
        }
    }
}

/// An entry materialized onto the day for one resolve pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPoint {
    /// Minute of day in `0..1440`.
    pub minute: u32,
    pub brightness: f64,
    /// Index of the entry this point came from. Sorting changes positions, so
    /// this is the only handle edits can use.
    pub source_index: usize,
    /// The entry is oracle-linked and snaps back to the oracle on every resolve.
    pub is_oracle_linked: bool,
}
