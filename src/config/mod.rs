//! Configuration system for brightcurve.
//!
//! The configuration file doubles as the schedule store: besides a handful
//! of settings it carries the `[[schedule]]` entries that the CLI edits in
//! place.
//!
//! ## Configuration Source
//!
//! `$XDG_CONFIG_HOME/brightcurve/brightcurve.toml`, or `brightcurve.toml`
//! inside the directory passed with `--config DIR`. A commented default file
//! is written the first time the file is missing.
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Location]
//! latitude = 40.7128           # Geographic latitude for sun-linked entries
//! longitude = -74.0060         # Geographic longitude for sun-linked entries
//!
//! #[Display]
//! render_step = 15             # Minutes between rendered samples (1-720)
//! clock_refresh_secs = 60      # Wall clock refresh for watch mode (1-3600) seconds
//!
//! [sun_times]                  # Optional fixed table used instead of coordinates
//! sunrise = "6:45am"
//! sunset = "19:30"
//!
//! [[schedule]]
//! time = "07:00"
//! useOracle = true
//! oracleKey = "sunrise"
//! brightness = 80
//! ```
//!
//! ## Validation
//!
//! Coordinates, render step, refresh interval and entry brightness are range
//! checked. Time text is not checked; the time codec reads malformed values
//! as midnight.

pub mod builder;
pub mod loading;
pub mod store;
pub mod validation;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::*;
use crate::oracle::{SolarOracle, StaticOracle, TimeOracle};
use crate::schedule::ScheduleEntry;

pub use builder::create_default_config;
pub use loading::{
    get_config_path, load, load_from_path, private_path, save_to_path, set_config_dir,
};
pub use store::ScheduleFile;
pub use validation::validate_config;

/// Contents of `brightcurve.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_step: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_refresh_secs: Option<u64>,
    /// Fixed oracle answers, takes precedence over computed sun times.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sun_times: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
}

/// A configured oracle together with the position it is queried for.
pub struct OracleSettings {
    pub oracle: Box<dyn TimeOracle>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Config {
    pub fn load() -> Result<Self> {
        load()
    }

    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        load_from_path(path)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        get_config_path()
    }

    pub fn render_step(&self) -> u32 {
        self.render_step.unwrap_or(DEFAULT_RENDER_STEP)
    }

    pub fn clock_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.clock_refresh_secs.unwrap_or(DEFAULT_CLOCK_REFRESH_SECS))
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Oracle for sun-linked entries, if the config provides one.
    ///
    /// A `[sun_times]` table wins over coordinates. Without either, linked
    /// entries fall back to their own `time`.
    pub fn oracle_settings(&self) -> Option<OracleSettings> {
        let (latitude, longitude) = self.coordinates().unwrap_or((0.0, 0.0));

        if let Some(table) = &self.sun_times {
            let times = table
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            return Some(OracleSettings {
                oracle: Box::new(StaticOracle::new(times)),
                latitude,
                longitude,
            });
        }

        self.coordinates().map(|(latitude, longitude)| OracleSettings {
            oracle: Box::new(SolarOracle::new()),
            latitude,
            longitude,
        })
    }

    pub fn log_config(&self, path: &Path) {
        log_block_start!("Loaded configuration");
        log_indented!("File: {}", private_path(path));

        match (&self.sun_times, self.coordinates()) {
            (Some(table), _) => log_indented!("Sun times: fixed table ({} keys)", table.len()),
            (None, Some((lat, lon))) => log_indented!("Sun times: computed for {lat:.4}, {lon:.4}"),
            (None, None) => log_indented!("Sun times: none (linked entries use their own time)"),
        }

        log_indented!("Render step: {} minutes", self.render_step());
        log_indented!(
            "Clock refresh: {} seconds",
            self.clock_refresh_interval().as_secs()
        );

        let linked = self.schedule.iter().filter(|e| e.use_oracle).count();
        log_indented!(
            "Schedule: {} entries ({} sun-linked)",
            self.schedule.len(),
            linked
        );
    }
}
