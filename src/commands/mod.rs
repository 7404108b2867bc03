//! Command-line command handlers for brightcurve.
//!
//! Each command lives in its own submodule. All of them work on the schedule
//! stored in the configuration file through a [`ScheduleSession`].

pub mod edit;
pub mod get;
pub mod help;
pub mod preview;
pub mod render;
pub mod show;
pub mod watch;

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::{Config, ScheduleFile};
use crate::controller::ScheduleController;
use crate::schedule::ResolvedPoint;
use crate::time_codec::format_time;

/// The loaded schedule file and a controller editing it.
pub struct ScheduleSession {
    pub file: ScheduleFile,
    pub config: Config,
    pub controller: ScheduleController,
}

impl ScheduleSession {
    /// Load the configured schedule, creating the default file if needed.
    pub fn open(debug_enabled: bool) -> Result<Self> {
        let path = Config::get_config_path()?;
        let config = Config::load()?;
        if debug_enabled {
            config.log_config(&path);
        }
        Ok(Self::from_config(path, config, debug_enabled))
    }

    /// Wrap an already loaded configuration stored at `path`.
    pub fn from_config(path: PathBuf, config: Config, debug_enabled: bool) -> Self {
        let file = ScheduleFile::from_config(path, config.clone());
        let mut controller =
            ScheduleController::new(Box::new(file.clone())).with_debug(debug_enabled);
        if let Some(settings) = config.oracle_settings() {
            controller =
                controller.with_oracle(settings.oracle, settings.latitude, settings.longitude);
        }
        Self {
            file,
            config,
            controller,
        }
    }
}

/// One resolved point as shown to users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointView {
    pub index: usize,
    pub time: String,
    pub minute: u32,
    pub brightness: f64,
    pub linked: bool,
}

impl From<&ResolvedPoint> for PointView {
    fn from(point: &ResolvedPoint) -> Self {
        Self {
            index: point.source_index,
            time: format_time(point.minute as f64),
            minute: point.minute,
            brightness: point.brightness,
            linked: point.is_oracle_linked,
        }
    }
}
