//! The configuration file as the schedule owner.
//!
//! [`ScheduleFile`] hands the loaded `[[schedule]]` entries to the controller
//! and writes every replacement straight back to disk. The handle is cheap to
//! clone; clones share one in-memory copy, so a command can keep a handle
//! while the controller owns another and check afterwards whether a write
//! failed.

use anyhow::Result;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{Config, load_from_path, private_path, save_to_path};
use crate::controller::ScheduleOwner;
use crate::schedule::ScheduleEntry;

struct FileState {
    path: PathBuf,
    config: Config,
    write_error: Option<anyhow::Error>,
}

#[derive(Clone)]
pub struct ScheduleFile {
    state: Rc<RefCell<FileState>>,
}

impl ScheduleFile {
    /// Load and validate the file at `path`.
    pub fn open(path: PathBuf) -> Result<Self> {
        let config = load_from_path(&path)?;
        Ok(Self::from_config(path, config))
    }

    /// Wrap an already loaded configuration.
    pub fn from_config(path: PathBuf, config: Config) -> Self {
        Self {
            state: Rc::new(RefCell::new(FileState {
                path,
                config,
                write_error: None,
            })),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.state.borrow().path.clone()
    }

    /// Snapshot of the current configuration, including unsaved edits.
    pub fn config(&self) -> Config {
        self.state.borrow().config.clone()
    }

    /// The error of the most recent failed write, if any, clearing it.
    pub fn take_write_error(&self) -> Option<anyhow::Error> {
        self.state.borrow_mut().write_error.take()
    }

    fn persist(state: &mut FileState) {
        match save_to_path(&state.config, Path::new(&state.path)) {
            Ok(()) => state.write_error = None,
            Err(e) => {
                log_pipe!();
                log_error!(
                    "Failed to save schedule to {}: {}",
                    private_path(&state.path),
                    e
                );
                state.write_error = Some(e);
            }
        }
    }
}

impl ScheduleOwner for ScheduleFile {
    fn entries(&self) -> Vec<ScheduleEntry> {
        self.state.borrow().config.schedule.clone()
    }

    fn on_update(&mut self, entries: Vec<ScheduleEntry>) {
        let mut state = self.state.borrow_mut();
        state.config.schedule = entries;
        Self::persist(&mut state);
    }
}
