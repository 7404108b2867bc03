//! Watch command: follow the current brightness on the wall clock.
//!
//! A [`ClockRefresh`] thread reports the minute of day at the configured
//! interval. The main thread re-reads the schedule file on each tick so edits
//! made by another `brightcurve` invocation show up without a restart.

use anyhow::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{RecvTimeoutError, channel};
use std::time::Duration;

use super::ScheduleSession;
use crate::clock::ClockRefresh;
use crate::config::Config;
use crate::time_codec::format_time;

// How often the main loop checks for a termination signal
const SIGNAL_POLL: Duration = Duration::from_millis(100);

/// Handle the watch command.
pub fn handle_watch_command(debug_enabled: bool) -> Result<()> {
    let mut session = ScheduleSession::open(debug_enabled)?;
    let path = session.file.path();

    let stop = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&stop))?;
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&stop))?;

    let (tx, rx) = channel();
    let interval = session.config.clock_refresh_interval();
    let _refresh = ClockRefresh::spawn(interval, move |minute| {
        let _ = tx.send(minute);
    });

    log_block_start!(
        "Watching brightness every {}s (Ctrl+C to stop)",
        interval.as_secs()
    );

    while !stop.load(Ordering::SeqCst) {
        let minute = match rx.recv_timeout(SIGNAL_POLL) {
            Ok(minute) => minute,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        match Config::load_from_path(&path) {
            Ok(config) if config != session.config => {
                if debug_enabled {
                    log_debug!("Schedule file changed, reloading");
                }
                session = ScheduleSession::from_config(path.clone(), config, debug_enabled);
            }
            Ok(_) => {}
            Err(e) => {
                log_warning!("Keeping previous schedule: {:#}", e);
            }
        }

        let brightness = session.controller.brightness_at(minute);
        log_decorated!("{}  {:>5.1}%", format_time(minute), brightness);
    }

    log_block_start!("Stopped watching");
    log_end!();
    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("watch - Follow the current brightness");
    log_block_start!("Usage: brightcurve watch");
    log_block_start!("Prints the brightness for the current time on every clock refresh");
    log_indented!("(clock_refresh_secs in the config). Press Ctrl+C to stop.");
    log_end!();
}
