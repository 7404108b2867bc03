//! Preview command: play the whole day back in five seconds.

use anyhow::Result;

use super::ScheduleSession;
use crate::preview::{TerminalPreview, run_preview};

/// Handle the preview command.
pub fn handle_preview_command(debug_enabled: bool) -> Result<()> {
    let session = ScheduleSession::open(debug_enabled)?;
    let display = TerminalPreview::new();
    let mut controller = session
        .controller
        .with_preview(Box::new(display.clone()));

    log_block_start!("Previewing one day in five seconds (Ctrl+C to stop)");
    let report = run_preview(&mut controller, &display)?;

    if report.finished {
        log_block_start!("Preview finished");
    } else {
        log_block_start!("Preview interrupted");
    }
    if debug_enabled {
        log_debug!(
            "{} frames, {} brightness updates",
            report.frames,
            report.notifications
        );
    }
    log_end!();
    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("preview - Fast-forward through one day");
    log_block_start!("Usage: brightcurve preview");
    log_block_start!("Plays the brightness curve from 00:00 to 24:00 in five seconds.");
    log_indented!("Press Ctrl+C to stop early.");
    log_end!();
}
