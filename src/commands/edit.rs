//! Edit commands: add, move and delete schedule entries.
//!
//! Every edit goes through the controller, which hands the full replacement
//! list to the schedule file; the file is rewritten immediately.

use anyhow::Result;

use super::{PointView, ScheduleSession};
use crate::time_codec::{format_time, parse_time, wrap_minute_of_day};

/// A schedule change requested on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Add { time: String, brightness: f64 },
    Move {
        index: usize,
        time: String,
        brightness: f64,
    },
    Delete { index: usize },
}

fn minute_of(time: &str) -> f64 {
    wrap_minute_of_day(parse_time(time)) as f64
}

/// Apply `edit` to the session's schedule.
pub fn apply_edit(session: &mut ScheduleSession, edit: &Edit) -> Result<()> {
    let count = session.controller.entries().len();

    match edit {
        Edit::Add { time, brightness } => {
            session
                .controller
                .add_point(minute_of(time), *brightness);
            log_block_start!(
                "Added entry #{} at {}",
                count,
                format_time(minute_of(time))
            );
        }
        Edit::Move {
            index,
            time,
            brightness,
        } => {
            if *index >= count {
                anyhow::bail!("No schedule entry #{} ({} entries)", index, count);
            }
            session
                .controller
                .move_point(*index, minute_of(time), *brightness);
            log_block_start!("Moved entry #{} to {}", index, format_time(minute_of(time)));
        }
        Edit::Delete { index } => {
            if *index >= count {
                anyhow::bail!("No schedule entry #{} ({} entries)", index, count);
            }
            session.controller.delete_point(*index);
            log_block_start!("Deleted entry #{}", index);
        }
    }

    if let Some(e) = session.file.take_write_error() {
        return Err(e.context("The schedule was changed but could not be saved"));
    }
    Ok(())
}

/// Handle add, move and delete.
pub fn handle_edit_command(edit: Edit, debug_enabled: bool) -> Result<()> {
    let mut session = ScheduleSession::open(debug_enabled)?;
    apply_edit(&mut session, &edit)?;

    let points: Vec<PointView> = session
        .controller
        .points()
        .iter()
        .map(PointView::from)
        .collect();
    super::show::display_points(&points, session.controller.curve().boundary_value());
    log_end!();
    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("add, move, delete - Edit the schedule");
    log_block_start!("Usage:");
    log_indented!("brightcurve add <time> <brightness>");
    log_indented!("brightcurve move <index> <time> <brightness>");
    log_indented!("brightcurve delete <index>");
    log_block_start!("Arguments:");
    log_indented!("time        Clock time such as 06:30 or 6:30am");
    log_indented!("brightness  Percentage, clamped to 0-100 and rounded");
    log_indented!("index       Entry number as printed by 'show'");
    log_block_start!("Moving a sun-linked entry pins it to the new time.");
    log_end!();
}
