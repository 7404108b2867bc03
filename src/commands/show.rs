//! Show command: the resolved schedule and its midnight boundary value.

use anyhow::Result;
use serde_json::json;

use super::{PointView, ScheduleSession};

/// Handle the show command.
pub fn handle_show_command(debug_enabled: bool, json: bool) -> Result<()> {
    let session = ScheduleSession::open(debug_enabled)?;
    let points: Vec<PointView> = session
        .controller
        .points()
        .iter()
        .map(PointView::from)
        .collect();
    let boundary = session.controller.curve().boundary_value();

    if json {
        let output = json!({
            "points": points,
            "boundary": boundary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    display_points(&points, boundary);
    log_end!();
    Ok(())
}

pub(crate) fn display_points(points: &[PointView], boundary: Option<f64>) {
    if points.is_empty() {
        log_block_start!("The schedule is empty");
        log_indented!("Every time of day samples at 50%");
        log_indented!("Add a point with: brightcurve add <time> <brightness>");
        return;
    }

    log_block_start!("Schedule ({} points):", points.len());
    for point in points {
        let marker = if point.linked { "  (sun-linked)" } else { "" };
        log_indented!(
            "#{:<3} {}  {:>5.1}%{}",
            point.index,
            point.time,
            point.brightness,
            marker
        );
    }

    if let Some(value) = boundary {
        log_block_start!("Midnight boundary: {:.1}%", value);
    }
}

pub fn display_help() {
    log_version!();
    log_block_start!("show - Display the resolved schedule");
    log_block_start!("Usage: brightcurve show [--json]");
    log_block_start!("Options:");
    log_indented!("--json, -j  Print points and boundary value as JSON");
    log_block_start!("Points are listed in time order. The index in front of each");
    log_indented!("point is the one used by 'move' and 'delete'.");
    log_end!();
}
