//! Get command: brightness at one time of day.

use anyhow::Result;

use super::ScheduleSession;
use crate::time_codec::{format_time, parse_time, wrap_minute_of_day};

/// Minute of day for `time` text, or the current wall-clock minute.
pub(crate) fn target_minute(time: Option<&str>) -> f64 {
    match time {
        Some(text) => wrap_minute_of_day(parse_time(text)) as f64,
        None => crate::clock::current_minute(),
    }
}

/// Handle the get command.
pub fn handle_get_command(time: Option<&str>, debug_enabled: bool) -> Result<()> {
    let session = ScheduleSession::open(debug_enabled)?;
    let minute = target_minute(time);
    let brightness = session.controller.brightness_at(minute);

    let label = match time {
        Some(_) => format_time(minute),
        None => format!("{} (now)", format_time(minute)),
    };
    log_block_start!("Brightness at {}: {:.1}%", label, brightness);
    log_end!();
    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("get - Brightness at a time of day");
    log_block_start!("Usage: brightcurve get [TIME]");
    log_block_start!("Arguments:");
    log_indented!("TIME  Clock time such as 21:30 or 9:30pm");
    log_indented!("      If omitted, uses the current time (or --at)");
    log_block_start!("Examples:");
    log_indented!("brightcurve get 7:15am");
    log_indented!("brightcurve --at \"2024-06-21 22:00:00\" get");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_minute_from_text() {
        assert_eq!(target_minute(Some("7:30pm")), 1170.0);
        assert_eq!(target_minute(Some("00:00")), 0.0);
        // out-of-range text wraps onto the day
        assert_eq!(target_minute(Some("25:00")), 60.0);
        assert_eq!(target_minute(Some("garbage")), 0.0);
    }
}
