//! Schedule edit operations.
//!
//! Each operation takes the current entry list and returns a complete
//! replacement. The engine keeps no copy of its own; the caller hands the
//! result to whoever owns the schedule (see [`crate::controller`]).
//!
//! Minute and brightness inputs are clamped again here even though the
//! pointer mapping already clamps them, since edits also arrive from the CLI.

pub mod drag;

use crate::constants::{LAST_MINUTE_OF_DAY, MAXIMUM_BRIGHTNESS, MINIMUM_BRIGHTNESS};
use crate::schedule::{MonitorOverrides, ScheduleEntry};
use crate::time_codec::format_time;

pub use drag::{DragSession, ListenerId, PointerHost, PointerListener};

/// Clamp a minute into the editable range `0..=1439`.
pub fn clamp_edit_minute(minute: f64) -> f64 {
    if minute.is_nan() {
        return 0.0;
    }
    minute.clamp(0.0, LAST_MINUTE_OF_DAY as f64)
}

/// Clamp and round a brightness to a whole percentage.
pub fn clamp_edit_brightness(brightness: f64) -> f64 {
    if brightness.is_nan() {
        return MINIMUM_BRIGHTNESS;
    }
    brightness
        .clamp(MINIMUM_BRIGHTNESS, MAXIMUM_BRIGHTNESS)
        .round()
}

/// Move the entry at `source_index` to a fixed time and brightness.
///
/// A moved entry stops following the oracle. Its oracle key and overrides are
/// kept. An index past the end leaves the list as it was.
pub fn move_point(
    entries: &[ScheduleEntry],
    source_index: usize,
    minute: f64,
    brightness: f64,
) -> Vec<ScheduleEntry> {
    let mut updated = entries.to_vec();
    if let Some(entry) = updated.get_mut(source_index) {
        entry.use_oracle = false;
        entry.time = Some(format_time(clamp_edit_minute(minute)));
        entry.brightness = clamp_edit_brightness(brightness);
    }
    updated
}

/// Append a fixed-time entry.
pub fn add_point(entries: &[ScheduleEntry], minute: f64, brightness: f64) -> Vec<ScheduleEntry> {
    let mut updated = entries.to_vec();
    updated.push(ScheduleEntry {
        time: Some(format_time(clamp_edit_minute(minute))),
        brightness: clamp_edit_brightness(brightness),
        use_oracle: false,
        oracle_key: None,
        monitor_overrides: MonitorOverrides::new(),
    });
    updated
}

/// Remove the entry at `source_index`. Deleting the last entry is allowed.
pub fn delete_point(entries: &[ScheduleEntry], source_index: usize) -> Vec<ScheduleEntry> {
    let mut updated = entries.to_vec();
    if source_index < updated.len() {
        updated.remove(source_index);
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> Vec<ScheduleEntry> {
        let mut linked = ScheduleEntry::linked("sunset", Some("19:00".to_string()), 70.0);
        linked
            .monitor_overrides
            .insert("HDMI-A-1".to_string(), toml::Value::Integer(55));
        vec![ScheduleEntry::fixed("07:00", 30.0), linked]
    }

    #[test]
    fn test_move_point_fixes_time_and_unlinks() {
        let entries = sample_entries();
        let updated = move_point(&entries, 1, 1290.4, 42.6);

        assert_eq!(updated[1].time.as_deref(), Some("21:30"));
        assert_eq!(updated[1].brightness, 43.0);
        assert!(!updated[1].use_oracle);
        assert_eq!(updated[1].oracle_key.as_deref(), Some("sunset"));
        assert_eq!(updated[1].monitor_overrides.len(), 1);
        assert_eq!(updated[0], entries[0]);
        // source untouched
        assert!(entries[1].use_oracle);
    }

    #[test]
    fn test_move_point_clamps() {
        let updated = move_point(&sample_entries(), 0, 2000.0, -15.0);
        assert_eq!(updated[0].time.as_deref(), Some("23:59"));
        assert_eq!(updated[0].brightness, 0.0);

        let updated = move_point(&sample_entries(), 0, -40.0, 250.0);
        assert_eq!(updated[0].time.as_deref(), Some("00:00"));
        assert_eq!(updated[0].brightness, 100.0);
    }

    #[test]
    fn test_move_point_out_of_range_index_is_noop() {
        let entries = sample_entries();
        assert_eq!(move_point(&entries, 7, 100.0, 10.0), entries);
    }

    #[test]
    fn test_add_point_appends_fixed_entry() {
        let updated = add_point(&sample_entries(), 600.0, 64.5);

        assert_eq!(updated.len(), 3);
        let added = &updated[2];
        assert_eq!(added.time.as_deref(), Some("10:00"));
        assert_eq!(added.brightness, 65.0);
        assert!(!added.use_oracle);
        assert!(added.oracle_key.is_none());
        assert!(added.monitor_overrides.is_empty());
    }

    #[test]
    fn test_delete_point_down_to_empty() {
        let updated = delete_point(&sample_entries(), 0);
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].oracle_key.as_deref(), Some("sunset"));

        let updated = delete_point(&updated, 0);
        assert!(updated.is_empty());

        assert!(delete_point(&updated, 0).is_empty());
    }
}
