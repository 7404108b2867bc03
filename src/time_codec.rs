//! Conversion between clock-time text and minute-of-day values.
//!
//! Schedule entries carry their time as text, either canonical 24-hour `HH:MM`
//! or a 12-hour form with an `am`/`pm` marker (the sun oracle and older configs
//! both produce the latter). Everything downstream works in whole minutes since
//! midnight, so this module is the single place where text becomes a number and
//! back again.
//!
//! Neither direction fails. Malformed text degrades to zero components and
//! out-of-range minutes are clamped when formatting.

use crate::constants::{MINUTES_PER_DAY, MINUTES_PER_HOUR};

// Components beyond this are pinned so the minute arithmetic cannot overflow
const COMPONENT_LIMIT: f64 = 1_000_000.0;

/// Parse clock-time text into minutes since midnight.
///
/// A case-insensitive `am`/`pm` marker may appear anywhere in the text. With a
/// `pm` marker an hour other than 12 is moved into the afternoon, with an `am`
/// marker hour 12 becomes hour 0. Without a marker the text is read as 24-hour.
///
/// Empty text yields 0. Hour and minute are not range checked, so `"25:00"`
/// parses to 1500; callers that need a minute-of-day reduce or clamp. Huge
/// components such as `"1e300"` are pinned to one million.
pub fn parse_time(text: &str) -> i64 {
    if text.is_empty() {
        return 0;
    }

    let lowered = text.to_ascii_lowercase();
    let is_pm = lowered.contains("pm");
    let is_am = lowered.contains("am");

    let stripped = strip_first_marker(&lowered);
    let mut parts = stripped.trim().split(':');
    let mut hour = parse_component(parts.next());
    let minute = parse_component(parts.next());

    if is_pm && hour != 12 {
        hour += 12;
    }
    if is_am && hour == 12 {
        hour = 0;
    }

    hour * MINUTES_PER_HOUR as i64 + minute
}

/// Format a minute count as canonical zero-padded 24-hour `HH:MM`.
///
/// Hour and minute are derived first and then clamped independently to
/// `0..=23` and `0..=59`, so `-5` formats as `00:00` and `1500` as `23:00`.
pub fn format_time(minutes: f64) -> String {
    let hour = (minutes / MINUTES_PER_HOUR as f64).floor();
    let minute = (minutes % MINUTES_PER_HOUR as f64).floor();

    let hour = hour.clamp(0.0, 23.0) as u32;
    let minute = minute.clamp(0.0, 59.0) as u32;

    format!("{hour:02}:{minute:02}")
}

/// Reduce any parsed minute value onto the day, wrapping negatives forward.
pub fn wrap_minute_of_day(minutes: i64) -> u32 {
    minutes.rem_euclid(MINUTES_PER_DAY as i64) as u32
}

// Only the first marker occurrence is removed; "12:00pm" and "pm 12:00" both
// reduce to "12:00".
fn strip_first_marker(lowered: &str) -> String {
    let am = lowered.find("am");
    let pm = lowered.find("pm");
    let position = match (am, pm) {
        (Some(a), Some(p)) => Some(a.min(p)),
        (Some(a), None) => Some(a),
        (None, Some(p)) => Some(p),
        (None, None) => None,
    };

    match position {
        Some(idx) => {
            let mut out = String::with_capacity(lowered.len());
            out.push_str(&lowered[..idx]);
            out.push_str(&lowered[idx + 2..]);
            out
        }
        None => lowered.to_string(),
    }
}

fn parse_component(part: Option<&str>) -> i64 {
    part.map(str::trim)
        .and_then(|p| p.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.trunc().clamp(-COMPONENT_LIMIT, COMPONENT_LIMIT) as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_24_hour() {
        assert_eq!(parse_time("00:00"), 0);
        assert_eq!(parse_time("06:00"), 360);
        assert_eq!(parse_time("20:00"), 1200);
        assert_eq!(parse_time("23:59"), 1439);
        assert_eq!(parse_time(" 7:05 "), 425);
    }

    #[test]
    fn test_parse_meridiem() {
        assert_eq!(parse_time("12:00am"), 0);
        assert_eq!(parse_time("12:00pm"), 720);
        assert_eq!(parse_time("1:30pm"), 810);
        assert_eq!(parse_time("11:59pm"), 1439);
        assert_eq!(parse_time("6:15 AM"), 375);
        assert_eq!(parse_time("PM 3:00"), 900);
    }

    #[test]
    fn test_parse_degrades_instead_of_failing() {
        assert_eq!(parse_time(""), 0);
        assert_eq!(parse_time("noon"), 0);
        assert_eq!(parse_time("7"), 420);
        assert_eq!(parse_time("25:00"), 1500);
        assert_eq!(parse_time("08:xx"), 480);
    }

    #[test]
    fn test_parse_huge_components_are_pinned() {
        assert_eq!(parse_time("1e300:00"), 60_000_000);
        assert_eq!(parse_time("1e300 pm"), 60_000_720);
        assert_eq!(parse_time("99999999999999999999"), 60_000_000);
        assert_eq!(parse_time("-1e300:-1e300"), -61_000_000);
        assert_eq!(parse_time("12:1e300am"), 1_000_000);

        assert_eq!(wrap_minute_of_day(parse_time("1e300:00")), 960);
        assert_eq!(wrap_minute_of_day(parse_time("-1e300:-1e300")), 1280);
    }

    #[test]
    fn test_format_canonical() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(810.0), "13:30");
        assert_eq!(format_time(1439.0), "23:59");
        assert_eq!(format_time(725.7), "12:05");
    }

    #[test]
    fn test_format_clamps_out_of_range() {
        assert_eq!(format_time(-5.0), "00:00");
        assert_eq!(format_time(1500.0), "23:00");
        assert_eq!(format_time(100_000.0), "23:40");
    }

    #[test]
    fn test_twelve_hour_input_canonicalizes() {
        let minutes = parse_time("1:30pm");
        assert_eq!(format_time(minutes as f64), "13:30");
    }

    #[test]
    fn test_wrap_minute_of_day() {
        assert_eq!(wrap_minute_of_day(0), 0);
        assert_eq!(wrap_minute_of_day(1440), 0);
        assert_eq!(wrap_minute_of_day(1500), 60);
        assert_eq!(wrap_minute_of_day(-30), 1410);
    }
}
