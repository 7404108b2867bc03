//! Resolution of raw schedule entries into sorted points on the day.
//!
//! Resolution is a pure function of the entry list and whatever the oracle
//! answers for this call. Nothing is cached between calls, so an oracle-linked
//! point follows the sun from one day to the next without any bookkeeping.

use super::{ResolvedPoint, ScheduleEntry};
use crate::constants::FALLBACK_ENTRY_TIME;
use crate::oracle::{OracleTimes, TimeOracle};
use crate::time_codec::{parse_time, wrap_minute_of_day};

/// An oracle together with the position it should be asked about.
#[derive(Clone, Copy)]
pub struct OracleQuery<'a> {
    pub oracle: &'a dyn TimeOracle,
    pub latitude: f64,
    pub longitude: f64,
}

impl<'a> OracleQuery<'a> {
    pub fn new(oracle: &'a dyn TimeOracle, latitude: f64, longitude: f64) -> Self {
        Self {
            oracle,
            latitude,
            longitude,
        }
    }
}

/// Resolve `entries` into points sorted by minute of day.
///
/// Each entry's time comes from, in order of preference:
/// 1. the oracle answer for its `oracle_key`, when it is oracle-linked,
/// 2. its own `time`,
/// 3. the `"12:00"` fallback.
///
/// The oracle is consulted at most once per call and only when some entry is
/// oracle-linked. Points sharing a minute keep their input order.
pub fn resolve(entries: &[ScheduleEntry], oracle: Option<OracleQuery<'_>>) -> Vec<ResolvedPoint> {
    let oracle_times = match oracle {
        Some(query) if entries.iter().any(|e| e.use_oracle) => {
            query.oracle.lookup(query.latitude, query.longitude)
        }
        _ => OracleTimes::new(),
    };

    let mut points: Vec<ResolvedPoint> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let time_text = chosen_time(entry, &oracle_times);
            ResolvedPoint {
                minute: wrap_minute_of_day(parse_time(time_text)),
                brightness: entry.brightness,
                source_index: index,
                is_oracle_linked: entry.use_oracle,
            }
        })
        .collect();

    // sort_by_key is stable, ties stay in input order
    points.sort_by_key(|p| p.minute);
    points
}

fn chosen_time<'a>(entry: &'a ScheduleEntry, oracle_times: &'a OracleTimes) -> &'a str {
    let from_oracle = if entry.use_oracle {
        entry
            .oracle_key
            .as_ref()
            .and_then(|key| oracle_times.get(key))
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    } else {
        None
    };

    from_oracle
        .or(entry.time.as_deref().filter(|t| !t.is_empty()))
        .unwrap_or(FALLBACK_ENTRY_TIME)
}
