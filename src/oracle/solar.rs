//! Sun-position oracle backed by the `sunrise` crate.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use sunrise::{Coordinates, SolarDay, SolarEvent};

use super::{OracleTimes, TimeOracle};
use crate::constants::{ORACLE_KEY_SOLAR_NOON, ORACLE_KEY_SUNRISE, ORACLE_KEY_SUNSET};

/// Solar event times in UTC for one date and position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub solar_noon: DateTime<Utc>,
}

/// Compute sunrise, sunset and solar noon for `date` at the given position.
///
/// Returns `None` for invalid coordinates, and for polar days/nights where the
/// calculation lands on a date that has nothing to do with `date`.
pub fn calculate_solar_times(date: NaiveDate, latitude: f64, longitude: f64) -> Option<SolarTimes> {
    let coord = Coordinates::new(latitude, longitude)?;
    let solar_day = SolarDay::new(coord, date);
    let sunrise = solar_day.event_time(SolarEvent::Sunrise);
    let sunset = solar_day.event_time(SolarEvent::Sunset);

    if !near_date(sunrise, date) || !near_date(sunset, date) || sunset <= sunrise {
        return None;
    }

    Some(SolarTimes {
        sunrise,
        sunset,
        solar_noon: sunrise + (sunset - sunrise) / 2,
    })
}

fn near_date(event: DateTime<Utc>, date: NaiveDate) -> bool {
    let delta = event.date_naive().signed_duration_since(date);
    delta.abs() <= Duration::days(1)
}

/// Oracle answering `sunrise`, `sunset` and `solarNoon` in local clock time.
///
/// The date comes from the global time source, so `--at` shifts the sun
/// along with the clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarOracle;

impl SolarOracle {
    pub fn new() -> Self {
        SolarOracle
    }

    fn times_for(date: NaiveDate, latitude: f64, longitude: f64) -> OracleTimes {
        let mut times = OracleTimes::new();
        let Some(solar) = calculate_solar_times(date, latitude, longitude) else {
            return times;
        };

        for (key, instant) in [
            (ORACLE_KEY_SUNRISE, solar.sunrise),
            (ORACLE_KEY_SUNSET, solar.sunset),
            (ORACLE_KEY_SOLAR_NOON, solar.solar_noon),
        ] {
            let local = instant.with_timezone(&Local);
            times.insert(key.to_string(), local.format("%H:%M").to_string());
        }

        times
    }
}

impl TimeOracle for SolarOracle {
    fn lookup(&self, latitude: f64, longitude: f64) -> OracleTimes {
        let today = crate::time_source::now().date_naive();
        Self::times_for(today, latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test_constants::{TEST_LATITUDE, TEST_LONGITUDE};
    use chrono::Timelike;

    fn midsummer() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
    }

    #[test]
    fn test_new_york_midsummer_times() {
        let solar = calculate_solar_times(midsummer(), TEST_LATITUDE, TEST_LONGITUDE).unwrap();

        // ~05:25 EDT sunrise, ~20:31 EDT sunset
        assert_eq!(solar.sunrise.hour(), 9);
        assert_eq!(solar.sunset.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 22).unwrap());
        assert!(solar.sunset.hour() <= 1);
        assert!((16..=17).contains(&solar.solar_noon.hour()));
    }

    #[test]
    fn test_invalid_coordinates_give_no_times() {
        assert!(calculate_solar_times(midsummer(), 95.0, 0.0).is_none());
        assert!(calculate_solar_times(midsummer(), 0.0, 200.0).is_none());
        assert!(SolarOracle::times_for(midsummer(), 95.0, 0.0).is_empty());
    }

    #[test]
    fn test_oracle_answers_all_keys_as_clock_text() {
        let times = SolarOracle::times_for(midsummer(), TEST_LATITUDE, TEST_LONGITUDE);

        for key in [ORACLE_KEY_SUNRISE, ORACLE_KEY_SUNSET, ORACLE_KEY_SOLAR_NOON] {
            let text = times.get(key).expect("missing oracle key");
            assert_eq!(text.len(), 5);
            assert_eq!(&text[2..3], ":");
        }
    }
}
