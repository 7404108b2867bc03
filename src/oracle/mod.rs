//! Symbolic time oracles for sun-linked schedule entries.
//!
//! An oracle maps names such as `"sunrise"` to clock-time text for a position
//! on Earth, evaluated for "now". The resolver only sees the [`TimeOracle`]
//! trait, so the schedule engine never performs astronomical calculations
//! itself.
//!
//! ## Implementations
//!
//! - [`SolarOracle`]: sunrise, sunset and solar noon computed with the
//!   `sunrise` crate for the date of the active time source.
//! - [`StaticOracle`]: a fixed table of times, used when the configuration
//!   lists its own `[sun_times]` instead of coordinates.

pub mod solar;

use std::collections::HashMap;

pub use solar::SolarOracle;

/// Oracle answer: symbolic key to clock-time text.
pub type OracleTimes = HashMap<String, String>;

/// Source of symbolic clock times.
///
/// A missing key is not an error; the resolver falls back to the entry's own
/// time.
#[cfg_attr(test, mockall::automock)]
pub trait TimeOracle {
    fn lookup(&self, latitude: f64, longitude: f64) -> OracleTimes;
}

/// Oracle answering from a fixed table regardless of position.
#[derive(Debug, Clone, Default)]
pub struct StaticOracle {
    times: OracleTimes,
}

impl StaticOracle {
    pub fn new(times: OracleTimes) -> Self {
        Self { times }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            times: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl TimeOracle for StaticOracle {
    fn lookup(&self, _latitude: f64, _longitude: f64) -> OracleTimes {
        self.times.clone()
    }
}
