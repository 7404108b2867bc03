//! # Brightcurve Library
//!
//! A 24-hour brightness schedule drawn as a circular curve.
//!
//! This library holds everything the `brightcurve` binary does, so the CLI
//! dispatch in main.rs stays thin and the schedule engine can be tested on
//! its own.
//!
//! ## Architecture
//!
//! - **Schedule engine**: `time_codec` (clock text and minutes), `schedule`
//!   (entries and the point resolver), `curve` (the circular curve) and
//!   `oracle` (symbolic sun times).
//! - **Interaction**: `editor` (pure edits and drag sessions), `throttle`,
//!   `playback` and `controller`, which ties them to a schedule owner and a
//!   preview sink.
//! - **Application**: `config` (TOML settings and the schedule file), `clock`,
//!   `preview` (terminal playback), `args` and `commands`.
//! - **Infrastructure**: `logger`, `time_source` and `constants`.

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod clock;
pub mod commands;
pub mod config;
pub mod constants;
pub mod controller;
pub mod curve;
pub mod editor;
pub mod oracle;
pub mod playback;
pub mod preview;
pub mod schedule;
pub mod throttle;
pub mod time_codec;
pub mod time_source;

pub use controller::{PreviewSink, ScheduleController, ScheduleOwner};
pub use curve::CircularCurve;
pub use schedule::{ResolvedPoint, ScheduleEntry};
