//! Leading-edge rate limiter.
//!
//! The first call fires immediately and opens a window of `interval`. Calls
//! that land inside the window are dropped outright, never queued or replayed.
//! The first call after the window closes fires and opens the next one.
//!
//! Time is passed in by the caller as a monotonic offset, so the limiter works
//! the same with `Instant`-derived timestamps, frame clocks or test values.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    window_start: Option<Duration>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            window_start: None,
        }
    }

    /// Whether a call at `now` may fire. Firing opens a new window.
    pub fn try_fire(&mut self, now: Duration) -> bool {
        let open = match self.window_start {
            None => true,
            // A clock that went backwards restarts the window rather than
            // muting the callback indefinitely.
            Some(start) => now < start || now.saturating_sub(start) >= self.interval,
        };
        if open {
            self.window_start = Some(now);
        }
        open
    }

    /// Run `callback` with `value` if the limiter lets the call through.
    pub fn call<T>(&mut self, now: Duration, value: T, callback: impl FnOnce(T)) -> bool {
        let fired = self.try_fire(now);
        if fired {
            callback(value);
        }
        fired
    }
}
