//! Wall clock refresh for "current time" indicators.
//!
//! [`ClockRefresh`] runs a background thread that wakes on a fixed interval,
//! reads the time source and reports the minute of day. It never touches the
//! schedule. The guard returned by [`ClockRefresh::spawn`] stops and joins the
//! thread on drop so no timer outlives its owner.

use chrono::{DateTime, Local, Timelike};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Minute of day (`0..1440`) including the fractional seconds part.
pub fn minute_of_day(time: DateTime<Local>) -> f64 {
    time.hour() as f64 * 60.0 + time.minute() as f64 + time.second() as f64 / 60.0
}

/// Current minute of day from the global time source.
pub fn current_minute() -> f64 {
    minute_of_day(crate::time_source::now())
}

// How often the sleeping thread checks for shutdown
const SHUTDOWN_POLL: Duration = Duration::from_millis(50);

/// Running refresh ticker. Dropping it cancels the timer.
pub struct ClockRefresh {
    shutdown: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ClockRefresh {
    /// Call `on_tick` with the current minute immediately and then every
    /// `interval` until the guard is dropped or [`ClockRefresh::cancel`] runs.
    pub fn spawn<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(f64) + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let thread_shutdown = Arc::clone(&shutdown);

        let handle = thread::spawn(move || {
            while !thread_shutdown.load(Ordering::SeqCst) {
                on_tick(current_minute());

                let deadline = Instant::now() + interval;
                while Instant::now() < deadline {
                    if thread_shutdown.load(Ordering::SeqCst) {
                        return;
                    }
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    thread::sleep(remaining.min(SHUTDOWN_POLL));
                }
            }
        });

        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    /// Stop ticking and wait for the thread. Safe to call more than once.
    pub fn cancel(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for ClockRefresh {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[test]
    fn test_minute_of_day() {
        let t = Local.with_ymd_and_hms(2024, 3, 10, 13, 30, 30).single().unwrap();
        assert_eq!(minute_of_day(t), 810.5);

        let midnight = Local.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).single().unwrap();
        assert_eq!(minute_of_day(midnight), 0.0);
    }

    #[test]
    fn test_refresh_ticks_and_stops_on_drop() {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&ticks);

        let refresh = ClockRefresh::spawn(Duration::from_millis(20), move |minute| {
            sink.lock().unwrap().push(minute);
        });
        thread::sleep(Duration::from_millis(90));
        drop(refresh);

        let count = ticks.lock().unwrap().len();
        assert!(count >= 2, "expected several ticks, got {count}");
        thread::sleep(Duration::from_millis(60));
        assert_eq!(ticks.lock().unwrap().len(), count);
        assert!(
            ticks
                .lock()
                .unwrap()
                .iter()
                .all(|m| (0.0..1440.0).contains(m))
        );
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut refresh = ClockRefresh::spawn(Duration::from_secs(3600), |_| {});
        assert!(refresh.is_running());
        refresh.cancel();
        refresh.cancel();
        assert!(!refresh.is_running());
    }
}
