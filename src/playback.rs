//! Fast-forward playback of the brightness curve.
//!
//! Playback runs a virtual clock through one day in five real seconds. The
//! host polls [`Playback::frame`] with a monotonic timestamp; each frame
//! advances the clock by the elapsed real time and samples the curve. Reaching
//! minute 1440 stops playback instead of wrapping back to midnight.
//!
//! Every session gets its own [`CancellationToken`]. Cancelling it (from a
//! signal handler, another thread or the host itself) stops the session before
//! the next frame body runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::constants::{MINUTES_PER_DAY, PLAYBACK_CYCLE_MS};
use crate::curve::{CircularCurve, clamp_minute};

/// Shared cancel flag for one playback session.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// The underlying flag, for APIs such as `signal_hook::flag::register`
    /// that set an `AtomicBool` directly.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing {
        virtual_minute: f64,
        last_timestamp: Duration,
    },
}

/// What a single frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Clock advanced; `brightness` is the curve value at `virtual_minute`.
    Advanced { virtual_minute: f64, brightness: f64 },
    /// The clock reached the end of the day and playback stopped.
    Finished,
    /// The session's token was cancelled and playback stopped.
    Cancelled,
    /// Nothing is playing.
    Idle,
}

/// Simulated minutes per real millisecond.
pub fn minutes_per_ms() -> f64 {
    MINUTES_PER_DAY as f64 / PLAYBACK_CYCLE_MS
}

#[derive(Debug, Default)]
pub struct Playback {
    state: PlaybackState,
    token: CancellationToken,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    /// Current virtual minute; 0 whenever stopped.
    pub fn virtual_minute(&self) -> f64 {
        match self.state {
            PlaybackState::Playing { virtual_minute, .. } => virtual_minute,
            PlaybackState::Stopped => 0.0,
        }
    }

    /// Token of the current (or most recent) session.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Begin a session at `now`. Returns `false` if one is already running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.is_playing() {
            return false;
        }
        self.token = CancellationToken::new();
        self.state = PlaybackState::Playing {
            virtual_minute: 0.0,
            last_timestamp: now,
        };
        true
    }

    /// Stop the session. Returns `true` if one was running.
    pub fn stop(&mut self) -> bool {
        let was_playing = self.is_playing();
        self.state = PlaybackState::Stopped;
        was_playing
    }

    /// Advance one frame to `now` and sample `curve`.
    pub fn frame(&mut self, now: Duration, curve: &CircularCurve) -> FrameOutcome {
        let PlaybackState::Playing {
            virtual_minute,
            last_timestamp,
        } = self.state
        else {
            return FrameOutcome::Idle;
        };

        if self.token.is_cancelled() {
            self.state = PlaybackState::Stopped;
            return FrameOutcome::Cancelled;
        }

        let elapsed_ms = now.saturating_sub(last_timestamp).as_secs_f64() * 1000.0;
        let virtual_minute = virtual_minute + elapsed_ms * minutes_per_ms();

        if virtual_minute >= MINUTES_PER_DAY as f64 {
            self.state = PlaybackState::Stopped;
            return FrameOutcome::Finished;
        }

        self.state = PlaybackState::Playing {
            virtual_minute,
            last_timestamp: now,
        };

        FrameOutcome::Advanced {
            virtual_minute,
            brightness: curve.sample(clamp_minute(virtual_minute)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{ScheduleEntry, resolve};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn curve() -> CircularCurve {
        let entries = vec![
            ScheduleEntry::fixed("08:00", 20.0),
            ScheduleEntry::fixed("20:00", 90.0),
        ];
        CircularCurve::build(&resolve(&entries, None))
    }

    #[test]
    fn test_frame_advances_at_fixed_ratio() {
        let mut playback = Playback::new();
        assert!(playback.start(ms(10_000)));

        // 2500 ms is half the cycle
        match playback.frame(ms(12_500), &curve()) {
            FrameOutcome::Advanced { virtual_minute, .. } => {
                assert!((virtual_minute - 720.0).abs() < 1e-9)
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!((playback.virtual_minute() - 720.0).abs() < 1e-9);
    }

    #[test]
    fn test_frame_samples_curve() {
        let curve = curve();
        let mut playback = Playback::new();
        playback.start(ms(0));

        // 08:00 is a third of the day
        let outcome = playback.frame(Duration::from_secs_f64(5.0 / 3.0), &curve);
        let FrameOutcome::Advanced { brightness, .. } = outcome else {
            panic!("expected advance");
        };
        assert!((brightness - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_stops_at_end_of_day_without_wrapping() {
        let curve = curve();
        let mut playback = Playback::new();
        playback.start(ms(0));

        let mut t = 0;
        let mut outcome = FrameOutcome::Idle;
        while t < 6000 {
            t += 16;
            outcome = playback.frame(ms(t), &curve);
            if outcome == FrameOutcome::Finished {
                break;
            }
        }

        assert_eq!(outcome, FrameOutcome::Finished);
        assert!(t >= 5000 && t < 5016);
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(playback.virtual_minute(), 0.0);
        assert_eq!(playback.frame(ms(t + 16), &curve), FrameOutcome::Idle);
    }

    #[test]
    fn test_cancel_token_stops_before_next_frame() {
        let curve = curve();
        let mut playback = Playback::new();
        playback.start(ms(0));
        playback.frame(ms(100), &curve);

        playback.token().cancel();
        assert_eq!(playback.frame(ms(116), &curve), FrameOutcome::Cancelled);
        assert!(!playback.is_playing());
        assert_eq!(playback.frame(ms(132), &curve), FrameOutcome::Idle);
    }

    #[test]
    fn test_restart_gets_fresh_token() {
        let mut playback = Playback::new();
        playback.start(ms(0));
        let old = playback.token();
        old.cancel();
        assert_eq!(playback.frame(ms(5), &curve()), FrameOutcome::Cancelled);

        assert!(playback.start(ms(10)));
        assert!(!playback.token().is_cancelled());
        assert!(matches!(
            playback.frame(ms(20), &curve()),
            FrameOutcome::Advanced { .. }
        ));
    }

    #[test]
    fn test_start_while_playing_is_rejected() {
        let mut playback = Playback::new();
        assert!(playback.start(ms(0)));
        assert!(!playback.start(ms(50)));
        assert!(playback.stop());
        assert!(!playback.stop());
    }
}
