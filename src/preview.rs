//! Terminal driver for preview playback.
//!
//! [`run_preview`] polls the controller with real monotonic timestamps about
//! every 16 ms and redraws a progress bar with the simulated clock and the
//! last throttled brightness. SIGINT and SIGTERM set the session's
//! cancellation flag, so an interrupted preview still ends cleanly.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use crate::constants::{MINUTES_PER_DAY, PREVIEW_FRAME_MS};
use crate::controller::{PreviewSink, ScheduleController};
use crate::playback::FrameOutcome;
use crate::time_codec::format_time;

const PROGRESS_BAR_WIDTH: usize = 30;

/// Single-line progress bar redrawn in place with `\r`.
pub struct ProgressBar {
    width: usize,
}

impl ProgressBar {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// The bar text for `progress` in `0.0..=1.0`.
    pub fn render(&self, progress: f64, suffix: Option<&str>) -> String {
        let progress = progress.clamp(0.0, 1.0);
        let filled = ((progress * self.width as f64).round() as usize).min(self.width);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(self.width - filled));
        let percent = (progress * 100.0).round() as u32;
        match suffix {
            Some(suffix) => format!("┃ [{bar}] {percent:>3}% {suffix}"),
            None => format!("┃ [{bar}] {percent:>3}%"),
        }
    }

    pub fn update(&self, progress: f64, suffix: Option<&str>) {
        print!("\r{}\x1b[K", self.render(progress, suffix));
        let _ = std::io::stdout().flush();
    }

    pub fn finish(&self) {
        println!();
    }
}

#[derive(Debug, Default)]
struct PreviewState {
    brightness: Option<f64>,
    started: bool,
    ended: bool,
    notifications: u32,
}

/// Preview sink that records what the controller reports for the terminal.
///
/// Clones share state: one clone goes into the controller, the other stays
/// with the driver for drawing.
#[derive(Debug, Clone, Default)]
pub struct TerminalPreview {
    state: Rc<RefCell<PreviewState>>,
}

impl TerminalPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent throttled brightness.
    pub fn brightness(&self) -> Option<f64> {
        self.state.borrow().brightness
    }

    pub fn notifications(&self) -> u32 {
        self.state.borrow().notifications
    }

    pub fn has_started(&self) -> bool {
        self.state.borrow().started
    }

    pub fn has_ended(&self) -> bool {
        self.state.borrow().ended
    }
}

impl PreviewSink for TerminalPreview {
    fn on_preview_brightness(&mut self, value: f64) {
        let mut state = self.state.borrow_mut();
        state.brightness = Some(value);
        state.notifications += 1;
    }

    fn on_preview_start(&mut self) {
        let mut state = self.state.borrow_mut();
        state.started = true;
        state.ended = false;
    }

    fn on_preview_end(&mut self) {
        self.state.borrow_mut().ended = true;
    }
}

/// How a preview run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewReport {
    /// Reached the end of the day rather than being interrupted.
    pub finished: bool,
    pub frames: u32,
    pub notifications: u32,
}

/// Play the controller's curve back on the terminal until the day ends or a
/// signal arrives.
///
/// `display` must be the sink (or a clone of it) attached to `controller`.
pub fn run_preview(
    controller: &mut ScheduleController,
    display: &TerminalPreview,
) -> Result<PreviewReport> {
    let clock = Instant::now();
    if !controller.start_playback(Duration::ZERO) {
        anyhow::bail!("A preview is already running");
    }

    let flag = controller.playback_token().flag();
    let sigint = signal_hook::flag::register(signal_hook::consts::SIGINT, flag.clone())
        .context("Failed to register SIGINT handler")?;
    let sigterm = signal_hook::flag::register(signal_hook::consts::SIGTERM, flag)
        .context("Failed to register SIGTERM handler")?;

    let progress_bar = ProgressBar::new(PROGRESS_BAR_WIDTH);
    let mut frames = 0;
    let finished = loop {
        thread::sleep(Duration::from_millis(PREVIEW_FRAME_MS));

        match controller.frame(clock.elapsed()) {
            FrameOutcome::Advanced { virtual_minute, .. } => {
                frames += 1;
                let suffix = match display.brightness() {
                    Some(brightness) => {
                        format!("{} {:>5.1}%", format_time(virtual_minute), brightness)
                    }
                    None => format_time(virtual_minute),
                };
                progress_bar.update(virtual_minute / MINUTES_PER_DAY as f64, Some(&suffix));
            }
            FrameOutcome::Finished => {
                progress_bar.update(1.0, Some("24:00"));
                break true;
            }
            FrameOutcome::Cancelled | FrameOutcome::Idle => break false,
        }
    };
    progress_bar.finish();

    signal_hook::low_level::unregister(sigint);
    signal_hook::low_level::unregister(sigterm);

    Ok(PreviewReport {
        finished,
        frames,
        notifications: display.notifications(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_render() {
        let bar = ProgressBar::new(10);
        assert_eq!(bar.render(0.0, None), "┃ [░░░░░░░░░░]   0%");
        assert_eq!(bar.render(0.5, Some("12:00")), "┃ [█████░░░░░]  50% 12:00");
        assert_eq!(bar.render(1.7, None), "┃ [██████████] 100%");
    }

    #[test]
    fn test_terminal_preview_records_notifications() {
        let display = TerminalPreview::new();
        let mut sink = display.clone();

        sink.on_preview_start();
        sink.on_preview_brightness(42.0);
        sink.on_preview_brightness(43.0);
        assert!(display.has_started());
        assert!(!display.has_ended());
        sink.on_preview_end();

        assert_eq!(display.brightness(), Some(43.0));
        assert_eq!(display.notifications(), 2);
        assert!(display.has_ended());
    }
}
