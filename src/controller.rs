//! Schedule editor and playback controller.
//!
//! The controller is the stateful layer over the pure resolver and curve. It
//! owns only transient state: the active drag, the playback session and the
//! preview rate limiter. The schedule itself always lives with the
//! [`ScheduleOwner`]; every edit reads the owner's current entries, computes a
//! replacement and hands it straight back through `on_update`.
//!
//! ## Preview notifications
//!
//! Drag moves and playback frames both report brightness to the same
//! [`PreviewSink`] through one leading-edge [`Throttle`], so whichever source
//! calls last inside a window is simply dropped. `on_preview_start` and
//! `on_preview_end` bracket each playback session: end is sent exactly once
//! per start, whether the session finished, was cancelled or the controller
//! was dropped.

use std::time::Duration;

use crate::constants::PREVIEW_THROTTLE_MS;
use crate::curve::CircularCurve;
use crate::editor::{self, DragSession, PointerHost, clamp_edit_brightness, clamp_edit_minute};
use crate::oracle::TimeOracle;
use crate::playback::{CancellationToken, FrameOutcome, Playback};
use crate::schedule::{OracleQuery, ResolvedPoint, ScheduleEntry, resolve};
use crate::throttle::Throttle;

/// Owner of the authoritative entry list.
#[cfg_attr(test, mockall::automock)]
pub trait ScheduleOwner {
    /// Current entries.
    fn entries(&self) -> Vec<ScheduleEntry>;

    /// Replace the entries after an edit.
    fn on_update(&mut self, entries: Vec<ScheduleEntry>);
}

/// Consumer of live brightness previews.
#[cfg_attr(test, mockall::automock)]
pub trait PreviewSink {
    fn on_preview_brightness(&mut self, value: f64);
    fn on_preview_start(&mut self);
    fn on_preview_end(&mut self);
}

struct OracleBinding {
    oracle: Box<dyn TimeOracle>,
    latitude: f64,
    longitude: f64,
}

pub struct ScheduleController {
    owner: Box<dyn ScheduleOwner>,
    preview: Option<Box<dyn PreviewSink>>,
    pointer: Option<Box<dyn PointerHost>>,
    oracle: Option<OracleBinding>,
    throttle: Throttle,
    drag: Option<DragSession>,
    playback: Playback,
    preview_started: bool,
    debug_enabled: bool,
}

impl ScheduleController {
    pub fn new(owner: Box<dyn ScheduleOwner>) -> Self {
        Self {
            owner,
            preview: None,
            pointer: None,
            oracle: None,
            throttle: Throttle::new(Duration::from_millis(PREVIEW_THROTTLE_MS)),
            drag: None,
            playback: Playback::new(),
            preview_started: false,
            debug_enabled: false,
        }
    }

    pub fn with_preview(mut self, sink: Box<dyn PreviewSink>) -> Self {
        self.preview = Some(sink);
        self
    }

    pub fn with_pointer(mut self, host: Box<dyn PointerHost>) -> Self {
        self.pointer = Some(host);
        self
    }

    /// Resolve oracle-linked entries against `oracle` at this position.
    pub fn with_oracle(
        mut self,
        oracle: Box<dyn TimeOracle>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        self.oracle = Some(OracleBinding {
            oracle,
            latitude,
            longitude,
        });
        self
    }

    pub fn with_debug(mut self, debug_enabled: bool) -> Self {
        self.debug_enabled = debug_enabled;
        self
    }

    // # Evaluation

    pub fn entries(&self) -> Vec<ScheduleEntry> {
        self.owner.entries()
    }

    /// Resolve the owner's current entries. Fresh on every call.
    pub fn points(&self) -> Vec<ResolvedPoint> {
        let query = self
            .oracle
            .as_ref()
            .map(|b| OracleQuery::new(b.oracle.as_ref(), b.latitude, b.longitude));
        resolve(&self.owner.entries(), query)
    }

    pub fn curve(&self) -> CircularCurve {
        CircularCurve::build(&self.points())
    }

    pub fn brightness_at(&self, minute: f64) -> f64 {
        self.curve().sample(crate::curve::clamp_minute(minute))
    }

    // # Editing

    pub fn move_point(&mut self, source_index: usize, minute: f64, brightness: f64) {
        let updated = editor::move_point(&self.owner.entries(), source_index, minute, brightness);
        if self.debug_enabled {
            log_debug!(
                "Moved entry {} to {:.0} min at {:.0}%",
                source_index,
                clamp_edit_minute(minute),
                clamp_edit_brightness(brightness)
            );
        }
        self.owner.on_update(updated);
    }

    pub fn add_point(&mut self, minute: f64, brightness: f64) {
        let updated = editor::add_point(&self.owner.entries(), minute, brightness);
        if self.debug_enabled {
            log_debug!("Added entry #{}", updated.len() - 1);
        }
        self.owner.on_update(updated);
    }

    pub fn delete_point(&mut self, source_index: usize) {
        let updated = editor::delete_point(&self.owner.entries(), source_index);
        if self.debug_enabled {
            log_debug!(
                "Deleted entry {}, {} remaining",
                source_index,
                updated.len()
            );
        }
        self.owner.on_update(updated);
    }

    // # Dragging

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn dragging_index(&self) -> Option<usize> {
        self.drag.as_ref().map(DragSession::source_index)
    }

    /// Start dragging an entry.
    ///
    /// Returns `false`, registering nothing, if a drag is already active or
    /// no pointer host is attached.
    pub fn begin_drag(&mut self, source_index: usize) -> bool {
        if self.drag.is_some() {
            log_warning!("Ignoring drag start while another drag is active");
            return false;
        }
        let Some(host) = self.pointer.as_deref_mut() else {
            return false;
        };
        self.drag = Some(DragSession::begin(host, source_index));
        true
    }

    /// Pointer moved during a drag: move the entry and preview its brightness.
    pub fn drag_to(&mut self, now: Duration, minute: f64, brightness: f64) {
        let Some(source_index) = self.dragging_index() else {
            return;
        };
        self.move_point(source_index, minute, brightness);
        self.send_preview(now, clamp_edit_brightness(brightness));
    }

    /// Pointer released. Returns `false` if no drag was active.
    pub fn end_drag(&mut self) -> bool {
        let Some(session) = self.drag.take() else {
            return false;
        };
        if let Some(host) = self.pointer.as_deref_mut() {
            session.release(host);
        }
        true
    }

    // # Playback

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn virtual_minute(&self) -> f64 {
        self.playback.virtual_minute()
    }

    /// Cancellation token of the current playback session.
    pub fn playback_token(&self) -> CancellationToken {
        self.playback.token()
    }

    /// Start a playback session at `now`. Returns `false` if one is running.
    pub fn start_playback(&mut self, now: Duration) -> bool {
        if !self.playback.start(now) {
            return false;
        }
        self.preview_started = true;
        if let Some(sink) = self.preview.as_deref_mut() {
            sink.on_preview_start();
        }
        if self.debug_enabled {
            log_debug!("Preview playback started");
        }
        true
    }

    /// Advance playback to `now`.
    pub fn frame(&mut self, now: Duration) -> FrameOutcome {
        if !self.playback.is_playing() {
            return FrameOutcome::Idle;
        }

        let curve = self.curve();
        let outcome = self.playback.frame(now, &curve);
        match outcome {
            FrameOutcome::Advanced { brightness, .. } => self.send_preview(now, brightness),
            FrameOutcome::Finished | FrameOutcome::Cancelled => self.finish_preview(),
            FrameOutcome::Idle => {}
        }
        outcome
    }

    /// Stop playback. A no-op when nothing is playing.
    pub fn stop_playback(&mut self) -> bool {
        if !self.playback.stop() {
            return false;
        }
        self.finish_preview();
        true
    }

    /// Release every gesture and session resource.
    pub fn teardown(&mut self) {
        self.end_drag();
        self.stop_playback();
    }

    fn send_preview(&mut self, now: Duration, brightness: f64) {
        let Some(sink) = self.preview.as_deref_mut() else {
            return;
        };
        self.throttle
            .call(now, brightness, |value| sink.on_preview_brightness(value));
    }

    fn finish_preview(&mut self) {
        if !std::mem::take(&mut self.preview_started) {
            return;
        }
        if let Some(sink) = self.preview.as_deref_mut() {
            sink.on_preview_end();
        }
        if self.debug_enabled {
            log_debug!("Preview playback ended");
        }
    }
}

impl Drop for ScheduleController {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests;
