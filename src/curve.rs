//! Closed piecewise-linear brightness curve over one day.
//!
//! The curve is built from resolved points and two synthetic boundary nodes at
//! minute 0 and minute 1440. Both boundary nodes carry the same value, found
//! by interpolating across midnight from the day's last point to the next
//! day's first point, so the curve is continuous where the day wraps.
//!
//! ```text
//! brightness
//!   90 ┤                      ●─╮
//!      ┤                    ╱    ╲
//!   20 ┤─╮    ●───────────╱       ╲─
//!      └─┴────┴───────────┴────────┴── minute
//!        0   480        1200      1440
//!        ^ boundary                ^ same boundary
//! ```

use serde::Serialize;

use crate::constants::{MINUTES_PER_DAY, NEUTRAL_BRIGHTNESS};
use crate::schedule::ResolvedPoint;

/// One node of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveNode {
    pub minute: f64,
    pub brightness: f64,
    /// Synthetic boundary node rather than a schedule point.
    pub boundary: bool,
}

/// The day's brightness curve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircularCurve {
    nodes: Vec<CurveNode>,
}

impl CircularCurve {
    /// Build the curve from points sorted ascending by minute.
    ///
    /// An empty point list gives a degenerate curve that samples as the
    /// neutral default everywhere.
    pub fn build(points: &[ResolvedPoint]) -> Self {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Self::default();
        };

        let day = MINUTES_PER_DAY as f64;
        let last_minute = last.minute as f64;
        let span = (day - last_minute) + first.minute as f64;
        let slope = if span == 0.0 {
            0.0
        } else {
            (first.brightness - last.brightness) / span
        };
        let boundary_value = last.brightness + slope * (day - last_minute);

        let mut nodes = Vec::with_capacity(points.len() + 2);
        nodes.push(CurveNode {
            minute: 0.0,
            brightness: boundary_value,
            boundary: true,
        });
        nodes.extend(points.iter().map(|p| CurveNode {
            minute: p.minute as f64,
            brightness: p.brightness,
            boundary: false,
        }));
        nodes.push(CurveNode {
            minute: day,
            brightness: boundary_value,
            boundary: true,
        });

        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[CurveNode] {
        &self.nodes
    }

    /// Value shared by minute 0 and minute 1440, if the curve has points.
    pub fn boundary_value(&self) -> Option<f64> {
        self.nodes.first().map(|n| n.brightness)
    }

    /// Brightness at `minute`, which callers clamp to `0..1440`.
    pub fn sample(&self, minute: f64) -> f64 {
        for pair in self.nodes.windows(2) {
            let (p1, p2) = (&pair[0], &pair[1]);
            if p1.minute <= minute && minute <= p2.minute {
                if p1.minute == p2.minute {
                    return p1.brightness;
                }
                let ratio = (minute - p1.minute) / (p2.minute - p1.minute);
                return p1.brightness + (p2.brightness - p1.brightness) * ratio;
            }
        }

        self.nodes
            .first()
            .map(|n| n.brightness)
            .unwrap_or(NEUTRAL_BRIGHTNESS)
    }

    /// Evenly spaced `(minute, brightness)` samples from 0 through 1440.
    ///
    /// The last sample is the boundary node itself so a renderer can close the
    /// shape without special-casing midnight.
    pub fn samples(&self, step_minutes: u32) -> Vec<(f64, f64)> {
        let step = step_minutes.max(1);
        let mut out: Vec<(f64, f64)> = (0..MINUTES_PER_DAY)
            .step_by(step as usize)
            .map(|m| (m as f64, self.sample(m as f64)))
            .collect();

        let end = MINUTES_PER_DAY as f64;
        out.push((end, self.boundary_value().unwrap_or(NEUTRAL_BRIGHTNESS)));
        out
    }
}

/// Clamp a minute into the sampled range `0..1440`.
pub fn clamp_minute(minute: f64) -> f64 {
    let latest = MINUTES_PER_DAY as f64 - f64::EPSILON * MINUTES_PER_DAY as f64;
    if minute.is_nan() {
        0.0
    } else {
        minute.clamp(0.0, latest)
    }
}
