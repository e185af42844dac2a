//! # Gesture Capture
//!
//! Converts a raw stream of timestamped touch points into a normalised,
//! denoised sequence of sampled points with derived per-point features
//! (velocity, direction, curvature), expressed as a pure state machine
//! with explicit event inputs -- debouncing is timing arithmetic, not
//! concurrency.

use crate::config::EngineConfig;
use crate::layout::Point;
use serde::{Deserialize, Serialize};

/// An axis-aligned device-space rectangle the keyboard occupies, used to
/// normalise absolute touch coordinates into `[0,1]^2`.
#[derive(Debug, Clone, Copy)]
pub struct BoundingRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingRect {
    /// Maps an absolute device point into `[0,1]^2`, clamping to the unit
    /// square.
    pub fn normalize(&self, x: f32, y: f32) -> Point {
        let nx = if self.width > 0.0 {
            (x - self.x) / self.width
        } else {
            0.0
        };
        let ny = if self.height > 0.0 {
            (y - self.y) / self.height
        } else {
            0.0
        };
        Point::new(nx.clamp(0.0, 1.0), ny.clamp(0.0, 1.0))
    }
}

/// A single sampled point with features derived once capture ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GesturePoint {
    pub position: Point,
    pub timestamp: f32,
    pub velocity: f32,
    pub direction: f32,
    pub curvature: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Idle,
    Capturing,
}

/// A small state machine capturing one continuous stroke: `begin` clears
/// the buffer and starts capturing, `continue_` debounces and appends
/// samples, `end` appends the final point and computes features.
pub struct GestureCapture {
    state: CaptureState,
    config: EngineConfig,
    points: Vec<Point>,
    timestamps: Vec<f32>,
    last_sample_time: f32,
}

impl GestureCapture {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            state: CaptureState::Idle,
            config,
            points: Vec::new(),
            timestamps: Vec::new(),
            last_sample_time: 0.0,
        }
    }

    /// Starts (or restarts) a capture session from any state.
    pub fn begin(&mut self, point: Point, t: f32) {
        self.points.clear();
        self.timestamps.clear();
        self.points.push(point);
        self.timestamps.push(t);
        self.last_sample_time = t;
        self.state = CaptureState::Capturing;
    }

    /// Accepts a sample if capturing, enough time has elapsed since the
    /// last accepted sample, and it lies far enough from the previous
    /// point; drops it (and any event delivered out of timestamp order)
    /// otherwise.
    pub fn continue_(&mut self, point: Point, t: f32) {
        if self.state != CaptureState::Capturing {
            return;
        }
        if t < self.last_sample_time {
            return;
        }
        let min_interval = 0.8 * self.config.sample_interval;
        if t - self.last_sample_time < min_interval {
            return;
        }
        let last = *self.points.last().expect("capturing implies non-empty buffer");
        if last.distance(&point) < self.config.min_sample_distance {
            return;
        }
        self.points.push(point);
        self.timestamps.push(t);
        self.last_sample_time = t;
    }

    /// Appends the final point unconditionally, computes features, and
    /// transitions back to idle. Returns the captured, feature-annotated
    /// sequence; a fresh session must be started via `begin` before any
    /// further samples are accepted.
    pub fn end(&mut self, point: Point, t: f32) -> Vec<GesturePoint> {
        if self.state == CaptureState::Capturing {
            self.points.push(point);
            self.timestamps.push(t);
        }
        self.state = CaptureState::Idle;
        let result = compute_features(&self.points, &self.timestamps);
        self.points.clear();
        self.timestamps.clear();
        result
    }
}

fn compute_features(points: &[Point], timestamps: &[f32]) -> Vec<GesturePoint> {
    let n = points.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = if i > 0 { i - 1 } else { i };
        let next = if i < n - 1 { i + 1 } else { i };

        let dt = timestamps[next] - timestamps[prev];
        let dx = points[next].x - points[prev].x;
        let dy = points[next].y - points[prev].y;
        let dist = (dx * dx + dy * dy).sqrt();

        let velocity = if dt > 0.0 { dist / dt } else { 0.0 };
        let direction = dy.atan2(dx);

        let curvature = if i == 0 || i == n - 1 {
            0.0
        } else {
            let before = (
                points[i].x - points[prev].x,
                points[i].y - points[prev].y,
            );
            let after = (
                points[next].x - points[i].x,
                points[next].y - points[i].y,
            );
            let angle_before = before.1.atan2(before.0);
            let angle_after = after.1.atan2(after.0);
            let mut delta = angle_after - angle_before;
            while delta > std::f32::consts::PI {
                delta -= 2.0 * std::f32::consts::PI;
            }
            while delta <= -std::f32::consts::PI {
                delta += 2.0 * std::f32::consts::PI;
            }
            if dist > 1e-9 { delta / dist } else { 0.0 }
        };

        out.push(GesturePoint {
            position: points[i],
            timestamp: timestamps[i],
            velocity,
            direction,
            curvature,
        });
    }
    out
}
