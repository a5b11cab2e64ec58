//! Presentation smoothing
//!
//! Critically damped spring smoothing for the rendered position and tilt.
//! Strictly one-directional: physics writes targets, smoothing chases them,
//! and nothing here ever feeds back into physics, collision or scoring.

use serde::{Deserialize, Serialize};

use crate::consts::{SMOOTH_TILT_TIME, SMOOTH_Y_TIME};

/// Smoothed render-facing signals for the player body
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VisualState {
    pub smooth_y: f32,
    pub smooth_tilt: f32,
    y_velocity: f32,
    tilt_velocity: f32,
}

impl VisualState {
    /// Chase the physics position/tilt with independent spring constants.
    pub fn update(&mut self, target_y: f32, target_tilt: f32, dt: f32) {
        self.smooth_y = smooth_damp(
            self.smooth_y,
            target_y,
            &mut self.y_velocity,
            SMOOTH_Y_TIME,
            dt,
        );
        self.smooth_tilt = smooth_damp(
            self.smooth_tilt,
            target_tilt,
            &mut self.tilt_velocity,
            SMOOTH_TILT_TIME,
            dt,
        );
    }

    /// Snap to the target with no transient (round start, life-loss reset).
    pub fn snap(&mut self, y: f32, tilt: f32) {
        self.smooth_y = y;
        self.smooth_tilt = tilt;
        self.y_velocity = 0.0;
        self.tilt_velocity = 0.0;
    }
}

/// Critically damped spring step: approaches `target` in roughly
/// `smooth_time` seconds without overshooting for any positive dt.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let omega = 2.0 / smooth_time.max(1e-4);
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut out = target + (change + temp) * exp;
    // Clamp past-the-target artifacts from large dt
    if (target > current) == (out > target) {
        out = target;
        *velocity = 0.0;
    }
    out
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}
