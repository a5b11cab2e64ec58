//! Wall-clock frame timing
//!
//! The clock sits between the platform's render-ready signal and the
//! simulation: it turns raw timestamps into a clamped dt and a
//! should-simulate decision. The fps estimate is diagnostics only and is
//! never fed back into physics.

use serde::{Deserialize, Serialize};

use crate::consts::{FPS_SMOOTHING, MAX_FRAME_DT};

/// One frame's timing decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// Clamped delta time in seconds (0.0 when the tick is skipped)
    pub dt: f32,
    /// False for degenerate gaps: first frame, non-finite or non-positive dt
    pub should_simulate: bool,
    /// Exponentially weighted fps estimate
    pub fps: f32,
}

/// Measures wall-clock time between steps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameClock {
    last_time: Option<f64>,
    smoothed_fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current timestamp (seconds); returns the tick decision.
    ///
    /// A huge gap (tab suspend) is clamped to `MAX_FRAME_DT` rather than
    /// integrated, so a single frame can never explode the physics.
    pub fn sample(&mut self, now: f64) -> FrameSample {
        if !now.is_finite() {
            return self.skip();
        }

        let raw = match self.last_time {
            Some(last) => (now - last) as f32,
            None => {
                // First frame establishes the baseline only
                self.last_time = Some(now);
                return self.skip();
            }
        };
        self.last_time = Some(now);

        if !raw.is_finite() || raw <= 0.0 {
            return self.skip();
        }

        let dt = raw.min(MAX_FRAME_DT);
        self.smoothed_fps = if self.smoothed_fps == 0.0 {
            1.0 / raw
        } else {
            self.smoothed_fps + (1.0 / raw - self.smoothed_fps) * FPS_SMOOTHING
        };

        FrameSample {
            dt,
            should_simulate: true,
            fps: self.smoothed_fps,
        }
    }

    fn skip(&self) -> FrameSample {
        FrameSample {
            dt: 0.0,
            should_simulate: false,
            fps: self.smoothed_fps,
        }
    }
}
