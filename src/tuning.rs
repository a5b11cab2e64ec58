//! Data-driven game balance
//!
//! A `DifficultyProfile` is selected before a round and never mutated while
//! the round runs. The named presets mirror the in-game difficulty menu;
//! external tuning can be loaded from JSON.

use serde::{Deserialize, Serialize};

/// Physics and pacing constants for one round.
///
/// Units: positions in playfield units, velocities in units/s, gravity in
/// units/s². Scroll speeds are units-per-frame at the 60 fps basis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Upward velocity set by a jump (units/s)
    pub jump_impulse: f32,
    /// Terminal fall velocity (units/s)
    pub max_fall_speed: f32,
    /// Scroll speed at score 0 (units/frame)
    pub base_scroll_speed: f32,
    /// Scroll speed gained per point of score (units/frame)
    pub scroll_ramp_per_point: f32,
}

impl DifficultyProfile {
    /// Relaxed pacing for new players.
    pub fn easy() -> Self {
        Self {
            gravity: 750.0,
            jump_impulse: 330.0,
            max_fall_speed: 350.0,
            base_scroll_speed: 2.5,
            scroll_ramp_per_point: 0.02,
        }
    }

    /// Default balance.
    pub fn medium() -> Self {
        Self {
            gravity: 900.0,
            jump_impulse: 350.0,
            max_fall_speed: 400.0,
            base_scroll_speed: 3.0,
            scroll_ramp_per_point: 0.03,
        }
    }

    /// Heavier gravity and a steeper speed ramp.
    pub fn hard() -> Self {
        Self {
            gravity: 1100.0,
            jump_impulse: 380.0,
            max_fall_speed: 480.0,
            base_scroll_speed: 3.5,
            scroll_ramp_per_point: 0.05,
        }
    }

    /// Look up a preset by menu name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "easy" => Some(Self::easy()),
            "medium" | "med" => Some(Self::medium()),
            "hard" => Some(Self::hard()),
            _ => None,
        }
    }

    /// Load a profile from externally supplied JSON tuning data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::medium()
    }
}
