//! Gapwing - a side-scrolling gap-dodging arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, abilities)
//! - `tuning`: Data-driven difficulty profiles
//!
//! Rendering, audio, menus and persistence are external collaborators: they
//! feed `StepInput` in and consume `GameEvent`s out.

pub mod sim;
pub mod tuning;

pub use sim::{FrameClock, GameEvent, StepInput, WorldState, step};
pub use tuning::DifficultyProfile;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (simulation units)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Ground band at the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 64.0;
    /// Lowest flyable position (touching it is lethal)
    pub const FLOOR_Y: f32 = PLAYFIELD_HEIGHT - GROUND_HEIGHT;
    /// Highest flyable position (touching it is lethal)
    pub const CEILING_Y: f32 = 0.0;

    /// Player's fixed horizontal position
    pub const PLAYER_X: f32 = 100.0;
    /// Round-start vertical position
    pub const PLAYER_START_Y: f32 = 300.0;
    /// Player hitbox side length (axis-aligned square)
    pub const PLAYER_HITBOX: f32 = 30.0;
    /// Hitbox side for the small-hitbox modifier
    pub const SMALL_HITBOX: f32 = 20.0;

    /// Obstacle column width
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    /// Passable gap height
    pub const OBSTACLE_GAP_HEIGHT: f32 = 150.0;
    /// Minimum top/bottom extent (degenerate gap placement clamps here)
    pub const OBSTACLE_MIN_EXTENT: f32 = 50.0;
    /// Gap center is drawn uniformly from this mid-playfield range
    pub const GAP_CENTER_MIN: f32 = 100.0;
    pub const GAP_CENTER_MAX: f32 = 400.0;

    /// New entities enter at this x
    pub const SPAWN_X: f32 = PLAYFIELD_WIDTH;
    /// A new obstacle spawns once the rightmost one has scrolled past this x
    pub const OBSTACLE_SPAWN_THRESHOLD_X: f32 = 600.0;
    /// Obstacles are retired once their x crosses this
    pub const OBSTACLE_RETIRE_X: f32 = -100.0;
    /// Coins and power-ups are retired once their x crosses this
    pub const ITEM_RETIRE_X: f32 = -50.0;
    /// Vertical placement range for coins and power-ups
    pub const ITEM_Y_MIN: f32 = 100.0;
    pub const ITEM_Y_MAX: f32 = 500.0;

    /// Per-tick spawn acceptance, expressed per 60 Hz frame
    pub const COIN_SPAWN_RATE: f32 = 0.015;
    pub const POWERUP_SPAWN_RATE: f32 = 0.005;

    /// Scroll speeds are units-per-frame at 60 fps; movement is speed*dt*60
    pub const FRAME_RATE_BASIS: f32 = 60.0;

    /// Only obstacles within this horizontal window of the player are
    /// exact-tested
    pub const BROAD_PHASE_WINDOW: f32 = 150.0;
    /// Capture distance for coins
    pub const COIN_CAPTURE_RADIUS: f32 = 30.0;
    /// Capture distance for power-ups
    pub const POWERUP_CAPTURE_RADIUS: f32 = 35.0;

    /// Minimum real time between accepted jumps (seconds)
    pub const JUMP_DEBOUNCE_SECS: f32 = 0.1;
    /// Immunity window after a non-terminal hit (seconds)
    pub const FLICKER_IMMUNITY_SECS: f32 = 1.0;

    /// Manual invisibility: active duration and cooldown (seconds)
    pub const INVISIBILITY_DURATION: f32 = 3.0;
    pub const INVISIBILITY_COOLDOWN: f32 = 10.0;

    /// Composite ability time dilation: pulse duration and interval (seconds)
    pub const DILATION_DURATION: f32 = 3.0;
    pub const DILATION_INTERVAL: f32 = 15.0;
    /// Scroll speed multiplier while dilation is active
    pub const DILATION_SCROLL_SCALE: f32 = 0.3;
    /// Physics dt multiplier while dilation is active
    pub const DILATION_DT_SCALE: f32 = 0.5;
    /// Full-immunity window granted by the one-time revive (seconds)
    pub const REVIVE_IMMUNITY_SECS: f32 = 5.0;

    /// God-flight active duration (seconds)
    pub const GOD_FLIGHT_DURATION: f32 = 5.0;

    /// Lives granted by the extra-lives ability
    pub const EXTRA_LIVES: u8 = 3;
    /// Gravity multiplier for the slow-gravity modifier
    pub const SLOW_GRAVITY_SCALE: f32 = 0.7;
    /// Jump impulse multiplier for the fast-flap modifier
    pub const FAST_FLAP_SCALE: f32 = 1.2;
    /// Bonus-points modifier: +BONUS_POINTS when a pass lands the score on
    /// a multiple of BONUS_EVERY
    pub const BONUS_EVERY: u32 = 5;
    pub const BONUS_POINTS: u32 = 2;

    /// Power-up effect duration (seconds)
    pub const POWERUP_EFFECT_SECS: f32 = 5.0;
    /// Scroll multiplier for the slow-motion power-up
    pub const POWERUP_SPEED_SCALE: f32 = 0.6;
    /// Gravity multiplier for the low-gravity power-up
    pub const POWERUP_GRAVITY_SCALE: f32 = 0.5;

    /// Largest dt a single tick will integrate (tab-suspend guard)
    pub const MAX_FRAME_DT: f32 = 1.0 / 15.0;
    /// EWMA weight for the diagnostic fps estimate
    pub const FPS_SMOOTHING: f32 = 0.1;

    /// Tilt derived from vertical velocity: clamp(v * factor, min, max) degrees
    pub const TILT_FACTOR: f32 = 0.15;
    pub const TILT_MIN_DEG: f32 = -30.0;
    pub const TILT_MAX_DEG: f32 = 90.0;

    /// Critically damped smoothing times for the rendered position/tilt
    pub const SMOOTH_Y_TIME: f32 = 0.1;
    pub const SMOOTH_TILT_TIME: f32 = 0.15;

    /// Coin scale animation rate (lerp factor per second)
    pub const COIN_SCALE_RATE: f32 = 5.0;
    /// Coin spin (degrees per second), cosmetic
    pub const COIN_SPIN_DEG: f32 = 180.0;
    /// Power-up spin and pulse rates, cosmetic
    pub const POWERUP_SPIN_DEG: f32 = 90.0;
    pub const POWERUP_PULSE_HZ: f32 = 4.0;
}
