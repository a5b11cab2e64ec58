//! Game state and core simulation types
//!
//! All state that must be persisted for resume/determinism lives here.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::DifficultyProfile;

use super::smoothing::VisualState;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Active gameplay
    Playing,
    /// Round ended (terminal; `step` becomes a no-op)
    Over,
}

/// Character ability selected for a round (exactly one per round)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    Normal,
    /// Starts with three lives instead of one
    ExtraLives,
    /// Manually triggered temporary collision immunity
    Invisibility,
    /// Gravity scaled down
    SlowGravity,
    /// Smaller hitbox
    SmallHitbox,
    /// Stronger jump impulse
    FastFlap,
    /// Bonus points every fifth obstacle
    BonusPoints,
    /// Absorbing shield + periodic time dilation + one-time revive
    ShieldTimeRevive,
    /// Single-use temporary full invulnerability
    GodFlight,
}

/// Manual invisibility cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InvisibilityPhase {
    Ready,
    Active { remaining: f32 },
    CoolingDown { remaining: f32 },
}

/// Autonomous time-dilation cycle of the composite ability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DilationPhase {
    Ready,
    Active { remaining: f32 },
    CoolingDown { remaining: f32 },
}

/// One-way revive state of the composite ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviveState {
    Available,
    Used,
}

/// Composite ability: three independent sub-machines, one character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeState {
    /// Absorbing shield charges (0 or 1; never increases mid-round)
    pub shield_charges: u8,
    pub dilation: DilationPhase,
    pub revive: ReviveState,
}

impl Default for CompositeState {
    fn default() -> Self {
        Self {
            shield_charges: 1,
            dilation: DilationPhase::Ready,
            revive: ReviveState::Available,
        }
    }
}

/// God-flight: single-use full invulnerability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GodFlightPhase {
    Ready,
    Active { remaining: f32 },
    Used,
}

/// Per-character ability state, tagged by kind.
///
/// Passive modifiers carry no state of their own; they alter constants read
/// by the integrator, collision system and score keeper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Ability {
    Normal,
    ExtraLives,
    Invisibility(InvisibilityPhase),
    SlowGravity,
    SmallHitbox,
    FastFlap,
    BonusPoints,
    ShieldTimeRevive(CompositeState),
    GodFlight(GodFlightPhase),
}

impl Ability {
    pub fn new(kind: AbilityKind) -> Self {
        match kind {
            AbilityKind::Normal => Ability::Normal,
            AbilityKind::ExtraLives => Ability::ExtraLives,
            AbilityKind::Invisibility => Ability::Invisibility(InvisibilityPhase::Ready),
            AbilityKind::SlowGravity => Ability::SlowGravity,
            AbilityKind::SmallHitbox => Ability::SmallHitbox,
            AbilityKind::FastFlap => Ability::FastFlap,
            AbilityKind::BonusPoints => Ability::BonusPoints,
            AbilityKind::ShieldTimeRevive => Ability::ShieldTimeRevive(CompositeState::default()),
            AbilityKind::GodFlight => Ability::GodFlight(GodFlightPhase::Ready),
        }
    }

    /// Lives at round start (extra-lives is the only ability that changes it)
    pub fn starting_lives(&self) -> u8 {
        match self {
            Ability::ExtraLives => EXTRA_LIVES,
            _ => 1,
        }
    }
}

/// The player-controlled body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Vertical position (playfield units, grows downward)
    pub y: f32,
    /// Vertical velocity (units/s, positive = falling)
    pub velocity: f32,
    /// Tilt derived from velocity (degrees); cosmetic only
    pub tilt_deg: f32,
    /// Lives remaining this round
    pub lives: u8,
    /// Temporary immunity window (flicker after a hit, revive window)
    pub immunity_remaining: f32,
    /// Character ability sub-state
    pub ability: Ability,
    /// Real time since the last accepted jump, capped at the debounce
    /// interval so the value stays bounded
    pub since_last_jump: f32,
    /// Smoothed presentation signal; never read by physics or collision
    #[serde(skip)]
    pub visual: VisualState,
}

impl PlayerState {
    pub fn new(kind: AbilityKind) -> Self {
        let ability = Ability::new(kind);
        Self {
            y: PLAYER_START_Y,
            velocity: 0.0,
            tilt_deg: 0.0,
            lives: ability.starting_lives(),
            immunity_remaining: 0.0,
            ability,
            since_last_jump: JUMP_DEBOUNCE_SECS,
            visual: VisualState::default(),
        }
    }

    /// Put the player back at the round-start position (after a life loss
    /// or revive). Lives, immunity and ability state are untouched.
    pub fn reset_position(&mut self) {
        self.y = PLAYER_START_Y;
        self.velocity = 0.0;
        self.tilt_deg = 0.0;
    }
}

/// A paired top/bottom obstacle column with a passable gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge x
    pub x: f32,
    /// Vertical gap center
    pub gap_center: f32,
    /// Gap height
    pub gap_height: f32,
    /// Set exactly once when the trailing edge crosses the player
    pub passed: bool,
}

impl Obstacle {
    /// Height of the top barrier, floored so a degenerate gap placement
    /// can never yield a negative extent
    pub fn top_height(&self) -> f32 {
        (self.gap_center - self.gap_height / 2.0).max(OBSTACLE_MIN_EXTENT)
    }

    /// Height of the bottom barrier (rises from the ground band)
    pub fn bottom_height(&self) -> f32 {
        (PLAYFIELD_HEIGHT - (self.gap_center + self.gap_height / 2.0) - GROUND_HEIGHT)
            .max(OBSTACLE_MIN_EXTENT)
    }

    /// Right edge x
    pub fn trailing_edge(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    /// Set exactly once on capture
    pub collected: bool,
    /// Animated scale: 0→1 on spawn, 1→0 after collection, then retired
    pub scale: f32,
    pub target_scale: f32,
    /// Spin phase (degrees), cosmetic
    #[serde(default)]
    pub rotation: f32,
}

/// Power-up kinds (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Slows the scroll speed
    Speed,
    /// Reduces gravity
    Gravity,
    /// Collision immunity while active
    Shield,
}

/// A floating power-up pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub kind: PowerUpKind,
    /// Set exactly once on capture
    pub collected: bool,
    /// Pulse/spin phases, cosmetic
    #[serde(default)]
    pub pulse: f32,
    #[serde(default)]
    pub rotation: f32,
}

/// The single active power-up effect (at most one at a time)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub remaining: f32,
}

/// Events emitted by one `step`, in processing order. The sole channel to
/// the presentation and persistence layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstaclePassed { obstacle_id: u32, score: u32 },
    CoinCollected { coin_id: u32 },
    PowerUpCollected { kind: PowerUpKind },
    ShieldAbsorbed,
    LifeLost { lives_remaining: u8 },
    Revived,
    RoundOver { score: u32, coins: u32 },
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Round seed for reproducibility
    pub seed: u64,
    /// Immutable for the duration of the round
    pub profile: DifficultyProfile,
    pub phase: RoundPhase,
    pub player: PlayerState,
    /// Live entity sets, ordered by ascending id
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    /// Currently running power-up effect, if any
    pub active_effect: Option<ActiveEffect>,
    pub score: u32,
    /// Coins captured this round
    pub coins_collected: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Accumulated simulated time (seconds, unscaled)
    pub elapsed: f32,
    rng: Pcg32,
    next_id: u32,
}

impl WorldState {
    /// Fresh round state: player at mid-playfield, empty entity sets.
    pub fn new(seed: u64, profile: DifficultyProfile, kind: AbilityKind) -> Self {
        use rand::SeedableRng;
        log::info!("round start: seed={seed} ability={kind:?}");
        Self {
            seed,
            profile,
            phase: RoundPhase::Playing,
            player: PlayerState::new(kind),
            obstacles: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            active_effect: None,
            score: 0,
            coins_collected: 0,
            time_ticks: 0,
            elapsed: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID (monotonically increasing; ids are never
    /// reused within a round, so in-flight events cannot dangle)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Player hitbox center (x is fixed for the whole round)
    pub fn player_pos(&self) -> Vec2 {
        Vec2::new(PLAYER_X, self.player.y)
    }
}
