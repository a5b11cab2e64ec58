//! Deterministic game simulation
//!
//! The whole round lives in a [`WorldState`] advanced by [`step`]; given the
//! same seed, difficulty profile, ability and input sequence, two runs are
//! bit-identical. The host loop feeds timestamps through [`FrameClock`],
//! passes the resulting dt and a [`StepInput`] to `step`, and reacts to the
//! returned [`GameEvent`]s.

pub mod ability;
pub mod clock;
pub mod collision;
pub mod physics;
pub mod smoothing;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{FrameClock, FrameSample};
pub use state::{
    Ability, AbilityKind, ActiveEffect, Coin, GameEvent, Obstacle, PlayerState, PowerUp,
    PowerUpKind, RoundPhase, WorldState,
};
pub use tick::{StepInput, step};
