//! Per-character ability state machines
//!
//! Three shapes of ability live here: passive modifiers (constants read by
//! the integrator, collision system and score keeper), the manually
//! triggered invisibility cycle, and the composite shield/dilation/revive
//! bundle. All timers are plain countdown fields ticked inside the main
//! step with raw (undilated) dt; nothing runs once the round is over.

use super::state::{
    Ability, ActiveEffect, DilationPhase, GodFlightPhase, InvisibilityPhase, PlayerState,
    PowerUpKind, WorldState,
};
use crate::consts::*;

/// Ability- and effect-derived constants consumed by the other systems,
/// recomputed once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modifiers {
    /// Multiplier on profile gravity
    pub gravity_scale: f32,
    /// Multiplier on the jump impulse
    pub jump_scale: f32,
    /// Player hitbox side length
    pub hitbox: f32,
    /// Multiplier on the scroll speed
    pub scroll_scale: f32,
    /// Multiplier on the physics dt (time dilation)
    pub dt_scale: f32,
    /// Bonus-points scoring rule active
    pub bonus_points: bool,
}

/// Resolve the current tick's modifiers from ability + active power-up.
pub fn modifiers(player: &PlayerState, effect: Option<&ActiveEffect>) -> Modifiers {
    let mut m = Modifiers {
        gravity_scale: 1.0,
        jump_scale: 1.0,
        hitbox: PLAYER_HITBOX,
        scroll_scale: 1.0,
        dt_scale: 1.0,
        bonus_points: false,
    };

    match player.ability {
        Ability::Normal | Ability::ExtraLives | Ability::Invisibility(_) => {}
        Ability::SlowGravity => m.gravity_scale = SLOW_GRAVITY_SCALE,
        Ability::SmallHitbox => m.hitbox = SMALL_HITBOX,
        Ability::FastFlap => m.jump_scale = FAST_FLAP_SCALE,
        Ability::BonusPoints => m.bonus_points = true,
        Ability::ShieldTimeRevive(composite) => {
            if matches!(composite.dilation, DilationPhase::Active { .. }) {
                m.scroll_scale = DILATION_SCROLL_SCALE;
                m.dt_scale = DILATION_DT_SCALE;
            }
        }
        Ability::GodFlight(_) => {}
    }

    match effect.map(|e| e.kind) {
        Some(PowerUpKind::Speed) => m.scroll_scale *= POWERUP_SPEED_SCALE,
        Some(PowerUpKind::Gravity) => m.gravity_scale *= POWERUP_GRAVITY_SCALE,
        Some(PowerUpKind::Shield) | None => {}
    }

    m
}

/// True if lethal contact must be ignored this tick: post-hit flicker or
/// revive window, manual invisibility, god-flight, or a shield power-up.
pub fn is_immune(player: &PlayerState, effect: Option<&ActiveEffect>) -> bool {
    if player.immunity_remaining > 0.0 {
        return true;
    }
    match player.ability {
        Ability::Invisibility(InvisibilityPhase::Active { .. }) => return true,
        Ability::GodFlight(GodFlightPhase::Active { .. }) => return true,
        _ => {}
    }
    matches!(
        effect,
        Some(ActiveEffect {
            kind: PowerUpKind::Shield,
            ..
        })
    )
}

/// Advance every timed ability state by raw dt and apply a manual
/// activation request, if any.
pub fn tick_abilities(world: &mut WorldState, dt: f32, manual_requested: bool) {
    let player = &mut world.player;

    player.immunity_remaining = (player.immunity_remaining - dt).max(0.0);
    player.since_last_jump = (player.since_last_jump + dt).min(JUMP_DEBOUNCE_SECS);

    match &mut player.ability {
        Ability::Invisibility(phase) => {
            *phase = match *phase {
                InvisibilityPhase::Ready if manual_requested => {
                    log::debug!("invisibility activated");
                    InvisibilityPhase::Active {
                        remaining: INVISIBILITY_DURATION,
                    }
                }
                InvisibilityPhase::Ready => InvisibilityPhase::Ready,
                InvisibilityPhase::Active { remaining } => {
                    let remaining = remaining - dt;
                    if remaining <= 0.0 {
                        InvisibilityPhase::CoolingDown {
                            remaining: INVISIBILITY_COOLDOWN,
                        }
                    } else {
                        InvisibilityPhase::Active { remaining }
                    }
                }
                InvisibilityPhase::CoolingDown { remaining } => {
                    let remaining = remaining - dt;
                    if remaining <= 0.0 {
                        InvisibilityPhase::Ready
                    } else {
                        InvisibilityPhase::CoolingDown { remaining }
                    }
                }
            };
        }

        Ability::ShieldTimeRevive(composite) => {
            // The dilation pulse cycles autonomously; no external trigger.
            composite.dilation = match composite.dilation {
                DilationPhase::Ready => {
                    log::debug!("time dilation pulse");
                    DilationPhase::Active {
                        remaining: DILATION_DURATION,
                    }
                }
                DilationPhase::Active { remaining } => {
                    let remaining = remaining - dt;
                    if remaining <= 0.0 {
                        DilationPhase::CoolingDown {
                            remaining: DILATION_INTERVAL,
                        }
                    } else {
                        DilationPhase::Active { remaining }
                    }
                }
                DilationPhase::CoolingDown { remaining } => {
                    let remaining = remaining - dt;
                    if remaining <= 0.0 {
                        DilationPhase::Ready
                    } else {
                        DilationPhase::CoolingDown { remaining }
                    }
                }
            };
        }

        Ability::GodFlight(phase) => {
            *phase = match *phase {
                GodFlightPhase::Ready if manual_requested => {
                    log::debug!("god-flight activated");
                    GodFlightPhase::Active {
                        remaining: GOD_FLIGHT_DURATION,
                    }
                }
                GodFlightPhase::Ready => GodFlightPhase::Ready,
                GodFlightPhase::Active { remaining } => {
                    let remaining = remaining - dt;
                    if remaining <= 0.0 {
                        GodFlightPhase::Used
                    } else {
                        GodFlightPhase::Active { remaining }
                    }
                }
                GodFlightPhase::Used => GodFlightPhase::Used,
            };
        }

        _ => {}
    }

    // Power-up effects run on the same raw clock
    if let Some(effect) = &mut world.active_effect {
        effect.remaining -= dt;
        if effect.remaining <= 0.0 {
            log::debug!("power-up effect expired: {:?}", effect.kind);
            world.active_effect = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::AbilityKind;
    use crate::tuning::DifficultyProfile;

    fn world(kind: AbilityKind) -> WorldState {
        WorldState::new(1, DifficultyProfile::medium(), kind)
    }

    #[test]
    fn invisibility_cycles_ready_active_cooldown_ready() {
        let mut w = world(AbilityKind::Invisibility);
        tick_abilities(&mut w, 0.01, true);
        assert!(matches!(
            w.player.ability,
            Ability::Invisibility(InvisibilityPhase::Active { .. })
        ));
        assert!(is_immune(&w.player, None));

        // Run out the active window
        for _ in 0..400 {
            tick_abilities(&mut w, 0.01, false);
        }
        assert!(matches!(
            w.player.ability,
            Ability::Invisibility(InvisibilityPhase::CoolingDown { .. })
        ));
        assert!(!is_immune(&w.player, None));

        // Activation request during cooldown is rejected
        tick_abilities(&mut w, 0.01, true);
        assert!(matches!(
            w.player.ability,
            Ability::Invisibility(InvisibilityPhase::CoolingDown { .. })
        ));

        for _ in 0..1100 {
            tick_abilities(&mut w, 0.01, false);
        }
        assert!(matches!(
            w.player.ability,
            Ability::Invisibility(InvisibilityPhase::Ready)
        ));
    }

    #[test]
    fn dilation_cycles_without_external_trigger() {
        let mut w = world(AbilityKind::ShieldTimeRevive);
        tick_abilities(&mut w, 0.01, false);
        let Ability::ShieldTimeRevive(c) = w.player.ability else {
            panic!("wrong ability");
        };
        assert!(matches!(c.dilation, DilationPhase::Active { .. }));

        let m = modifiers(&w.player, None);
        assert_eq!(m.scroll_scale, DILATION_SCROLL_SCALE);
        assert_eq!(m.dt_scale, DILATION_DT_SCALE);

        // Active 3 s, then a 15 s cooldown, then active again
        for _ in 0..320 {
            tick_abilities(&mut w, 0.01, false);
        }
        let Ability::ShieldTimeRevive(c) = w.player.ability else {
            panic!("wrong ability");
        };
        assert!(matches!(c.dilation, DilationPhase::CoolingDown { .. }));

        for _ in 0..1600 {
            tick_abilities(&mut w, 0.01, false);
        }
        let Ability::ShieldTimeRevive(c) = w.player.ability else {
            panic!("wrong ability");
        };
        assert!(matches!(c.dilation, DilationPhase::Active { .. }));
    }

    #[test]
    fn god_flight_is_single_use() {
        let mut w = world(AbilityKind::GodFlight);
        tick_abilities(&mut w, 0.01, true);
        assert!(is_immune(&w.player, None));

        for _ in 0..600 {
            tick_abilities(&mut w, 0.01, false);
        }
        assert!(matches!(
            w.player.ability,
            Ability::GodFlight(GodFlightPhase::Used)
        ));
        // Re-activation after use is rejected
        tick_abilities(&mut w, 0.01, true);
        assert!(matches!(
            w.player.ability,
            Ability::GodFlight(GodFlightPhase::Used)
        ));
        assert!(!is_immune(&w.player, None));
    }

    #[test]
    fn passive_modifiers_alter_constants() {
        let slow = world(AbilityKind::SlowGravity);
        assert_eq!(modifiers(&slow.player, None).gravity_scale, SLOW_GRAVITY_SCALE);

        let small = world(AbilityKind::SmallHitbox);
        assert_eq!(modifiers(&small.player, None).hitbox, SMALL_HITBOX);

        let fast = world(AbilityKind::FastFlap);
        assert_eq!(modifiers(&fast.player, None).jump_scale, FAST_FLAP_SCALE);

        let bonus = world(AbilityKind::BonusPoints);
        assert!(modifiers(&bonus.player, None).bonus_points);
    }

    #[test]
    fn power_up_effects_stack_onto_ability_scales() {
        let w = world(AbilityKind::SlowGravity);
        let effect = ActiveEffect {
            kind: PowerUpKind::Gravity,
            remaining: 1.0,
        };
        let m = modifiers(&w.player, Some(&effect));
        assert!((m.gravity_scale - SLOW_GRAVITY_SCALE * POWERUP_GRAVITY_SCALE).abs() < 1e-6);

        let shield = ActiveEffect {
            kind: PowerUpKind::Shield,
            remaining: 1.0,
        };
        assert!(is_immune(&w.player, Some(&shield)));
    }

    #[test]
    fn effect_expires_on_raw_clock() {
        let mut w = world(AbilityKind::Normal);
        w.active_effect = Some(ActiveEffect {
            kind: PowerUpKind::Speed,
            remaining: 0.05,
        });
        tick_abilities(&mut w, 0.03, false);
        assert!(w.active_effect.is_some());
        tick_abilities(&mut w, 0.03, false);
        assert!(w.active_effect.is_none());
    }
}
