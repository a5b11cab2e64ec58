//! Collision detection and resolution
//!
//! Broad phase keeps only obstacles within a fixed horizontal window of the
//! player; everything outside is provably non-overlapping. Exact phase is
//! axis-aligned box overlap against each column's top/bottom rectangles,
//! with the playfield floor and ceiling treated identically to an obstacle
//! overlap. Coins and power-ups capture by Euclidean distance instead.
//!
//! A detected lethal contact walks a single priority ladder, so at most one
//! action fires per contact: immunity, shield absorption, life loss,
//! one-time revive, then the terminal round-over.

use super::ability::{Modifiers, is_immune};
use super::state::{
    Ability, ActiveEffect, GameEvent, GodFlightPhase, Obstacle, PowerUpKind, ReviveState,
    RoundPhase, WorldState,
};
use crate::consts::*;

/// Axis-aligned box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Player hitbox centered on the player's fixed x and current y.
pub fn player_box(y: f32, hitbox: f32) -> Aabb {
    Aabb {
        x: PLAYER_X - hitbox / 2.0,
        y: y - hitbox / 2.0,
        w: hitbox,
        h: hitbox,
    }
}

/// Top and bottom barrier rectangles of a column.
pub fn obstacle_boxes(obstacle: &Obstacle) -> (Aabb, Aabb) {
    let top = Aabb {
        x: obstacle.x,
        y: 0.0,
        w: OBSTACLE_WIDTH,
        h: obstacle.top_height(),
    };
    let bottom_h = obstacle.bottom_height();
    let bottom = Aabb {
        x: obstacle.x,
        y: PLAYFIELD_HEIGHT - bottom_h - GROUND_HEIGHT,
        w: OBSTACLE_WIDTH,
        h: bottom_h,
    };
    (top, bottom)
}

/// What the player hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Floor or ceiling
    Bounds,
    Obstacle(u32),
}

/// Find this tick's lethal contact, if any. Simultaneous obstacle overlaps
/// resolve to the nearest column by horizontal distance; that tie-break is
/// the defined contract.
pub fn detect_lethal(world: &WorldState, hitbox: f32) -> Option<Contact> {
    let y = world.player.y;
    if y <= CEILING_Y || y >= FLOOR_Y {
        return Some(Contact::Bounds);
    }

    let player = player_box(y, hitbox);
    world
        .obstacles
        .iter()
        .filter(|o| (o.x - PLAYER_X).abs() < BROAD_PHASE_WINDOW)
        .filter(|o| {
            let (top, bottom) = obstacle_boxes(o);
            player.intersects(&top) || player.intersects(&bottom)
        })
        .min_by(|a, b| {
            let da = (a.x + OBSTACLE_WIDTH / 2.0 - PLAYER_X).abs();
            let db = (b.x + OBSTACLE_WIDTH / 2.0 - PLAYER_X).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|o| Contact::Obstacle(o.id))
}

/// Walk the resolution ladder for a detected lethal contact.
///
/// Returns true when the contact was terminal; the caller emits `RoundOver`
/// after the scoring pass so the final totals include this tick's passes.
pub fn resolve_lethal(world: &mut WorldState, contact: Contact, events: &mut Vec<GameEvent>) -> bool {
    // 1. Temporary immunity: manual invisibility, flicker/revive window,
    //    god-flight, or a shield power-up effect.
    if is_immune(&world.player, world.active_effect.as_ref()) {
        return false;
    }

    // 2. Absorbing shield: consumed in place, no reposition.
    if let Ability::ShieldTimeRevive(composite) = &mut world.player.ability
        && composite.shield_charges > 0
    {
        composite.shield_charges -= 1;
        world.player.immunity_remaining = FLICKER_IMMUNITY_SECS;
        log::debug!("shield absorbed {contact:?}");
        events.push(GameEvent::ShieldAbsorbed);
        return false;
    }

    // 3. Spend a life and restart from the round-start position.
    if world.player.lives > 1 {
        world.player.lives -= 1;
        world.player.reset_position();
        world.player.immunity_remaining = FLICKER_IMMUNITY_SECS;
        events.push(GameEvent::LifeLost {
            lives_remaining: world.player.lives,
        });
        return false;
    }

    // 4. One-time revive (one-way Available -> Used).
    if let Ability::ShieldTimeRevive(composite) = &mut world.player.ability
        && composite.revive == ReviveState::Available
    {
        composite.revive = ReviveState::Used;
        world.player.reset_position();
        world.player.lives = 1;
        world.player.immunity_remaining = REVIVE_IMMUNITY_SECS;
        log::info!("revive consumed");
        events.push(GameEvent::Revived);
        return false;
    }

    // God-flight auto-triggers in place of the terminal tier while Ready.
    if let Ability::GodFlight(phase @ GodFlightPhase::Ready) = &mut world.player.ability {
        *phase = GodFlightPhase::Active {
            remaining: GOD_FLIGHT_DURATION,
        };
        world.player.reset_position();
        log::debug!("god-flight auto-activated on {contact:?}");
        return false;
    }

    // 5. Terminal.
    world.phase = RoundPhase::Over;
    log::info!(
        "round over: score={} coins={} ({contact:?})",
        world.score,
        world.coins_collected
    );
    true
}

/// Capture-radius pass for coins and power-ups. Flags are set-once; a
/// collected power-up activates its timed effect, replacing any active one.
pub fn collect_items(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    let ppos = world.player_pos();

    let mut picked = 0u32;
    for coin in &mut world.coins {
        if !coin.collected && coin.pos.distance(ppos) <= COIN_CAPTURE_RADIUS {
            coin.collected = true;
            coin.target_scale = 0.0;
            picked += 1;
            events.push(GameEvent::CoinCollected { coin_id: coin.id });
        }
    }
    world.coins_collected += picked;

    let mut activated: Option<PowerUpKind> = None;
    for power_up in &mut world.power_ups {
        if !power_up.collected && power_up.pos.distance(ppos) <= POWERUP_CAPTURE_RADIUS {
            power_up.collected = true;
            activated = Some(power_up.kind);
            events.push(GameEvent::PowerUpCollected {
                kind: power_up.kind,
            });
        }
    }
    if let Some(kind) = activated {
        world.active_effect = Some(ActiveEffect {
            kind,
            remaining: POWERUP_EFFECT_SECS,
        });
    }
}

/// Convenience: detect and resolve in one call. Returns true on terminal.
pub fn check_player(world: &mut WorldState, m: &Modifiers, events: &mut Vec<GameEvent>) -> bool {
    match detect_lethal(world, m.hitbox) {
        Some(contact) => resolve_lethal(world, contact, events),
        None => false,
    }
}
