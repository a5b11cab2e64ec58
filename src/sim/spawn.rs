//! Entity advancement, retirement and spawning
//!
//! All live entities scroll strictly leftward each tick and are retired
//! once they are safely off-screen. Spawning is frame-rate independent:
//! obstacles are placement-driven (a new column enters once the rightmost
//! one has scrolled far enough in), while coins and power-ups use a
//! per-tick acceptance probability scaled by dt. The dt-scaled acceptance
//! keeps the expected spawns per real second constant across frame rates;
//! it is a deliberate approximation of a Poisson arrival process, not an
//! exact one.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, Obstacle, PowerUp, PowerUpKind, WorldState};
use crate::consts::*;

/// Move every live entity left by `scroll * dt * 60` and retire the ones
/// past their boundary. Collected coins shrink out before retiring.
pub fn advance(world: &mut WorldState, dt: f32, scroll: f32) {
    let dx = scroll * dt * FRAME_RATE_BASIS;

    for obstacle in &mut world.obstacles {
        obstacle.x -= dx;
    }
    world.obstacles.retain(|o| o.x > OBSTACLE_RETIRE_X);

    for coin in &mut world.coins {
        coin.pos.x -= dx;
        coin.rotation += dt * COIN_SPIN_DEG;
        coin.scale += (coin.target_scale - coin.scale) * (dt * COIN_SCALE_RATE).min(1.0);
    }
    world
        .coins
        .retain(|c| c.pos.x > ITEM_RETIRE_X && !(c.collected && c.scale < 0.05));

    for power_up in &mut world.power_ups {
        power_up.pos.x -= dx;
        power_up.pulse += dt * POWERUP_PULSE_HZ;
        power_up.rotation += dt * POWERUP_SPIN_DEG;
    }
    world
        .power_ups
        .retain(|p| p.pos.x > ITEM_RETIRE_X && !p.collected);
}

/// Spawn new entities for this tick.
pub fn spawn(world: &mut WorldState, dt: f32) {
    spawn_obstacle(world);
    spawn_coin(world, dt);
    spawn_power_up(world, dt);
}

/// A new column enters at the spawn boundary once the rightmost live one
/// has scrolled past the threshold, so at most one column ever occupies
/// the boundary.
fn spawn_obstacle(world: &mut WorldState) {
    let rightmost = world.obstacles.last().map(|o| o.x);
    if rightmost.is_none_or(|x| x < OBSTACLE_SPAWN_THRESHOLD_X) {
        let id = world.next_entity_id();
        let gap_center = world.rng().random_range(GAP_CENTER_MIN..GAP_CENTER_MAX);
        log::debug!("obstacle {id} spawned, gap center {gap_center:.1}");
        world.obstacles.push(Obstacle {
            id,
            x: SPAWN_X,
            gap_center,
            gap_height: OBSTACLE_GAP_HEIGHT,
            passed: false,
        });
    }
}

fn spawn_coin(world: &mut WorldState, dt: f32) {
    let accept = COIN_SPAWN_RATE * dt * FRAME_RATE_BASIS;
    if world.rng().random::<f32>() < accept {
        let id = world.next_entity_id();
        let y = world.rng().random_range(ITEM_Y_MIN..ITEM_Y_MAX);
        world.coins.push(Coin {
            id,
            pos: Vec2::new(SPAWN_X, y),
            collected: false,
            scale: 0.0,
            target_scale: 1.0,
            rotation: 0.0,
        });
    }
}

/// Power-ups additionally require that no effect is currently running.
fn spawn_power_up(world: &mut WorldState, dt: f32) {
    if world.active_effect.is_some() {
        return;
    }
    let accept = POWERUP_SPAWN_RATE * dt * FRAME_RATE_BASIS;
    if world.rng().random::<f32>() < accept {
        let id = world.next_entity_id();
        let y = world.rng().random_range(ITEM_Y_MIN..ITEM_Y_MAX);
        let kind = match world.rng().random_range(0..3) {
            0 => PowerUpKind::Speed,
            1 => PowerUpKind::Gravity,
            _ => PowerUpKind::Shield,
        };
        log::debug!("power-up {id} spawned: {kind:?}");
        world.power_ups.push(PowerUp {
            id,
            pos: Vec2::new(SPAWN_X, y),
            kind,
            collected: false,
            pulse: 0.0,
            rotation: 0.0,
        });
    }
}
