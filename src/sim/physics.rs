//! Player physics integration
//!
//! Intentionally simplified constant-gravity/impulse model: gravity pulls
//! the velocity down to a terminal fall speed, a jump replaces the velocity
//! with a fixed upward impulse, and the position clamps to the playable
//! band. The derived tilt is cosmetic and never feeds back.

use super::ability::Modifiers;
use super::state::PlayerState;
use crate::consts::*;
use crate::tuning::DifficultyProfile;

/// Advance velocity and position by one (possibly dilated) timestep.
pub fn integrate(player: &mut PlayerState, dt: f32, profile: &DifficultyProfile, m: &Modifiers) {
    let gravity = profile.gravity * m.gravity_scale;
    player.velocity = (player.velocity + gravity * dt).min(profile.max_fall_speed);
    player.y = (player.y + player.velocity * dt).clamp(CEILING_Y, FLOOR_Y);
    player.tilt_deg = tilt_for_velocity(player.velocity);
}

/// Apply a jump impulse if the debounce interval has elapsed.
///
/// The debounce runs on real time (see `PlayerState::since_last_jump`),
/// independent of the dilated simulation clock, so rapid taps collapse to
/// one impulse regardless of frame rate.
pub fn try_jump(player: &mut PlayerState, profile: &DifficultyProfile, m: &Modifiers) -> bool {
    if player.since_last_jump < JUMP_DEBOUNCE_SECS {
        return false;
    }
    player.velocity = -profile.jump_impulse * m.jump_scale;
    player.since_last_jump = 0.0;
    true
}

/// Bounded tilt angle from vertical velocity (degrees; negative = nose up).
pub fn tilt_for_velocity(velocity: f32) -> f32 {
    (velocity * TILT_FACTOR).clamp(TILT_MIN_DEG, TILT_MAX_DEG)
}

/// Horizontal scroll speed (units/frame): difficulty base plus a
/// score-proportional ramp, scaled by time dilation / power-up effects.
pub fn scroll_speed(score: u32, profile: &DifficultyProfile, m: &Modifiers) -> f32 {
    (profile.base_scroll_speed + profile.scroll_ramp_per_point * score as f32) * m.scroll_scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::AbilityKind;

    fn no_mods() -> Modifiers {
        Modifiers {
            gravity_scale: 1.0,
            jump_scale: 1.0,
            hitbox: PLAYER_HITBOX,
            scroll_scale: 1.0,
            dt_scale: 1.0,
            bonus_points: false,
        }
    }

    #[test]
    fn velocity_clamps_at_terminal_fall_speed() {
        let profile = DifficultyProfile::medium();
        let mut player = PlayerState::new(AbilityKind::Normal);
        for _ in 0..120 {
            integrate(&mut player, 1.0 / 60.0, &profile, &no_mods());
        }
        assert_eq!(player.velocity, profile.max_fall_speed);
    }

    #[test]
    fn position_clamps_to_playable_band() {
        let profile = DifficultyProfile::medium();
        let mut player = PlayerState::new(AbilityKind::Normal);
        for _ in 0..600 {
            integrate(&mut player, 1.0 / 60.0, &profile, &no_mods());
        }
        assert_eq!(player.y, FLOOR_Y);

        player.velocity = -10_000.0;
        integrate(&mut player, 1.0 / 60.0, &profile, &no_mods());
        assert_eq!(player.y, CEILING_Y);
    }

    #[test]
    fn jump_debounce_collapses_rapid_taps() {
        let profile = DifficultyProfile::medium();
        let mut player = PlayerState::new(AbilityKind::Normal);
        assert!(try_jump(&mut player, &profile, &no_mods()));
        let v = player.velocity;

        // Second request 50 ms later is rejected
        player.since_last_jump = 0.05;
        player.velocity = 100.0;
        assert!(!try_jump(&mut player, &profile, &no_mods()));
        assert_eq!(player.velocity, 100.0);

        // 100 ms later it is accepted again
        player.since_last_jump = 0.1;
        assert!(try_jump(&mut player, &profile, &no_mods()));
        assert_eq!(player.velocity, v);
    }

    #[test]
    fn fast_flap_scales_the_impulse() {
        let profile = DifficultyProfile::medium();
        let mut player = PlayerState::new(AbilityKind::FastFlap);
        let m = Modifiers {
            jump_scale: FAST_FLAP_SCALE,
            ..no_mods()
        };
        try_jump(&mut player, &profile, &m);
        assert_eq!(player.velocity, -profile.jump_impulse * FAST_FLAP_SCALE);
    }

    #[test]
    fn tilt_is_bounded_and_monotone() {
        assert_eq!(tilt_for_velocity(-10_000.0), TILT_MIN_DEG);
        assert_eq!(tilt_for_velocity(10_000.0), TILT_MAX_DEG);
        assert!(tilt_for_velocity(-100.0) < 0.0);
        assert!(tilt_for_velocity(100.0) > 0.0);
    }

    #[test]
    fn scroll_speed_ramps_with_score() {
        let profile = DifficultyProfile::medium();
        let base = scroll_speed(0, &profile, &no_mods());
        let later = scroll_speed(10, &profile, &no_mods());
        assert!((later - base - 10.0 * profile.scroll_ramp_per_point).abs() < 1e-6);

        let dilated = Modifiers {
            scroll_scale: DILATION_SCROLL_SCALE,
            ..no_mods()
        };
        assert!(scroll_speed(10, &profile, &dilated) < later);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// For all dt in (0, 1/15] the integrator matches the closed
            /// form: v' = min(v + g*dt, maxFall), y' = clamp(y + v'*dt, ..).
            #[test]
            fn integrator_matches_closed_form(
                dt in 1e-4f32..=(1.0 / 15.0),
                v0 in -600.0f32..600.0,
                y0 in 0.0f32..FLOOR_Y,
            ) {
                let profile = DifficultyProfile::medium();
                let mut player = PlayerState::new(AbilityKind::Normal);
                player.velocity = v0;
                player.y = y0;

                integrate(&mut player, dt, &profile, &no_mods());

                let v_expect = (v0 + profile.gravity * dt).min(profile.max_fall_speed);
                let y_expect = (y0 + v_expect * dt).clamp(CEILING_Y, FLOOR_Y);
                prop_assert!((player.velocity - v_expect).abs() < 1e-3);
                prop_assert!((player.y - y_expect).abs() < 1e-3);
            }
        }
    }
}
