//! Headless demo runner
//!
//! Runs one round without a renderer: a naive autopilot flaps toward the
//! next gap, events stream to the log, and the run summary prints as JSON.
//! Same seed and difficulty always print the same summary.

use gapwing::consts::{PLAYER_START_Y, PLAYER_X};
use gapwing::sim::{AbilityKind, RoundPhase, StepInput, WorldState, step};
use gapwing::tuning::DifficultyProfile;

const DT: f32 = 1.0 / 60.0;
const MAX_TICKS: u64 = 60 * 120; // two simulated minutes

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = match args.first() {
        Some(raw) => match raw.parse::<u64>() {
            Ok(seed) => seed,
            Err(_) => usage(),
        },
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
    };
    let profile = match args.get(1) {
        Some(name) => match DifficultyProfile::preset(name) {
            Some(profile) => profile,
            None => usage(),
        },
        None => DifficultyProfile::default(),
    };

    let mut world = WorldState::new(seed, profile, AbilityKind::Normal);
    for _ in 0..MAX_TICKS {
        let input = StepInput {
            jump_requested: autopilot(&world),
            ability_requested: false,
        };
        for event in step(&mut world, DT, &input) {
            log::info!("{event:?}");
        }
        if world.phase == RoundPhase::Over {
            break;
        }
    }

    let summary = serde_json::json!({
        "seed": world.seed,
        "score": world.score,
        "coins": world.coins_collected,
        "ticks": world.time_ticks,
        "elapsed_secs": world.elapsed,
        "finished": world.phase == RoundPhase::Over,
    });
    println!("{summary}");
}

/// Flap whenever the body is sinking below the next gap center.
fn autopilot(world: &WorldState) -> bool {
    let target = world
        .obstacles
        .iter()
        .find(|o| o.trailing_edge() >= PLAYER_X)
        .map(|o| o.gap_center)
        .unwrap_or(PLAYER_START_Y);
    world.player.y > target + 10.0 && world.player.velocity > 0.0
}

fn usage() -> ! {
    eprintln!("usage: gapwing [seed] [easy|medium|hard]");
    std::process::exit(2);
}
