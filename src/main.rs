//! Salmon entry point
//!
//! Runs a headless demo session: a simple autopilot chases the nearest fish
//! through a fixed-timestep loop, exercising spawning, collisions, death and
//! restart. Usage: `salmon [seed] [frames]`.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use salmon::consts::{WINDOW_HEIGHT_PX, WINDOW_WIDTH_PX};
use salmon::sim::{GameEvent, GameWorld, Key, KeyAction, Modifiers};
use salmon::{AudioManager, HighScores, Settings};

/// Simulation step, ~60 FPS
const FRAME_MS: f32 = 1000.0 / 60.0;
/// Default session length (one minute of simulated time)
const DEFAULT_FRAMES: u32 = 3600;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| unix_time_ms() as u64);
    let frames: u32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    log::info!("starting with seed {seed}, {frames} frames");

    let settings = Settings::load(Settings::FILE_NAME);
    let mut audio = AudioManager::new();
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);

    let mut highscores = HighScores::load(HighScores::FILE_NAME);
    if let Some(top) = highscores.top_score() {
        log::info!("score to beat: {top}");
    }

    let mut world = GameWorld::new(seed, WINDOW_WIDTH_PX, WINDOW_HEIGHT_PX);
    if settings.debug_overlay {
        world.on_key(Key::D, KeyAction::Press, Modifiers::NONE);
    }

    let mut deaths = 0u32;
    for _ in 0..frames {
        autopilot(&mut world);
        world.step(FRAME_MS);
        for event in world.drain_events() {
            audio.on_event(&event);
            match event {
                GameEvent::SalmonDied => {
                    deaths += 1;
                    log::info!("salmon died ({deaths} so far)");
                }
                GameEvent::FishEaten { points } => log::info!("score: {points}"),
                GameEvent::Restarted => log::info!("back in the river"),
                GameEvent::SpeedChanged { .. } => {}
            }
        }
    }

    let score = world.points();
    println!("session over: {score} fish eaten, {deaths} deaths");

    if let Some(rank) = highscores.add_score(score, unix_time_ms()) {
        println!("new high score, rank {rank}!");
        highscores.save(HighScores::FILE_NAME);
    }
}

/// Chase the nearest fish: hold the arrow keys toward it and face it
fn autopilot(world: &mut GameWorld) {
    let registry = world.registry();
    let Some(player_pos) = registry
        .motions
        .get(world.player())
        .map(|m| m.position)
    else {
        return;
    };

    let mut target: Option<Vec2> = None;
    let mut best = f32::MAX;
    for &fish in registry.soft_shells.entities() {
        let Some(motion) = registry.motions.get(fish) else {
            continue;
        };
        let dist_squared = motion.position.distance_squared(player_pos);
        if dist_squared < best {
            best = dist_squared;
            target = Some(motion.position);
        }
    }
    let Some(target) = target else {
        return;
    };

    let horizontal = if target.x < player_pos.x {
        Key::Left
    } else {
        Key::Right
    };
    let vertical = if target.y < player_pos.y {
        Key::Up
    } else {
        Key::Down
    };
    world.on_key(horizontal, KeyAction::Press, Modifiers::NONE);
    world.on_key(vertical, KeyAction::Press, Modifiers::NONE);
    world.on_cursor_move(target);
}

fn unix_time_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}
