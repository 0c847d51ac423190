//! Salmon - a river-crossing arcade game
//!
//! Core modules:
//! - `ecs`: minimal entity-component registry (flat parallel arrays)
//! - `sim`: deterministic simulation (physics, collisions, game rules)
//! - `audio`: fire-and-forget sound event sink
//! - `settings`: serde-backed preferences
//! - `highscores`: persistent leaderboard

pub mod audio;
pub mod ecs;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, SoundEffect};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Visible region, in world units (1 unit = 1 px at native scale)
    pub const WINDOW_WIDTH_PX: f32 = 1200.0;
    pub const WINDOW_HEIGHT_PX: f32 = 800.0;

    /// Fixed-distance circle test threshold for fish-fish collisions
    pub const FISH_COLLISION_RADIUS: f32 = 50.0;
    /// Circle radius used for fish-fish de-overlap resolution
    pub const FISH_BOUNCE_RADIUS: f32 = 25.0;
    /// Fish slower than this after a bounce get their velocity doubled
    pub const MIN_BOUNCE_SPEED: f32 = 100.0;
    /// Vertical speed given to a wall-pinned entity with zero velocity
    pub const WALL_PUSH_SPEED: f32 = 100.0;

    /// Player steering speed (per axis)
    pub const PLAYER_SPEED: f32 = 100.0;
    /// Sink velocity applied to a dying salmon
    pub const DEATH_SINK_SPEED: f32 = 80.0;

    /// Death countdown duration
    pub const DEATH_TIMER_MS: f32 = 3000.0;
    /// Highlight duration after eating a fish
    pub const LIGHT_UP_MS: f32 = 1500.0;

    /// Population caps
    pub const MAX_FISH: usize = 30;
    pub const MAX_TURTLES: usize = 15;
    /// Decorative pebbles created on every restart
    pub const PEBBLE_COUNT: usize = 20;

    /// Spawn timer baselines
    pub const FISH_DELAY_MS: f32 = 6000.0;
    pub const TURTLE_DELAY_MS: f32 = 6000.0;

    /// Spawn speeds (fish also get a random vertical component)
    pub const FISH_SPEED: f32 = 200.0;
    pub const TURTLE_SPEED: f32 = 100.0;
}
