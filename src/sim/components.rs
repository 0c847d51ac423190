//! Component types
//!
//! Plain data only - behavior lives in the physics step and the world rules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEATH_TIMER_MS, LIGHT_UP_MS};
use crate::ecs::Entity;

/// Kinematic state of a moving entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Motion {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing angle in radians, default facing is (1, 0)
    pub angle: f32,
    /// Render scale; doubles as the bounding box. A negative x flips the
    /// sprite to face left, so bounding math takes the absolute value.
    pub scale: Vec2,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angle: 0.0,
            scale: Vec2::ONE,
        }
    }
}

/// A detected collision against `other`, valid for the current step only
///
/// The physics step may record the same pair twice (once per order); the
/// list is drained and cleared by collision handling every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub entity: Entity,
    pub other: Entity,
}

/// Countdown to removal and restart once a salmon is caught
#[derive(Debug, Clone, Copy)]
pub struct DeathTimer {
    pub counter_ms: f32,
}

impl Default for DeathTimer {
    fn default() -> Self {
        Self {
            counter_ms: DEATH_TIMER_MS,
        }
    }
}

/// Short highlight applied to the player after eating
#[derive(Debug, Clone, Copy)]
pub struct LightUp {
    pub counter_ms: f32,
}

impl Default for LightUp {
    fn default() -> Self {
        Self {
            counter_ms: LIGHT_UP_MS,
        }
    }
}

/// RGB render tint, components in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Tag: the player-controlled salmon (exactly one alive at a time)
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

/// Tag: edible soft-shell fish
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftShell;

/// Tag: hard-shell turtle obstacle
#[derive(Debug, Clone, Copy, Default)]
pub struct HardShell;

/// Tag: decorative river-bed pebble
#[derive(Debug, Clone, Copy, Default)]
pub struct Pebble;

/// Tag: transient bounding-radius visualization line
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugLine;
