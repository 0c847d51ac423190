//! Entity factories
//!
//! Each spawner allocates a handle and fills in the component set for one
//! entity kind. Velocities and placement policy belong to the world rules;
//! these only establish shape, tags, and default tint.

use glam::Vec2;

use crate::ecs::Entity;

use super::components::{Color, DebugLine, HardShell, Motion, Pebble, Player, SoftShell};
use super::hull::HullKind;
use super::registry::Registry;

/// Player salmon bounding box
pub const SALMON_SCALE: Vec2 = Vec2::new(120.0, 80.0);
/// Edible fish bounding box; negative x faces the sprite left
pub const FISH_SCALE: Vec2 = Vec2::new(-60.0, 40.0);
/// Turtle bounding box
pub const TURTLE_SCALE: Vec2 = Vec2::new(-90.0, 60.0);

/// The player-controlled salmon
pub fn spawn_player_salmon(registry: &mut Registry, position: Vec2) -> Entity {
    let entity = registry.create_entity();
    registry.motions.insert(
        entity,
        Motion {
            position,
            scale: SALMON_SCALE,
            ..Motion::default()
        },
    );
    registry.hulls.insert(entity, HullKind::Salmon);
    registry.players.insert(entity, Player);
    registry.colors.insert(entity, Color::new(0.0, 1.0, 0.0));
    entity
}

/// An edible soft-shell fish
pub fn spawn_fish(registry: &mut Registry, position: Vec2, velocity: Vec2) -> Entity {
    let entity = registry.create_entity();
    registry.motions.insert(
        entity,
        Motion {
            position,
            velocity,
            scale: FISH_SCALE,
            ..Motion::default()
        },
    );
    registry.hulls.insert(entity, HullKind::Fish);
    registry.soft_shells.insert(entity, SoftShell);
    registry.colors.insert(entity, Color::new(0.8, 0.8, 1.0));
    entity
}

/// A hard-shell turtle obstacle
pub fn spawn_turtle(registry: &mut Registry, position: Vec2, velocity: Vec2) -> Entity {
    let entity = registry.create_entity();
    registry.motions.insert(
        entity,
        Motion {
            position,
            velocity,
            scale: TURTLE_SCALE,
            ..Motion::default()
        },
    );
    registry.hulls.insert(entity, HullKind::Turtle);
    registry.hard_shells.insert(entity, HardShell);
    registry.colors.insert(entity, Color::new(0.4, 0.7, 0.3));
    entity
}

/// A decorative river-bed pebble (static, round, grey)
pub fn spawn_pebble(registry: &mut Registry, position: Vec2, radius: f32, brightness: f32) -> Entity {
    let entity = registry.create_entity();
    registry.motions.insert(
        entity,
        Motion {
            position,
            scale: Vec2::splat(radius),
            ..Motion::default()
        },
    );
    registry.pebbles.insert(entity, Pebble);
    registry
        .colors
        .insert(entity, Color::new(brightness, brightness, brightness));
    entity
}

/// A transient bounding-radius visualization line
pub fn spawn_debug_line(registry: &mut Registry, position: Vec2, scale: Vec2) -> Entity {
    let entity = registry.create_entity();
    registry.motions.insert(
        entity,
        Motion {
            position,
            scale,
            ..Motion::default()
        },
    );
    registry.debug_lines.insert(entity, DebugLine);
    registry.colors.insert(entity, Color::new(1.0, 0.0, 0.0));
    entity
}
