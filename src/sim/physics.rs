//! Motion integration and collision detection
//!
//! One explicit-Euler step per frame, then a naive O(n²) pair scan over every
//! entity with a `Motion`. Fish pairs use a fixed-distance circle test; every
//! other pair uses a bounding-circle approximation derived from the larger of
//! the two bounding boxes. Deliberately simple: no spatial index, no
//! symmetric-pair deduplication, no persistent contact state.

use glam::Vec2;

use crate::consts::{FISH_COLLISION_RADIUS, WALL_PUSH_SPEED};
use crate::ecs::Entity;

use super::components::{Collision, Motion};
use super::hull::{self, HullKind};
use super::registry::Registry;
use super::spawn;

/// Local bounding box scaled to the entity's current size
///
/// Absolute value guards against negative scale used for facing direction.
pub fn bounding_box(motion: &Motion) -> Vec2 {
    motion.scale.abs()
}

/// Approximate bounding-circle overlap test
///
/// Puts a circle around each bounding box and checks whether the center of
/// either entity falls inside the larger circle. Symmetric by construction;
/// an approximation, not exact shape intersection.
pub fn collides(a: &Motion, b: &Motion) -> bool {
    let dp = a.position - b.position;
    let dist_squared = dp.length_squared();
    let r_a_squared = (bounding_box(a) / 2.0).length_squared();
    let r_b_squared = (bounding_box(b) / 2.0).length_squared();
    dist_squared < r_a_squared.max(r_b_squared)
}

/// Fixed-distance circle test used for fish-fish pairs
pub fn fish_circles_intersect(a: &Motion, b: &Motion) -> bool {
    a.position.distance(b.position) < FISH_COLLISION_RADIUS
}

/// Advance the simulation by one physics step
///
/// Integrates positions, records this step's collision pairs, bounces fish
/// and the player off the river banks, and (in debug mode) spawns
/// bounding-radius visualization lines.
pub fn step(
    registry: &mut Registry,
    elapsed_ms: f32,
    window_width_px: f32,
    window_height_px: f32,
    debug_mode: bool,
) {
    // Scale movement by wall-clock time so entities cover the same ground
    // regardless of frame rate. Elapsed time is not validated; zero elapsed
    // leaves every position unchanged.
    let step_seconds = elapsed_ms / 1000.0;
    for (_, motion) in registry.motions.iter_mut() {
        motion.position += motion.velocity * step_seconds;
    }

    detect_collisions(registry);

    // Wall bouncing applies to every fish and to the player
    let mut bouncers: Vec<Entity> = registry.soft_shells.entities().to_vec();
    bouncers.extend_from_slice(registry.players.entities());
    for entity in bouncers {
        let Some(kind) = registry.hulls.get(entity).copied() else {
            continue;
        };
        let Some(motion) = registry.motions.get_mut(entity) else {
            continue;
        };
        bounce_off_walls(motion, kind, window_width_px, window_height_px);
    }

    if debug_mode {
        spawn_bounding_lines(registry);
    }
}

/// Record collision pairs for the current step
///
/// Scans all ordered pairs, so a symmetric hit is recorded twice; game rules
/// tolerate the duplicates and clear the list at the end of the frame.
fn detect_collisions(registry: &mut Registry) {
    let Registry {
        motions,
        soft_shells,
        collisions,
        ..
    } = registry;

    let entities = motions.entities();
    for i in 0..entities.len() {
        for j in 0..entities.len() {
            if i == j {
                continue;
            }
            let entity_i = entities[i];
            let entity_j = entities[j];
            let (Some(motion_i), Some(motion_j)) = (motions.get(entity_i), motions.get(entity_j))
            else {
                continue;
            };

            if soft_shells.has(entity_i) && soft_shells.has(entity_j) {
                // Fish schooling against each other: fixed-radius circles
                if fish_circles_intersect(motion_i, motion_j) {
                    collisions.push(Collision {
                        entity: entity_i,
                        other: entity_j,
                    });
                }
            } else if collides(motion_i, motion_j) {
                collisions.push(Collision {
                    entity: entity_i,
                    other: entity_j,
                });
            }
        }
    }
}

/// Reflect an entity's velocity when any hull vertex crosses a river bank
///
/// Top and bottom banks reflect vertical velocity, with a push-off speed for
/// entities sitting still against the bank. The left bank reflects horizontal
/// velocity unconditionally; the right bank only while moving rightward, so
/// entities spawned off-screen can still swim in.
fn bounce_off_walls(motion: &mut Motion, kind: HullKind, width_px: f32, height_px: f32) {
    let mut past_top = false;
    let mut past_bottom = false;
    let mut past_left = false;
    let mut past_right = false;
    for vertex in hull::world_vertices(kind, motion) {
        past_top |= vertex.y < 0.0;
        past_bottom |= vertex.y > height_px;
        past_left |= vertex.x < 0.0;
        past_right |= vertex.x > width_px;
    }

    if past_top && motion.velocity.y <= 0.0 {
        motion.velocity.y = if motion.velocity.y == 0.0 {
            WALL_PUSH_SPEED
        } else {
            -motion.velocity.y
        };
    }
    if past_bottom && motion.velocity.y >= 0.0 {
        motion.velocity.y = if motion.velocity.y == 0.0 {
            -WALL_PUSH_SPEED
        } else {
            -motion.velocity.y
        };
    }
    if past_left || (past_right && motion.velocity.x > 0.0) {
        motion.velocity.x = -motion.velocity.x;
    }
}

/// Visualize each entity's bounding radius with two axis-aligned lines
fn spawn_bounding_lines(registry: &mut Registry) {
    let specs: Vec<(Vec2, f32, f32)> = registry
        .motions
        .iter()
        .map(|(_, motion)| {
            let radius = (bounding_box(motion) / 2.0).length();
            (motion.position, radius, motion.scale.x.abs() / 10.0)
        })
        .collect();

    for (position, radius, thickness) in specs {
        spawn::spawn_debug_line(registry, position, Vec2::new(thickness, 2.0 * radius));
        spawn::spawn_debug_line(registry, position, Vec2::new(2.0 * radius, thickness));
    }
}
