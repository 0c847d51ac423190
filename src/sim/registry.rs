//! The component registry
//!
//! One flat store per component type plus the per-step collision list.
//! Mirrors the data model: no ownership hierarchy, every relationship keyed
//! by entity handle.

use crate::ecs::{ComponentStore, Entity};

use super::components::{
    Collision, Color, DeathTimer, DebugLine, HardShell, LightUp, Motion, Pebble, Player, SoftShell,
};
use super::hull::HullKind;

/// All component stores for the game world
#[derive(Debug, Default)]
pub struct Registry {
    next_entity_id: u32,

    pub motions: ComponentStore<Motion>,
    pub colors: ComponentStore<Color>,
    pub death_timers: ComponentStore<DeathTimer>,
    pub light_ups: ComponentStore<LightUp>,
    pub hulls: ComponentStore<HullKind>,
    pub players: ComponentStore<Player>,
    pub soft_shells: ComponentStore<SoftShell>,
    pub hard_shells: ComponentStore<HardShell>,
    pub pebbles: ComponentStore<Pebble>,
    pub debug_lines: ComponentStore<DebugLine>,

    /// Collisions detected this step; duplicates permitted (both pair
    /// orders may appear). Cleared by collision handling every frame.
    pub collisions: Vec<Collision>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity handle
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        entity
    }

    /// Record a collision pair for this step (duplicates permitted)
    pub fn record_collision(&mut self, entity: Entity, other: Entity) {
        self.collisions.push(Collision { entity, other });
    }

    /// Strip every component from an entity, effectively destroying it
    pub fn remove_all_components_of(&mut self, entity: Entity) {
        self.motions.remove(entity);
        self.colors.remove(entity);
        self.death_timers.remove(entity);
        self.light_ups.remove(entity);
        self.hulls.remove(entity);
        self.players.remove(entity);
        self.soft_shells.remove(entity);
        self.hard_shells.remove(entity);
        self.pebbles.remove(entity);
        self.debug_lines.remove(entity);
        self.collisions
            .retain(|c| c.entity != entity && c.other != entity);
    }

    /// Drop everything; entity IDs keep counting up
    pub fn clear_all(&mut self) {
        self.motions.clear();
        self.colors.clear();
        self.death_timers.clear();
        self.light_ups.clear();
        self.hulls.clear();
        self.players.clear();
        self.soft_shells.clear();
        self.hard_shells.clear();
        self.pebbles.clear();
        self.debug_lines.clear();
        self.collisions.clear();
    }

    /// Log per-store population, for leak hunting around restarts
    pub fn log_component_counts(&self) {
        log::debug!(
            "registry: {} motions, {} colors, {} death timers, {} light-ups, {} hulls, \
             {} players, {} soft shells, {} hard shells, {} pebbles, {} debug lines, \
             {} collisions",
            self.motions.len(),
            self.colors.len(),
            self.death_timers.len(),
            self.light_ups.len(),
            self.hulls.len(),
            self.players.len(),
            self.soft_shells.len(),
            self.hard_shells.len(),
            self.pebbles.len(),
            self.debug_lines.len(),
            self.collisions.len(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_are_unique() {
        let mut registry = Registry::new();
        let a = registry.create_entity();
        let b = registry.create_entity();
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_all_components_of() {
        let mut registry = Registry::new();
        let e = registry.create_entity();
        let other = registry.create_entity();
        registry.motions.insert(e, Motion::default());
        registry.soft_shells.insert(e, SoftShell);
        registry.record_collision(e, other);
        registry.record_collision(other, e);

        registry.remove_all_components_of(e);
        assert!(!registry.motions.has(e));
        assert!(!registry.soft_shells.has(e));
        assert!(registry.collisions.is_empty());
    }

    #[test]
    fn test_collision_list_permits_duplicates() {
        let mut registry = Registry::new();
        let a = registry.create_entity();
        let b = registry.create_entity();
        registry.record_collision(a, b);
        registry.record_collision(a, b);
        assert_eq!(registry.collisions.len(), 2);
    }
}
