//! Flat component storage
//!
//! One store per component type. Entities and components sit in parallel
//! `Vec`s so systems can iterate densely; a side index gives O(1) lookup by
//! handle. Removal swap-removes, so iteration order is insertion order only
//! until the first removal.

use std::collections::HashMap;

use super::Entity;

/// Dense storage for one component type
#[derive(Debug, Clone)]
pub struct ComponentStore<T> {
    entities: Vec<Entity>,
    components: Vec<T>,
    index: HashMap<Entity, usize>,
}

// Manual impl: an empty store needs no `T: Default`
impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ComponentStore<T> {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            components: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Number of stored components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Whether the entity has a component in this store
    pub fn has(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    /// Insert a component, replacing any existing one for the entity
    pub fn insert(&mut self, entity: Entity, component: T) {
        if let Some(&slot) = self.index.get(&entity) {
            self.components[slot] = component;
        } else {
            self.index.insert(entity, self.components.len());
            self.entities.push(entity);
            self.components.push(component);
        }
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.index.get(&entity).map(|&slot| &self.components[slot])
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self.index.get(&entity) {
            Some(&slot) => Some(&mut self.components[slot]),
            None => None,
        }
    }

    /// Remove the entity's component, if any
    ///
    /// Swap-removes: the last component takes the vacated slot.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.index.remove(&entity)?;
        let component = self.components.swap_remove(slot);
        self.entities.swap_remove(slot);
        if let Some(&moved) = self.entities.get(slot) {
            self.index.insert(moved, slot);
        }
        Some(component)
    }

    /// All entities holding this component, in storage order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.components.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.components.iter_mut())
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.components.clear();
        self.index.clear();
    }
}
