//! Minimal entity-component registry
//!
//! Components live in flat parallel arrays per type, keyed by opaque entity
//! handles. No archetypes, no scheduling - just dense storage with O(1)
//! lookup and swap-remove deletion, which is all a frame-stepped arcade
//! simulation needs.

pub mod entity;
pub mod store;

pub use entity::Entity;
pub use store::ComponentStore;
