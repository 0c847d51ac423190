//! Entity handles

/// Opaque entity identifier
///
/// Allocated by [`Registry::create_entity`](crate::sim::registry::Registry::create_entity).
/// Carries no data; all state hangs off component stores keyed by this handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    /// Create an entity with the given ID (registry use only)
    pub(crate) fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw ID, for logging and stable sort keys
    pub fn id(self) -> u32 {
        self.0
    }
}
