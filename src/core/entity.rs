//! Entity trait - common interface for registry-held entity types

use crate::core::identity::{EntityId, EntityKind};

/// Common trait for entities that live in a registry and are looked up by ID
pub trait Entity {
    /// The kind of identifier this entity carries
    const KIND: EntityKind;

    /// Get the entity's unique ID
    fn id(&self) -> &EntityId;
}
