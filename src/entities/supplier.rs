//! Supplier entity type - an external vendor of components

use serde::Serialize;
use std::fmt;

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityKind};
use crate::entities::relation::RelationKey;

/// A Supplier entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Supplier {
    /// Unique identifier
    id: EntityId,

    /// Supplier name
    name: String,

    /// Relations to the components this supplier supplies, at most one per component
    #[serde(skip_serializing_if = "Vec::is_empty")]
    component_relations: Vec<RelationKey>,
}

impl Supplier {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            component_relations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keys of the relations to the components this supplier supplies
    pub fn component_relations(&self) -> &[RelationKey] {
        &self.component_relations
    }

    /// Whether a relation equal to `key` is already present
    pub fn has_component_relation(&self, key: &RelationKey) -> bool {
        self.component_relations.contains(key)
    }

    /// Add a relation key; returns false if an equal key is already present
    pub fn add_component_relation(&mut self, key: RelationKey) -> bool {
        if key.supplier != self.id || self.has_component_relation(&key) {
            return false;
        }
        self.component_relations.push(key);
        true
    }
}

impl Entity for Supplier {
    const KIND: EntityKind = EntityKind::Supplier;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl fmt::Display for Supplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Supplier name: {} | Supplier ID: {}", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_set_mirrors_component_side() {
        let s_id = EntityId::from_parts(EntityKind::Supplier, 1);
        let mut s = Supplier::new(s_id, "Acme");
        let key = RelationKey::new(EntityId::from_parts(EntityKind::Component, 4), s_id);

        assert!(s.add_component_relation(key));
        assert!(!s.add_component_relation(key));
        assert!(s.has_component_relation(&key));
        assert_eq!(s.component_relations(), &[key]);
    }

    #[test]
    fn test_display() {
        let s = Supplier::new(EntityId::from_parts(EntityKind::Supplier, 2), "Acme");
        assert_eq!(s.to_string(), "Supplier name: Acme | Supplier ID: S2");
    }
}
