//! Component entity type - a stocked part used in production

use serde::Serialize;
use std::fmt;

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityKind};
use crate::entities::relation::RelationKey;

/// A Component entity - a part tracked with an on-hand stock quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    /// Unique identifier
    id: EntityId,

    /// Component name
    name: String,

    /// Quantity on hand
    stock: u64,

    /// Relations to the suppliers of this component, at most one per supplier
    #[serde(skip_serializing_if = "Vec::is_empty")]
    supplier_relations: Vec<RelationKey>,
}

impl Component {
    /// A new component with no stock and no suppliers
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self::with_stock(id, name, 0)
    }

    /// Restore a component with a known stock level
    pub fn with_stock(id: EntityId, name: impl Into<String>, stock: u64) -> Self {
        Self {
            id,
            name: name.into(),
            stock,
            supplier_relations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }

    /// Add delivered units to stock
    pub fn add_to_stock(&mut self, quantity: u32) {
        self.stock = self.stock.saturating_add(u64::from(quantity));
    }

    /// Remove `quantity` from stock for production.
    ///
    /// Returns false and leaves stock untouched if there is not enough on hand.
    pub fn assign(&mut self, quantity: u32) -> bool {
        let quantity = u64::from(quantity);
        if quantity <= self.stock {
            self.stock -= quantity;
            true
        } else {
            false
        }
    }

    /// Keys of the relations to this component's suppliers, in association order
    pub fn supplier_relations(&self) -> &[RelationKey] {
        &self.supplier_relations
    }

    /// The relation key for `supplier`, if that supplier supplies this component
    pub fn relation_with(&self, supplier: &EntityId) -> Option<RelationKey> {
        self.supplier_relations
            .iter()
            .find(|key| &key.supplier == supplier)
            .copied()
    }

    /// Whether a relation equal to `key` is already present
    pub fn has_supplier_relation(&self, key: &RelationKey) -> bool {
        self.supplier_relations.contains(key)
    }

    /// Add a relation key; returns false if an equal key is already present
    pub fn add_supplier_relation(&mut self, key: RelationKey) -> bool {
        if key.component != self.id || self.has_supplier_relation(&key) {
            return false;
        }
        self.supplier_relations.push(key);
        true
    }
}

impl Entity for Component {
    const KIND: EntityKind = EntityKind::Component;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Component name: {} | Component ID: {} | Quantity on hand: {}",
            self.name, self.id, self.stock
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(seq: u32) -> EntityId {
        EntityId::from_parts(EntityKind::Component, seq)
    }

    fn sup(seq: u32) -> EntityId {
        EntityId::from_parts(EntityKind::Supplier, seq)
    }

    #[test]
    fn test_new_component_has_no_stock() {
        let c = Component::new(cmp(1), "Bolt");
        assert_eq!(c.stock(), 0);
        assert!(c.supplier_relations().is_empty());
    }

    #[test]
    fn test_assign_within_stock() {
        let mut c = Component::with_stock(cmp(1), "Bolt", 10);
        assert!(c.assign(4));
        assert_eq!(c.stock(), 6);
        assert!(c.assign(6));
        assert_eq!(c.stock(), 0);
    }

    #[test]
    fn test_assign_beyond_stock_leaves_stock_unchanged() {
        let mut c = Component::with_stock(cmp(1), "Bolt", 3);
        assert!(!c.assign(4));
        assert_eq!(c.stock(), 3);
    }

    #[test]
    fn test_relation_set_rejects_duplicates() {
        let mut c = Component::new(cmp(1), "Bolt");
        let key = RelationKey::new(cmp(1), sup(2));
        assert!(c.add_supplier_relation(key));
        assert!(!c.add_supplier_relation(RelationKey::new(cmp(1), sup(2))));
        assert_eq!(c.supplier_relations().len(), 1);
        assert_eq!(c.relation_with(&sup(2)), Some(key));
        assert_eq!(c.relation_with(&sup(3)), None);
    }

    #[test]
    fn test_relation_set_rejects_foreign_component() {
        let mut c = Component::new(cmp(1), "Bolt");
        assert!(!c.add_supplier_relation(RelationKey::new(cmp(2), sup(1))));
    }

    #[test]
    fn test_display() {
        let c = Component::with_stock(cmp(1), "Bolt", 25);
        insta::assert_snapshot!(c.to_string(), @"Component name: Bolt | Component ID: C1 | Quantity on hand: 25");
    }
}
