//! Component-supplier relation - records that a supplier supplies a component

use serde::Serialize;
use std::fmt;

use crate::core::identity::EntityId;

/// Identity of a relation: the ordered (component, supplier) pair.
///
/// Components and suppliers hold these keys in their relation sets; the
/// relation record itself lives in the company's relation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RelationKey {
    pub component: EntityId,
    pub supplier: EntityId,
}

impl RelationKey {
    pub fn new(component: EntityId, supplier: EntityId) -> Self {
        Self {
            component,
            supplier,
        }
    }
}

impl fmt::Display for RelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.component, self.supplier)
    }
}

/// A single relationship between a component and a supplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSupplierRelation {
    #[serde(flatten)]
    key: RelationKey,

    /// Total quantity of the component this supplier has delivered to date
    quantity_supplied_to_date: u64,
}

impl ComponentSupplierRelation {
    /// A fresh relation with nothing supplied yet
    pub fn new(key: RelationKey) -> Self {
        Self::with_quantity(key, 0)
    }

    /// Restore a relation with a known running total
    pub fn with_quantity(key: RelationKey, quantity_supplied_to_date: u64) -> Self {
        Self {
            key,
            quantity_supplied_to_date,
        }
    }

    pub fn key(&self) -> RelationKey {
        self.key
    }

    pub fn component_id(&self) -> &EntityId {
        &self.key.component
    }

    pub fn supplier_id(&self) -> &EntityId {
        &self.key.supplier
    }

    pub fn quantity_supplied_to_date(&self) -> u64 {
        self.quantity_supplied_to_date
    }

    /// Add a delivered quantity to the running total
    pub fn add_quantity(&mut self, quantity: u32) {
        self.quantity_supplied_to_date = self
            .quantity_supplied_to_date
            .saturating_add(u64::from(quantity));
    }
}
