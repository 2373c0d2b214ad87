//! Order entity type - a purchase request against one component-supplier relation

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityKind};
use crate::entities::relation::RelationKey;

/// A pending purchase order.
///
/// The quantity is fixed at creation. An order only exists while pending; fulfillment
/// moves it out of the pending queue and hands it back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: EntityId,

    #[serde(flatten)]
    relation: RelationKey,

    quantity: u32,

    placed_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: EntityId, relation: RelationKey, quantity: u32) -> Self {
        Self::placed_at(id, relation, quantity, Utc::now())
    }

    /// Restore an order with its original placement time
    pub fn placed_at(
        id: EntityId,
        relation: RelationKey,
        quantity: u32,
        placed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            relation,
            quantity,
            placed_at,
        }
    }

    pub fn relation(&self) -> RelationKey {
        self.relation
    }

    pub fn component_id(&self) -> &EntityId {
        &self.relation.component
    }

    pub fn supplier_id(&self) -> &EntityId {
        &self.relation.supplier
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn placed(&self) -> DateTime<Utc> {
        self.placed_at
    }
}

impl Entity for Order {
    const KIND: EntityKind = EntityKind::Order;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order number: {} | Component: {} | Supplier: {} | Quantity ordered: {}",
            self.id, self.relation.component, self.relation.supplier, self.quantity
        )
    }
}
