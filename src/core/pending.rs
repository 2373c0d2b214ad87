//! Queue of outstanding purchase orders

use serde::Serialize;

use crate::core::identity::EntityId;
use crate::core::registry::Registry;
use crate::entities::{Order, RelationKey};

/// Orders placed but not yet fulfilled, in placement order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PendingOrders {
    orders: Registry<Order>,
}

impl PendingOrders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an order; returns false if an order with the same ID is already pending
    pub fn insert(&mut self, order: Order) -> bool {
        self.orders.insert(order)
    }

    pub(crate) fn insert_fresh(&mut self, order: Order) -> &Order {
        self.orders.insert_fresh(order)
    }

    /// Find a pending order by its exact ID text
    pub fn search(&self, id: &str) -> Option<&Order> {
        self.orders.search(id)
    }

    pub fn get(&self, id: &EntityId) -> Option<&Order> {
        self.orders.get(id)
    }

    /// Take an order out of the queue; it is returned to the caller exactly once
    pub fn remove(&mut self, id: &EntityId) -> Option<Order> {
        self.orders.remove(id)
    }

    /// Pending orders placed against one relation
    pub fn for_relation(&self, key: RelationKey) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(move |o| o.relation() == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl<'a> IntoIterator for &'a PendingOrders {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityKind;

    fn order(seq: u32, qty: u32) -> Order {
        let key = RelationKey::new(
            EntityId::from_parts(EntityKind::Component, 1),
            EntityId::from_parts(EntityKind::Supplier, 1),
        );
        Order::new(EntityId::from_parts(EntityKind::Order, seq), key, qty)
    }

    #[test]
    fn test_orders_are_consumed_once() {
        let mut pending = PendingOrders::new();
        pending.insert(order(1, 10));
        pending.insert(order(2, 20));

        let id = EntityId::from_parts(EntityKind::Order, 1);
        let taken = pending.remove(&id).unwrap();
        assert_eq!(taken.quantity(), 10);
        assert!(pending.remove(&id).is_none());
        assert!(pending.search("O1").is_none());
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_for_relation() {
        let mut pending = PendingOrders::new();
        pending.insert(order(1, 10));
        pending.insert(order(2, 20));
        let key = order(9, 1).relation();
        assert_eq!(pending.for_relation(key).count(), 2);
    }
}
