//! Company facade - the single entry point for inventory operations
//!
//! The [`Company`] owns the component and supplier registries, the relation table,
//! the pending-order queue and the ID generator. Callers (the CLI, the interactive
//! shell, the store) never touch those collections directly.
//!
//! Every operation validates its inputs before mutating anything, so a failed call
//! leaves the company unchanged.

use tracing::{debug, info};

use crate::core::entity::Entity;
use crate::core::error::{validate_quantity, InventoryError, InventoryResult};
use crate::core::identity::{EntityId, EntityKind, IdGenerator};
use crate::core::pending::PendingOrders;
use crate::core::registry::{ComponentList, SupplierList};
use crate::entities::{Component, ComponentSupplierRelation, Order, RelationKey, Supplier};

/// Outcome of fulfilling an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fulfillment {
    /// The order, now removed from the pending queue
    pub order: Order,
    /// The relation after its running total was updated
    pub relation: ComponentSupplierRelation,
    /// The component's stock after the delivery
    pub stock: u64,
}

/// The whole inventory state of one company
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Company {
    ids: IdGenerator,
    components: ComponentList,
    suppliers: SupplierList,
    relations: Vec<ComponentSupplierRelation>,
    pending: PendingOrders,
}

impl Company {
    /// An empty company; every ID sequence starts at 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a company from already-validated parts.
    ///
    /// Relation keys are wired into both the component and the supplier side here,
    /// so the entities passed in are expected to have empty relation sets.
    pub(crate) fn restore(
        ids: IdGenerator,
        components: Vec<Component>,
        suppliers: Vec<Supplier>,
        relations: Vec<ComponentSupplierRelation>,
        orders: Vec<Order>,
    ) -> Self {
        let mut company = Self {
            ids,
            ..Self::default()
        };
        for component in components {
            company.components.insert(component);
        }
        for supplier in suppliers {
            company.suppliers.insert(supplier);
        }
        for relation in relations {
            let key = relation.key();
            if let Some(component) = company.components.get_mut(&key.component) {
                component.add_supplier_relation(key);
            }
            if let Some(supplier) = company.suppliers.get_mut(&key.supplier) {
                supplier.add_component_relation(key);
            }
            company.relations.push(relation);
        }
        for order in orders {
            company.pending.insert(order);
        }
        company
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Create a component with a fresh ID and zero stock
    pub fn add_component(&mut self, name: impl Into<String>) -> InventoryResult<&Component> {
        let id = self.ids.next_component_id().ok_or(InventoryError::IdsExhausted {
            kind: EntityKind::Component,
        })?;
        let component = Component::new(id, name);
        debug!(component = %id, name = component.name(), "component added");
        Ok(self.components.insert_fresh(component))
    }

    /// Create a supplier with a fresh ID
    pub fn add_supplier(&mut self, name: impl Into<String>) -> InventoryResult<&Supplier> {
        let id = self.ids.next_supplier_id().ok_or(InventoryError::IdsExhausted {
            kind: EntityKind::Supplier,
        })?;
        let supplier = Supplier::new(id, name);
        debug!(supplier = %id, name = supplier.name(), "supplier added");
        Ok(self.suppliers.insert_fresh(supplier))
    }

    pub fn find_component(&self, id: &str) -> Option<&Component> {
        self.components.search(id)
    }

    pub fn find_supplier(&self, id: &str) -> Option<&Supplier> {
        self.suppliers.search(id)
    }

    pub fn find_order(&self, id: &str) -> Option<&Order> {
        self.pending.search(id)
    }

    // =========================================================================
    // Relations
    // =========================================================================

    /// Record that `supplier` supplies `component`.
    ///
    /// Both relation sets are checked before either is touched: the pair ends up
    /// on both sides or on neither.
    pub fn associate(
        &mut self,
        component: &str,
        supplier: &str,
    ) -> InventoryResult<&ComponentSupplierRelation> {
        let component_id = self.component_id(component)?;
        let supplier_id = self.supplier_id(supplier)?;
        let key = RelationKey::new(component_id, supplier_id);

        let on_component = self
            .components
            .get(&component_id)
            .is_some_and(|c| c.has_supplier_relation(&key));
        let on_supplier = self
            .suppliers
            .get(&supplier_id)
            .is_some_and(|s| s.has_component_relation(&key));
        if on_component || on_supplier || self.relation(key).is_some() {
            return Err(InventoryError::DuplicateRelation {
                component: component_id.to_string(),
                supplier: supplier_id.to_string(),
            });
        }

        if let Some(c) = self.components.get_mut(&component_id) {
            c.add_supplier_relation(key);
        }
        if let Some(s) = self.suppliers.get_mut(&supplier_id) {
            s.add_component_relation(key);
        }
        debug!(component = %component_id, supplier = %supplier_id, "relation created");

        let index = self.relations.len();
        self.relations.push(ComponentSupplierRelation::new(key));
        Ok(&self.relations[index])
    }

    /// The relation between `component` and `supplier`
    pub fn find_relation(
        &self,
        component: &str,
        supplier: &str,
    ) -> InventoryResult<&ComponentSupplierRelation> {
        let component_id = self.component_id(component)?;
        let supplier_id = self.supplier_id(supplier)?;
        self.components
            .get(&component_id)
            .and_then(|c| c.relation_with(&supplier_id))
            .and_then(|key| self.relation(key))
            .ok_or_else(|| InventoryError::RelationNotFound {
                component: component_id.to_string(),
                supplier: supplier_id.to_string(),
            })
    }

    /// Look up a relation record by its key
    pub fn relation(&self, key: RelationKey) -> Option<&ComponentSupplierRelation> {
        self.relations.iter().find(|r| r.key() == key)
    }

    /// Suppliers of a component with the matching relation, in association order
    pub fn component_suppliers<'a>(
        &'a self,
        component: &'a Component,
    ) -> impl Iterator<Item = (&'a Supplier, &'a ComponentSupplierRelation)> + 'a {
        component.supplier_relations().iter().filter_map(move |key| {
            Some((self.suppliers.get(&key.supplier)?, self.relation(*key)?))
        })
    }

    /// Components a supplier supplies with the matching relation, in association order
    pub fn supplied_components<'a>(
        &'a self,
        supplier: &'a Supplier,
    ) -> impl Iterator<Item = (&'a Component, &'a ComponentSupplierRelation)> + 'a {
        supplier.component_relations().iter().filter_map(move |key| {
            Some((self.components.get(&key.component)?, self.relation(*key)?))
        })
    }

    // =========================================================================
    // Stock and orders
    // =========================================================================

    /// Take `quantity` units of a component out of stock for production
    pub fn assign(&mut self, component: &str, quantity: i64) -> InventoryResult<&Component> {
        let quantity = validate_quantity(quantity)?;
        let id = self.component_id(component)?;
        let Some(c) = self.components.get_mut(&id) else {
            return Err(InventoryError::not_found(EntityKind::Component, component));
        };

        if !c.assign(quantity) {
            return Err(InventoryError::InsufficientStock {
                component: id.to_string(),
                requested: quantity,
                on_hand: c.stock(),
            });
        }
        debug!(component = %id, quantity, stock = c.stock(), "stock assigned");
        Ok(&*c)
    }

    /// Place an order for `quantity` units of `component` from `supplier`.
    ///
    /// The pair must already be associated. No order ID is used up on failure.
    pub fn place_order(
        &mut self,
        component: &str,
        supplier: &str,
        quantity: i64,
    ) -> InventoryResult<&Order> {
        let quantity = validate_quantity(quantity)?;
        let key = self.find_relation(component, supplier)?.key();

        let id = self.ids.next_order_id().ok_or(InventoryError::IdsExhausted {
            kind: EntityKind::Order,
        })?;
        info!(order = %id, relation = %key, quantity, "order placed");
        Ok(self.pending.insert_fresh(Order::new(id, key, quantity)))
    }

    /// Mark a pending order as delivered.
    ///
    /// Adds the order quantity to the relation's running total and to the
    /// component's stock, then drops the order from the pending queue.
    pub fn fulfill_order(&mut self, order: &str) -> InventoryResult<Fulfillment> {
        let not_found = || InventoryError::not_found(EntityKind::Order, order);
        let id = *self.pending.search(order).ok_or_else(not_found)?.id();
        let key = self.pending.get(&id).ok_or_else(not_found)?.relation();

        let relation_index = self
            .relations
            .iter()
            .position(|r| r.key() == key)
            .ok_or_else(|| InventoryError::RelationNotFound {
                component: key.component.to_string(),
                supplier: key.supplier.to_string(),
            })?;
        if !self.components.contains(&key.component) {
            return Err(InventoryError::not_found(
                EntityKind::Component,
                key.component.to_string(),
            ));
        }

        // Everything is resolved; the mutations below cannot fail
        let order = self.pending.remove(&id).ok_or_else(not_found)?;
        let quantity = order.quantity();

        let relation = &mut self.relations[relation_index];
        relation.add_quantity(quantity);
        let relation = relation.clone();

        let mut stock = 0;
        if let Some(component) = self.components.get_mut(&key.component) {
            component.add_to_stock(quantity);
            stock = component.stock();
        }

        info!(
            order = %id,
            relation = %key,
            quantity,
            stock,
            supplied_to_date = relation.quantity_supplied_to_date(),
            "order fulfilled"
        );

        Ok(Fulfillment {
            order,
            relation,
            stock,
        })
    }

    // =========================================================================
    // Read-only views
    // =========================================================================

    pub fn components(&self) -> &ComponentList {
        &self.components
    }

    pub fn suppliers(&self) -> &SupplierList {
        &self.suppliers
    }

    pub fn pending_orders(&self) -> &PendingOrders {
        &self.pending
    }

    /// All relations in creation order
    pub fn relations(&self) -> &[ComponentSupplierRelation] {
        &self.relations
    }

    pub fn id_generator(&self) -> &IdGenerator {
        &self.ids
    }

    fn component_id(&self, id: &str) -> InventoryResult<EntityId> {
        self.components
            .search(id)
            .map(|c| *c.id())
            .ok_or_else(|| InventoryError::not_found(EntityKind::Component, id))
    }

    fn supplier_id(&self, id: &str) -> InventoryResult<EntityId> {
        self.suppliers
            .search(id)
            .map(|s| *s.id())
            .ok_or_else(|| InventoryError::not_found(EntityKind::Supplier, id))
    }
}
