//! Ordered entity registries
//!
//! Registries keep entities in insertion order so listings are deterministic.
//! Lookups are linear scans; the expected scale is a few hundred entities.

use serde::Serialize;

use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::entities::{Component, Supplier};

/// An insertion-ordered collection of entities keyed by their ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registry<T> {
    items: Vec<T>,
}

/// The company's components
pub type ComponentList = Registry<Component>;

/// The company's suppliers
pub type SupplierList = Registry<Supplier>;

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity; returns false if one with the same ID is already present
    pub fn insert(&mut self, entity: T) -> bool {
        if self.contains(entity.id()) {
            return false;
        }
        self.items.push(entity);
        true
    }

    /// Append an entity whose ID was just issued and return a reference to it
    pub(crate) fn insert_fresh(&mut self, entity: T) -> &T {
        debug_assert!(!self.contains(entity.id()));
        let index = self.items.len();
        self.items.push(entity);
        &self.items[index]
    }

    /// Find the entity with exactly this ID text
    pub fn search(&self, id: &str) -> Option<&T> {
        let id = EntityId::parse_kind(id, T::KIND).ok()?;
        self.get(&id)
    }

    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut T> {
        self.items.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Entities in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove and return the entity with this ID, keeping the order of the rest
    pub(crate) fn remove(&mut self, id: &EntityId) -> Option<T> {
        let index = self.items.iter().position(|e| e.id() == id)?;
        Some(self.items.remove(index))
    }
}

impl<'a, T: Entity> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
