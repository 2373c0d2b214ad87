//! Entity type definitions
//!
//! - [`Component`] - Stocked parts with an on-hand quantity
//! - [`Supplier`] - External vendors
//! - [`ComponentSupplierRelation`] - Which supplier supplies which component, with a running total
//! - [`Order`] - Pending purchase orders against a relation

pub mod component;
pub mod order;
pub mod relation;
pub mod supplier;

pub use component::Component;
pub use order::Order;
pub use relation::{ComponentSupplierRelation, RelationKey};
pub use supplier::Supplier;
