//! Stockroom: component, supplier and purchase-order inventory
//!
//! Tracks the components a small manufacturing company keeps in stock, the
//! suppliers that deliver them, and the purchase orders that replenish stock.
//! All operations go through [`core::Company`]; [`core::Store`] keeps the whole
//! state in one YAML file.

pub mod cli;
pub mod core;
pub mod entities;
