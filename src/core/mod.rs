//! Core module - the inventory domain, persistence and process setup

pub mod company;
pub mod config;
pub mod entity;
pub mod error;
pub mod identity;
pub mod logging;
pub mod pending;
pub mod registry;
pub mod store;

pub use company::{Company, Fulfillment};
pub use config::Config;
pub use entity::Entity;
pub use error::{InventoryError, InventoryResult};
pub use identity::{EntityId, EntityKind, IdGenerator, IdParseError};
pub use pending::PendingOrders;
pub use registry::{ComponentList, Registry, SupplierList};
pub use store::{Opened, Origin, Snapshot, Store, StoreError};
