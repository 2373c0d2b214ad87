//! Whole-company persistence to a single YAML file
//!
//! The file holds an explicit snapshot: every entity, every relation by foreign key,
//! every pending order and the three ID counters. Counters are stored rather than
//! recomputed because fulfilled orders leave nothing behind to recompute them from.

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::company::Company;
use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityKind, IdGenerator};
use crate::entities::{Component, ComponentSupplierRelation, Order, RelationKey, Supplier};

/// Snapshot format version written by this build
pub const SNAPSHOT_VERSION: u32 = 1;

/// Default data file name, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "CompanyData.yaml";

/// Errors raised while saving or loading company state
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("could not read {path}")]
    #[diagnostic(code(stockroom::store::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {path}")]
    #[diagnostic(code(stockroom::store::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid company snapshot: {message}")]
    #[diagnostic(
        code(stockroom::store::format),
        help("the file must be a YAML document written by `stockroom`")
    )]
    Format { path: PathBuf, message: String },

    #[error("{path} uses unsupported snapshot version {found}")]
    #[diagnostic(code(stockroom::store::version))]
    UnsupportedVersion { path: PathBuf, found: u32 },

    #[error("{path} is inconsistent: {message}")]
    #[diagnostic(code(stockroom::store::integrity))]
    Integrity { path: PathBuf, message: String },
}

/// Positions of the three ID counters (the next sequence number of each kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    pub component: u32,
    pub supplier: u32,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: EntityId,
    pub name: String,
    pub stock: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub component: EntityId,
    pub supplier: EntityId,
    pub quantity_supplied_to_date: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: EntityId,
    pub component: EntityId,
    pub supplier: EntityId,
    pub quantity: u32,
    pub placed_at: DateTime<Utc>,
}

/// The on-disk document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub counters: CounterRecord,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
    #[serde(default)]
    pub suppliers: Vec<SupplierRecord>,
    #[serde(default)]
    pub relations: Vec<RelationRecord>,
    #[serde(default)]
    pub pending_orders: Vec<OrderRecord>,
}

impl Snapshot {
    /// Capture the full state of a company
    pub fn capture(company: &Company) -> Self {
        let ids = company.id_generator();
        Self {
            version: SNAPSHOT_VERSION,
            counters: CounterRecord {
                component: ids.peek(EntityKind::Component),
                supplier: ids.peek(EntityKind::Supplier),
                order: ids.peek(EntityKind::Order),
            },
            components: company
                .components()
                .iter()
                .map(|c| ComponentRecord {
                    id: *c.id(),
                    name: c.name().to_string(),
                    stock: c.stock(),
                })
                .collect(),
            suppliers: company
                .suppliers()
                .iter()
                .map(|s| SupplierRecord {
                    id: *s.id(),
                    name: s.name().to_string(),
                })
                .collect(),
            relations: company
                .relations()
                .iter()
                .map(|r| RelationRecord {
                    component: *r.component_id(),
                    supplier: *r.supplier_id(),
                    quantity_supplied_to_date: r.quantity_supplied_to_date(),
                })
                .collect(),
            pending_orders: company
                .pending_orders()
                .iter()
                .map(|o| OrderRecord {
                    id: *o.id(),
                    component: *o.component_id(),
                    supplier: *o.supplier_id(),
                    quantity: o.quantity(),
                    placed_at: o.placed(),
                })
                .collect(),
        }
    }

    /// Check the snapshot and rebuild the company it describes
    pub fn restore(self, path: &Path) -> Result<Company, StoreError> {
        let integrity = |message: String| StoreError::Integrity {
            path: path.to_path_buf(),
            message,
        };

        if self.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                path: path.to_path_buf(),
                found: self.version,
            });
        }

        for (kind, counter) in [
            (EntityKind::Component, self.counters.component),
            (EntityKind::Supplier, self.counters.supplier),
            (EntityKind::Order, self.counters.order),
        ] {
            if !IdGenerator::is_valid_counter(counter) {
                return Err(integrity(format!("{kind} counter {counter} is out of range")));
            }
        }

        let ids = IdGenerator::from_counters(
            self.counters.component,
            self.counters.supplier,
            self.counters.order,
        );

        let component_ids = collect_ids(
            self.components.iter().map(|c| c.id),
            EntityKind::Component,
            &ids,
        )
        .map_err(&integrity)?;
        let supplier_ids = collect_ids(
            self.suppliers.iter().map(|s| s.id),
            EntityKind::Supplier,
            &ids,
        )
        .map_err(&integrity)?;
        collect_ids(
            self.pending_orders.iter().map(|o| o.id),
            EntityKind::Order,
            &ids,
        )
        .map_err(&integrity)?;

        let mut relation_keys = HashSet::new();
        for rel in &self.relations {
            let key = RelationKey::new(rel.component, rel.supplier);
            if !component_ids.contains(&rel.component) || !supplier_ids.contains(&rel.supplier) {
                return Err(integrity(format!("relation {key} refers to an unknown entity")));
            }
            if !relation_keys.insert(key) {
                return Err(integrity(format!("relation {key} appears more than once")));
            }
        }
        for order in &self.pending_orders {
            let key = RelationKey::new(order.component, order.supplier);
            if !relation_keys.contains(&key) {
                return Err(integrity(format!(
                    "order {} is placed against {key}, which is not an association",
                    order.id
                )));
            }
            if order.quantity == 0 {
                return Err(integrity(format!("order {} has quantity 0", order.id)));
            }
        }

        let components = self
            .components
            .into_iter()
            .map(|c| Component::with_stock(c.id, c.name, c.stock))
            .collect();
        let suppliers = self
            .suppliers
            .into_iter()
            .map(|s| Supplier::new(s.id, s.name))
            .collect();
        let relations = self
            .relations
            .into_iter()
            .map(|r| {
                ComponentSupplierRelation::with_quantity(
                    RelationKey::new(r.component, r.supplier),
                    r.quantity_supplied_to_date,
                )
            })
            .collect();
        let orders = self
            .pending_orders
            .into_iter()
            .map(|o| {
                Order::placed_at(
                    o.id,
                    RelationKey::new(o.component, o.supplier),
                    o.quantity,
                    o.placed_at,
                )
            })
            .collect();

        Ok(Company::restore(ids, components, suppliers, relations, orders))
    }
}

/// Check that ids are unique, of the expected kind, and below the counter
fn collect_ids(
    ids: impl Iterator<Item = EntityId>,
    kind: EntityKind,
    generator: &IdGenerator,
) -> Result<HashSet<EntityId>, String> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.kind() != kind {
            return Err(format!("{id} is listed as a {kind}"));
        }
        if id.seq() >= generator.peek(kind) {
            return Err(format!(
                "{id} is not below the {kind} counter ({}), new IDs would collide",
                generator.peek(kind)
            ));
        }
        if !seen.insert(id) {
            return Err(format!("{id} appears more than once"));
        }
    }
    Ok(seen)
}

/// How the company in an [`Opened`] session came to be
#[derive(Debug)]
pub enum Origin {
    /// Read from the data file
    Loaded,
    /// No data file existed yet
    Fresh,
    /// The data file could not be used; started over with an empty company
    Recovered(StoreError),
}

/// Result of [`Store::open`]
#[derive(Debug)]
pub struct Opened {
    pub company: Company,
    pub origin: Origin,
}

/// A data file holding one company
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Where an unusable data file is moved before it would be overwritten
    pub fn quarantine_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    /// Read and validate the data file
    pub fn load(&self) -> Result<Company, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let snapshot: Snapshot =
            serde_yml::from_str(&content).map_err(|e| StoreError::Format {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        let company = snapshot.restore(&self.path)?;
        debug!(
            path = %self.path.display(),
            components = company.components().len(),
            suppliers = company.suppliers().len(),
            pending = company.pending_orders().len(),
            "company loaded"
        );
        Ok(company)
    }

    /// Load the company, falling back to an empty one when the file is missing or unusable
    pub fn open(&self) -> Opened {
        if !self.exists() {
            debug!(path = %self.path.display(), "no data file, starting a new company");
            return Opened {
                company: Company::new(),
                origin: Origin::Fresh,
            };
        }
        match self.load() {
            Ok(company) => Opened {
                company,
                origin: Origin::Loaded,
            },
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "data file unusable, starting a new company");
                Opened {
                    company: Company::new(),
                    origin: Origin::Recovered(err),
                }
            }
        }
    }

    /// Move an unusable data file aside so a later save does not destroy it
    pub fn quarantine(&self) -> Result<PathBuf, StoreError> {
        let target = self.quarantine_path();
        fs::rename(&self.path, &target).map_err(|source| StoreError::Write {
            path: target.clone(),
            source,
        })?;
        warn!(from = %self.path.display(), to = %target.display(), "moved unusable data file aside");
        Ok(target)
    }

    /// Write the whole company, replacing the previous file in one rename
    pub fn save(&self, company: &Company) -> Result<(), StoreError> {
        let snapshot = Snapshot::capture(company);
        let content = serde_yml::to_string(&snapshot).map_err(|e| StoreError::Format {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut tmp_name = self.path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);
        fs::write(&tmp, content).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), "company saved");
        Ok(())
    }
}
