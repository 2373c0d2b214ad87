//! Inventory error model

use miette::Diagnostic;
use thiserror::Error;

use crate::core::identity::EntityKind;
use crate::core::store::StoreError;

/// Result type used by the company facade
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Failures reported by company operations.
///
/// Every variant is an ordinary, recoverable result for the caller to report.
#[derive(Debug, Error, Diagnostic)]
pub enum InventoryError {
    #[error("{kind} '{id}' does not exist")]
    #[diagnostic(code(stockroom::not_found))]
    NotFound { kind: EntityKind, id: String },

    #[error("supplier {supplier} does not supply component {component}")]
    #[diagnostic(
        code(stockroom::relation_not_found),
        help("associate the component and supplier first with `stockroom link`")
    )]
    RelationNotFound { component: String, supplier: String },

    #[error("invalid quantity {0}: quantity must be at least 1")]
    #[diagnostic(code(stockroom::invalid_quantity))]
    InvalidQuantity(i64),

    #[error("supplier {supplier} is already associated with component {component}")]
    #[diagnostic(code(stockroom::duplicate_relation))]
    DuplicateRelation { component: String, supplier: String },

    #[error("cannot assign {requested} of component {component}: only {on_hand} on hand")]
    #[diagnostic(code(stockroom::insufficient_stock))]
    InsufficientStock {
        component: String,
        requested: u32,
        on_hand: u64,
    },

    #[error("no {kind} ids left to issue")]
    #[diagnostic(code(stockroom::ids_exhausted))]
    IdsExhausted { kind: EntityKind },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Persistence(#[from] StoreError),
}

impl InventoryError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Whether this error means something the caller referred to does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::RelationNotFound { .. })
    }
}

/// Validate a caller-supplied quantity
pub fn validate_quantity(quantity: i64) -> InventoryResult<u32> {
    if quantity < 1 {
        return Err(InventoryError::InvalidQuantity(quantity));
    }
    u32::try_from(quantity).map_err(|_| InventoryError::InvalidQuantity(quantity))
}
