//! Entity identity system using kind-prefixed sequence numbers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Entity kinds that carry their own identifier sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Component (a stocked part)
    Component,
    /// Supplier (an external vendor)
    Supplier,
    /// Purchase order
    Order,
}

impl EntityKind {
    /// The single-letter marker that starts every identifier of this kind
    pub fn marker(&self) -> char {
        match self {
            EntityKind::Component => 'C',
            EntityKind::Supplier => 'S',
            EntityKind::Order => 'O',
        }
    }

    /// Human readable name, used in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Component => "component",
            EntityKind::Supplier => "supplier",
            EntityKind::Order => "order",
        }
    }

    /// Get all kinds
    pub fn all() -> &'static [EntityKind] {
        &[EntityKind::Component, EntityKind::Supplier, EntityKind::Order]
    }

    /// Look up a kind by its marker letter (exact, uppercase only)
    pub fn from_marker(marker: char) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.marker() == marker)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A unique entity identifier: a kind marker followed by a sequence number (`C1`, `S4`, `O12`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    kind: EntityKind,
    seq: u32,
}

impl EntityId {
    /// Create an EntityId from a kind and a sequence number
    pub fn from_parts(kind: EntityKind, seq: u32) -> Self {
        Self { kind, seq }
    }

    /// Get the entity kind
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Get the sequence number
    pub fn seq(&self) -> u32 {
        self.seq
    }

    /// Parse an EntityId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }

    /// Parse an EntityId and require it to be of the given kind
    pub fn parse_kind(s: &str, kind: EntityKind) -> Result<Self, IdParseError> {
        let id = Self::parse(s)?;
        if id.kind != kind {
            return Err(IdParseError::WrongKind {
                id: s.to_string(),
                expected: kind,
            });
        }
        Ok(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.marker(), self.seq)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let marker = chars.next().ok_or(IdParseError::Empty)?;
        let kind = EntityKind::from_marker(marker)
            .ok_or_else(|| IdParseError::InvalidMarker(s.to_string()))?;

        let digits = chars.as_str();
        // u32::from_str accepts a leading '+' and zero padding, identifiers don't
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(IdParseError::InvalidSequence(s.to_string()));
        }
        let seq: u32 = digits
            .parse()
            .map_err(|_| IdParseError::InvalidSequence(s.to_string()))?;

        Ok(Self { kind, seq })
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing entity IDs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("empty entity ID")]
    Empty,

    #[error("invalid entity ID '{0}': must start with C, S or O")]
    InvalidMarker(String),

    #[error("invalid entity ID '{0}': expected a sequence number starting at 1 after the marker")]
    InvalidSequence(String),

    #[error("'{id}' is not a {expected} ID")]
    WrongKind { id: String, expected: EntityKind },
}

/// Issues identifiers, one independent counter per entity kind.
///
/// Each counter holds the *next* sequence number to hand out. Counters are persisted
/// with the rest of the company state; they cannot be rebuilt from the surviving
/// entities because fulfilled orders leave no trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    component: u32,
    supplier: u32,
    order: u32,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Create a generator with every counter at 1
    pub fn new() -> Self {
        Self {
            component: 1,
            supplier: 1,
            order: 1,
        }
    }

    /// Restore a generator from persisted counter positions
    pub fn from_counters(component: u32, supplier: u32, order: u32) -> Self {
        Self {
            component,
            supplier,
            order,
        }
    }

    pub fn next_component_id(&mut self) -> Option<EntityId> {
        self.next(EntityKind::Component)
    }

    pub fn next_supplier_id(&mut self) -> Option<EntityId> {
        self.next(EntityKind::Supplier)
    }

    pub fn next_order_id(&mut self) -> Option<EntityId> {
        self.next(EntityKind::Order)
    }

    /// Return the current counter value for `kind` as an id, then advance the counter.
    ///
    /// `None` once the sequence is exhausted; the counter is left where it is.
    pub fn next(&mut self, kind: EntityKind) -> Option<EntityId> {
        let counter = self.counter_mut(kind);
        let seq = *counter;
        if !Self::is_valid_counter(seq) {
            return None;
        }
        *counter = seq.checked_add(1)?;
        Some(EntityId::from_parts(kind, seq))
    }

    /// Whether a counter position can still issue an id (sequences start at 1)
    pub fn is_valid_counter(counter: u32) -> bool {
        counter >= 1 && counter < u32::MAX
    }

    /// The sequence number the next id of `kind` will get
    pub fn peek(&self, kind: EntityKind) -> u32 {
        match kind {
            EntityKind::Component => self.component,
            EntityKind::Supplier => self.supplier,
            EntityKind::Order => self.order,
        }
    }

    fn counter_mut(&mut self, kind: EntityKind) -> &mut u32 {
        match kind {
            EntityKind::Component => &mut self.component,
            EntityKind::Supplier => &mut self.supplier,
            EntityKind::Order => &mut self.order,
        }
    }
}
