//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use miette::Result;

use crate::core::entity::Entity;
use crate::entities::{Component, Supplier};

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Trim a user-supplied entity name, rejecting blank ones
pub fn clean_name(raw: &str, noun: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(miette::miette!(
            code = "stockroom::blank_name",
            help = "pass the name as a quoted argument, e.g. \"Hex bolt M6\"",
            "{} name cannot be blank",
            noun
        ));
    }
    Ok(name.to_string())
}

/// "Bolt (C1)"
pub fn component_label(component: &Component) -> String {
    format!("{} ({})", component.name(), component.id())
}

/// "Acme (S1)"
pub fn supplier_label(supplier: &Supplier) -> String {
    format!("{} ({})", supplier.name(), supplier.id())
}

/// "1 order" / "3 orders"
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{EntityId, EntityKind};

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("Schraubenmutter größe", 10), "Schraub...");
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("  Bolt ", "component").unwrap(), "Bolt");
        assert!(clean_name("   ", "component").is_err());
        assert!(clean_name("", "supplier").is_err());
    }

    #[test]
    fn test_labels() {
        let c = Component::new(EntityId::from_parts(EntityKind::Component, 1), "Bolt");
        let s = Supplier::new(EntityId::from_parts(EntityKind::Supplier, 4), "Acme");
        assert_eq!(component_label(&c), "Bolt (C1)");
        assert_eq!(supplier_label(&s), "Acme (S4)");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "order"), "1 order");
        assert_eq!(plural(0, "order"), "0 orders");
        assert_eq!(plural(3, "supplier"), "3 suppliers");
    }
}
