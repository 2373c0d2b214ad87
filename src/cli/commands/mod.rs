//! CLI command implementations

pub mod utils;

pub mod completions;
pub mod component;
pub mod link;
pub mod order;
pub mod shell;
pub mod supplier;
