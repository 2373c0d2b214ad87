//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, component::ComponentCommands, link::LinkArgs,
    order::OrderCommands, shell::ShellArgs, supplier::SupplierCommands,
};

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about = "Component, supplier and purchase order inventory")]
#[command(long_about = "Track components, the suppliers that provide them, stock on hand and the purchase orders that replenish it. State is kept in a single YAML data file.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Data file (default: config `data_file`, then ./CompanyData.yaml)
    #[arg(long, global = true, env = "STOCKROOM_DATA")]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Component management (stocked parts)
    #[command(subcommand)]
    Component(ComponentCommands),

    /// Supplier management
    #[command(subcommand)]
    Supplier(SupplierCommands),

    /// Record that a supplier supplies a component
    Link(LinkArgs),

    /// Purchase order management
    #[command(subcommand)]
    Order(OrderCommands),

    /// Interactive menu over the whole company
    Shell(ShellArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (pretty for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// JSON format (for programming)
    Json,
    /// Tab-separated values (for piping)
    Tsv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
