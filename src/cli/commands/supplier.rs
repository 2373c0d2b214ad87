//! `stockroom supplier` command - supplier management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::commands::utils::Session;
use crate::cli::helpers::clean_name;
use crate::cli::table::{print_list, Column, ListTable};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::{Company, InventoryError};
use crate::entities::Supplier;

#[derive(Subcommand, Debug)]
pub enum SupplierCommands {
    /// Add one supplier per name
    Add(AddArgs),

    /// List suppliers
    List(ListArgs),

    /// Show a supplier with the components it supplies
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Supplier names
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only suppliers whose name contains this text (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Supplier ID (e.g. S1)
    pub id: String,
}

const LIST_COLUMNS: [Column; 3] = [
    Column::new("ID", 8),
    Column::new("NAME", 30),
    Column::new("COMPONENTS", 10),
];

pub fn run(cmd: SupplierCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SupplierCommands::Add(args) => run_add(args, global),
        SupplierCommands::List(args) => run_list(args, global),
        SupplierCommands::Show(args) => run_show(args, global),
    }
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let names = args
        .names
        .iter()
        .map(|n| clean_name(n, "supplier"))
        .collect::<Result<Vec<_>>>()?;

    let mut session = Session::open(global)?;
    let mut added = Vec::with_capacity(names.len());
    for name in names {
        added.push(session.mutate(|c| {
            c.add_supplier(name)
                .map(|supplier| (*supplier.id(), supplier.name().to_string()))
        })?);
    }
    session.save()?;

    for (id, name) in &added {
        if session.quiet() {
            println!("{}", id);
        } else {
            println!("{} Created supplier {}", style("✓").green(), style(id).cyan());
            println!("   Name: {}", style(name).yellow());
        }
    }
    Ok(())
}

/// Suppliers whose name matches `search`, in creation order
pub fn filter_suppliers<'a>(company: &'a Company, search: Option<&str>) -> Vec<&'a Supplier> {
    let needle = search.map(str::to_lowercase);
    company
        .suppliers()
        .iter()
        .filter(|s| {
            needle
                .as_deref()
                .map_or(true, |n| s.name().to_lowercase().contains(n))
        })
        .collect()
}

/// Rows for a supplier listing
pub fn supplier_table(suppliers: &[&Supplier]) -> ListTable {
    let mut table = ListTable::new(&LIST_COLUMNS);
    for s in suppliers {
        table.push_row([
            s.id().to_string(),
            s.name().to_string(),
            s.component_relations().len().to_string(),
        ]);
    }
    table
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let suppliers = filter_suppliers(session.company(), args.search.as_deref());

    if args.count {
        println!("{}", suppliers.len());
        return Ok(());
    }

    let table = supplier_table(&suppliers);
    print_list(&suppliers, &table, session.format(), "supplier", session.quiet())
}

/// Supplier detail for the structured output formats
#[derive(Debug, Serialize)]
pub struct SupplierDetail<'a> {
    pub id: &'a EntityId,
    pub name: &'a str,
    pub components: Vec<SuppliedComponent<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SuppliedComponent<'a> {
    pub id: &'a EntityId,
    pub name: &'a str,
    pub quantity_supplied_to_date: u64,
}

impl<'a> SupplierDetail<'a> {
    pub fn new(company: &'a Company, supplier: &'a Supplier) -> Self {
        let components = company
            .supplied_components(supplier)
            .map(|(c, r)| SuppliedComponent {
                id: c.id(),
                name: c.name(),
                quantity_supplied_to_date: r.quantity_supplied_to_date(),
            })
            .collect();
        Self {
            id: supplier.id(),
            name: supplier.name(),
            components,
        }
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let company = session.company();
    let supplier = company
        .find_supplier(&args.id)
        .ok_or_else(|| InventoryError::not_found(Supplier::KIND, &args.id))?;
    let detail = SupplierDetail::new(company, supplier);

    match session.format() {
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&detail).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&detail).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Id => {
            println!("{}", detail.id);
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!("{}: {}", style("ID").bold(), style(detail.id).cyan());
            println!("{}: {}", style("Name").bold(), style(detail.name).yellow());
            println!("{}", style("─".repeat(60)).dim());

            println!();
            if detail.components.is_empty() {
                println!("{}: none", style("Components supplied").bold());
            } else {
                println!(
                    "{} ({}):",
                    style("Components supplied").bold(),
                    detail.components.len()
                );
                for c in &detail.components {
                    println!(
                        "  • {}, {} - {} supplied to date",
                        c.name,
                        style(c.id).cyan(),
                        c.quantity_supplied_to_date
                    );
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_follows_association_order() {
        let mut company = Company::new();
        company.add_component("Bolt").unwrap();
        company.add_component("Nut").unwrap();
        company.add_supplier("Acme").unwrap();
        company.associate("C2", "S1").unwrap();
        company.associate("C1", "S1").unwrap();

        let supplier = company.find_supplier("S1").unwrap();
        let detail = SupplierDetail::new(&company, supplier);
        let names: Vec<&str> = detail.components.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Nut", "Bolt"]);
        assert!(detail.components.iter().all(|c| c.quantity_supplied_to_date == 0));
    }

    #[test]
    fn test_filter_and_table() {
        let mut company = Company::new();
        company.add_supplier("Acme Fasteners").unwrap();
        company.add_supplier("Globex").unwrap();
        company.add_supplier("acme tooling").unwrap();

        let found = filter_suppliers(&company, Some("Acme"));
        let table = supplier_table(&found);
        assert_eq!(table.ids().collect::<Vec<_>>(), vec!["S1", "S3"]);
        assert_eq!(filter_suppliers(&company, None).len(), 3);
    }
}
