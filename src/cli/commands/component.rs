//! `stockroom component` command - stocked part management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::commands::utils::Session;
use crate::cli::helpers::{clean_name, component_label, plural};
use crate::cli::table::{print_list, Column, ListTable};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::{Company, InventoryError};
use crate::entities::Component;

#[derive(Subcommand, Debug)]
pub enum ComponentCommands {
    /// Add one component per name
    Add(AddArgs),

    /// List components
    List(ListArgs),

    /// Show a component with its suppliers and pending orders
    Show(ShowArgs),

    /// Take stock out for production
    Assign(AssignArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Component names
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only components whose name contains this text (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only components with stock below this level
    #[arg(long)]
    pub below: Option<u64>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Component ID (e.g. C1)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct AssignArgs {
    /// Component ID (e.g. C1)
    pub id: String,

    /// Quantity to take out of stock
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

const LIST_COLUMNS: [Column; 4] = [
    Column::new("ID", 8),
    Column::new("NAME", 30),
    Column::new("STOCK", 10),
    Column::new("SUPPLIERS", 9),
];

pub fn run(cmd: ComponentCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ComponentCommands::Add(args) => run_add(args, global),
        ComponentCommands::List(args) => run_list(args, global),
        ComponentCommands::Show(args) => run_show(args, global),
        ComponentCommands::Assign(args) => run_assign(args, global),
    }
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let names = args
        .names
        .iter()
        .map(|n| clean_name(n, "component"))
        .collect::<Result<Vec<_>>>()?;

    let mut session = Session::open(global)?;
    let mut added = Vec::with_capacity(names.len());
    for name in names {
        added.push(session.mutate(|c| {
            c.add_component(name)
                .map(|component| (*component.id(), component.name().to_string()))
        })?);
    }
    session.save()?;

    for (id, name) in &added {
        if session.quiet() {
            println!("{}", id);
        } else {
            println!(
                "{} Created component {}",
                style("✓").green(),
                style(id).cyan()
            );
            println!("   Name: {}", style(name).yellow());
        }
    }
    Ok(())
}

/// Components passing the list filters, in creation order
pub fn filter_components<'a>(
    company: &'a Company,
    search: Option<&str>,
    below: Option<u64>,
) -> Vec<&'a Component> {
    let needle = search.map(str::to_lowercase);
    company
        .components()
        .iter()
        .filter(|c| {
            needle
                .as_deref()
                .map_or(true, |n| c.name().to_lowercase().contains(n))
        })
        .filter(|c| below.map_or(true, |level| c.stock() < level))
        .collect()
}

/// Rows for a component listing
pub fn component_table(components: &[&Component]) -> ListTable {
    let mut table = ListTable::new(&LIST_COLUMNS);
    for c in components {
        table.push_row([
            c.id().to_string(),
            c.name().to_string(),
            c.stock().to_string(),
            c.supplier_relations().len().to_string(),
        ]);
    }
    table
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let components = filter_components(session.company(), args.search.as_deref(), args.below);

    if args.count {
        println!("{}", components.len());
        return Ok(());
    }

    let table = component_table(&components);
    print_list(&components, &table, session.format(), "component", session.quiet())
}

/// Component detail for the structured output formats
#[derive(Debug, Serialize)]
pub struct ComponentDetail<'a> {
    pub id: &'a EntityId,
    pub name: &'a str,
    pub stock: u64,
    pub suppliers: Vec<SupplierTotal<'a>>,
    pub pending_orders: Vec<PendingLine<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SupplierTotal<'a> {
    pub id: &'a EntityId,
    pub name: &'a str,
    pub quantity_supplied_to_date: u64,
}

#[derive(Debug, Serialize)]
pub struct PendingLine<'a> {
    pub id: &'a EntityId,
    pub supplier: &'a EntityId,
    pub quantity: u32,
}

impl<'a> ComponentDetail<'a> {
    pub fn new(company: &'a Company, component: &'a Component) -> Self {
        let suppliers = company
            .component_suppliers(component)
            .map(|(s, r)| SupplierTotal {
                id: s.id(),
                name: s.name(),
                quantity_supplied_to_date: r.quantity_supplied_to_date(),
            })
            .collect();
        let pending_orders = company
            .pending_orders()
            .iter()
            .filter(|o| o.component_id() == component.id())
            .map(|o| PendingLine {
                id: o.id(),
                supplier: o.supplier_id(),
                quantity: o.quantity(),
            })
            .collect();
        Self {
            id: component.id(),
            name: component.name(),
            stock: component.stock(),
            suppliers,
            pending_orders,
        }
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let company = session.company();
    let component = company
        .find_component(&args.id)
        .ok_or_else(|| InventoryError::not_found(Component::KIND, &args.id))?;
    let detail = ComponentDetail::new(company, component);

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
        _ => print_detail(&detail),
    }
    Ok(())
}

fn print_detail(detail: &ComponentDetail<'_>) {
    println!("{}", style("─".repeat(60)).dim());
    println!("{}: {}", style("ID").bold(), style(detail.id).cyan());
    println!("{}: {}", style("Name").bold(), style(detail.name).yellow());
    println!("{}: {}", style("Quantity on hand").bold(), detail.stock);
    println!("{}", style("─".repeat(60)).dim());

    println!();
    if detail.suppliers.is_empty() {
        println!("{}: none", style("Suppliers").bold());
    } else {
        println!("{} ({}):", style("Suppliers").bold(), detail.suppliers.len());
        for s in &detail.suppliers {
            println!(
                "  • {}, {} - {} supplied to date",
                s.name,
                style(s.id).cyan(),
                s.quantity_supplied_to_date
            );
        }
    }

    if !detail.pending_orders.is_empty() {
        println!();
        println!(
            "{} ({}):",
            style("Pending orders").bold(),
            detail.pending_orders.len()
        );
        for o in &detail.pending_orders {
            println!(
                "  • {} - {} from {}",
                style(o.id).cyan(),
                o.quantity,
                o.supplier
            );
        }
    }
}

fn run_assign(args: AssignArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = Session::open(global)?;
    let component = session.mutate(|c| c.assign(&args.id, args.quantity).cloned())?;
    let label = component_label(&component);
    let stock = component.stock();
    session.save()?;

    if session.quiet() {
        println!("{}", stock);
    } else {
        println!(
            "{} Assigned {} of {} to production",
            style("✓").green(),
            plural(args.quantity.unsigned_abs() as usize, "unit"),
            style(label).cyan()
        );
        println!("   Quantity on hand: {}", style(stock).yellow());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company() -> Company {
        let mut company = Company::new();
        company.add_component("Hex bolt").unwrap();
        company.add_component("Washer").unwrap();
        company.add_component("Carriage bolt").unwrap();
        company.add_supplier("Acme").unwrap();
        company.associate("C1", "S1").unwrap();
        company.place_order("C1", "S1", 40).unwrap();
        company.fulfill_order("O1").unwrap();
        company.place_order("C1", "S1", 5).unwrap();
        company
    }

    #[test]
    fn test_filter_by_name_is_case_insensitive() {
        let company = company();
        let found = filter_components(&company, Some("BOLT"), None);
        let ids: Vec<String> = found.iter().map(|c| c.id().to_string()).collect();
        assert_eq!(ids, vec!["C1", "C3"]);
    }

    #[test]
    fn test_filter_below_stock_level() {
        let company = company();
        let found = filter_components(&company, None, Some(10));
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|c| c.stock() < 10));
    }

    #[test]
    fn test_detail_lists_suppliers_and_pending_orders() {
        let company = company();
        let component = company.find_component("C1").unwrap();
        let detail = ComponentDetail::new(&company, component);
        assert_eq!(detail.stock, 40);
        assert_eq!(detail.suppliers.len(), 1);
        assert_eq!(detail.suppliers[0].name, "Acme");
        assert_eq!(detail.suppliers[0].quantity_supplied_to_date, 40);
        assert_eq!(detail.pending_orders.len(), 1);
        assert_eq!(detail.pending_orders[0].quantity, 5);
    }

    #[test]
    fn test_table_has_one_row_per_component() {
        let company = company();
        let all = filter_components(&company, None, None);
        let table = component_table(&all);
        assert_eq!(table.ids().collect::<Vec<_>>(), vec!["C1", "C2", "C3"]);
    }
}
