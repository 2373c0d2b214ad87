//! `stockroom order` command - purchase order placement and fulfillment

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::commands::utils::Session;
use crate::cli::table::{print_list, Column, ListTable};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::Entity;
use crate::core::{Company, Fulfillment};
use crate::entities::Order;

#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// Order a quantity of a component from a linked supplier
    Place(PlaceArgs),

    /// Mark a pending order as delivered and add it to stock
    Fulfill(FulfillArgs),

    /// List pending orders
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct PlaceArgs {
    /// Component ID (e.g. C1)
    pub component: String,

    /// Supplier ID (e.g. S1)
    pub supplier: String,

    /// Quantity to order
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

#[derive(clap::Args, Debug)]
pub struct FulfillArgs {
    /// Order ID (e.g. O1)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only orders for this component
    #[arg(long, short = 'c')]
    pub component: Option<String>,

    /// Only orders from this supplier
    #[arg(long, short = 's')]
    pub supplier: Option<String>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

const LIST_COLUMNS: [Column; 5] = [
    Column::new("ID", 8),
    Column::new("COMPONENT", 10),
    Column::new("SUPPLIER", 10),
    Column::new("QTY", 10),
    Column::new("PLACED", 16),
];

pub fn run(cmd: OrderCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        OrderCommands::Place(args) => run_place(args, global),
        OrderCommands::Fulfill(args) => run_fulfill(args, global),
        OrderCommands::List(args) => run_list(args, global),
    }
}

fn run_place(args: PlaceArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = Session::open(global)?;
    let order = session.mutate(|c| {
        c.place_order(&args.component, &args.supplier, args.quantity)
            .cloned()
    })?;
    session.save()?;

    match session.format() {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&order).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&order).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ if session.quiet() => println!("{}", order.id()),
        _ => {
            println!("{} Created order {}", style("✓").green(), style(order.id()).cyan());
            println!("   {}", order);
        }
    }
    Ok(())
}

/// Fulfillment result for the structured output formats
#[derive(Debug, Serialize)]
pub struct FulfillmentView<'a> {
    pub order: &'a Order,
    pub component_name: &'a str,
    pub supplier_name: &'a str,
    pub quantity_supplied_to_date: u64,
    pub stock: u64,
}

impl<'a> FulfillmentView<'a> {
    pub fn new(company: &'a Company, fulfillment: &'a Fulfillment) -> Self {
        let component_name = company
            .components()
            .get(fulfillment.order.component_id())
            .map_or("", |c| c.name());
        let supplier_name = company
            .suppliers()
            .get(fulfillment.order.supplier_id())
            .map_or("", |s| s.name());
        Self {
            order: &fulfillment.order,
            component_name,
            supplier_name,
            quantity_supplied_to_date: fulfillment.relation.quantity_supplied_to_date(),
            stock: fulfillment.stock,
        }
    }
}

fn run_fulfill(args: FulfillArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = Session::open(global)?;
    let fulfillment = session.mutate(|c| c.fulfill_order(&args.id))?;
    session.save()?;

    let view = FulfillmentView::new(session.company(), &fulfillment);
    match session.format() {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&view).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&view).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ if session.quiet() => println!("{}", view.stock),
        _ => {
            println!(
                "{} Fulfilled order {}: {} received",
                style("✓").green(),
                style(view.order.id()).cyan(),
                view.order.quantity()
            );
            print_relation(&view);
        }
    }
    Ok(())
}

/// Relation summary shown after a delivery
pub fn print_relation(view: &FulfillmentView<'_>) {
    println!(
        "   Component: {} ({})",
        view.component_name,
        view.order.component_id()
    );
    println!(
        "   Supplier: {} ({})",
        view.supplier_name,
        view.order.supplier_id()
    );
    println!(
        "   Total quantity received from {}: {}",
        view.supplier_name,
        style(view.quantity_supplied_to_date).yellow()
    );
    println!("   Quantity on hand: {}", style(view.stock).yellow());
}

/// Pending orders matching the optional component/supplier filters, oldest first
pub fn filter_orders<'a>(
    company: &'a Company,
    component: Option<&str>,
    supplier: Option<&str>,
) -> Vec<&'a Order> {
    company
        .pending_orders()
        .iter()
        .filter(|o| component.map_or(true, |c| o.component_id().to_string() == c))
        .filter(|o| supplier.map_or(true, |s| o.supplier_id().to_string() == s))
        .collect()
}

/// Rows for a pending-order listing
pub fn order_table(orders: &[&Order]) -> ListTable {
    let mut table = ListTable::new(&LIST_COLUMNS);
    for o in orders {
        table.push_row([
            o.id().to_string(),
            o.component_id().to_string(),
            o.supplier_id().to_string(),
            o.quantity().to_string(),
            o.placed().format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    table
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let orders = filter_orders(
        session.company(),
        args.component.as_deref(),
        args.supplier.as_deref(),
    );

    if args.count {
        println!("{}", orders.len());
        return Ok(());
    }

    let table = order_table(&orders);
    print_list(&orders, &table, session.format(), "pending order", session.quiet())
}
