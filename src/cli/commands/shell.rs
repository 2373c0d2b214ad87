//! `stockroom shell` command - interactive menu over one company
//!
//! Changes are kept in memory until the user picks "Save". Leaving with unsaved
//! changes asks for confirmation first.

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::component::{component_table, filter_components, ComponentDetail};
use crate::cli::commands::order::{filter_orders, order_table, print_relation, FulfillmentView};
use crate::cli::commands::supplier::{filter_suppliers, supplier_table, SupplierDetail};
use crate::cli::commands::utils::Session;
use crate::cli::helpers::clean_name;
use crate::cli::table::print_list;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::Entity;
use crate::core::{InventoryError, InventoryResult};
use crate::entities::{Component, Supplier};

#[derive(clap::Args, Debug)]
pub struct ShellArgs {
    /// Skip the help text shown on start
    #[arg(long)]
    pub no_help: bool,
}

/// Entries of the interactive menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Exit,
    AddComponent,
    AddSupplier,
    Associate,
    Assign,
    PlaceOrder,
    FulfillOrder,
    ShowComponent,
    ShowSupplier,
    ListPendingOrders,
    ListComponents,
    ListSuppliers,
    Save,
    Help,
}

impl MenuAction {
    pub const ALL: [MenuAction; 14] = [
        MenuAction::Exit,
        MenuAction::AddComponent,
        MenuAction::AddSupplier,
        MenuAction::Associate,
        MenuAction::Assign,
        MenuAction::PlaceOrder,
        MenuAction::FulfillOrder,
        MenuAction::ShowComponent,
        MenuAction::ShowSupplier,
        MenuAction::ListPendingOrders,
        MenuAction::ListComponents,
        MenuAction::ListSuppliers,
        MenuAction::Save,
        MenuAction::Help,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Exit => "Exit",
            MenuAction::AddComponent => "Add a component",
            MenuAction::AddSupplier => "Add a supplier",
            MenuAction::Associate => "Add a supplier to a component",
            MenuAction::Assign => "Assign components to production",
            MenuAction::PlaceOrder => "Order components",
            MenuAction::FulfillOrder => "Mark an outstanding order as fulfilled",
            MenuAction::ShowComponent => "Display a component's details",
            MenuAction::ShowSupplier => "Display a supplier's details",
            MenuAction::ListPendingOrders => "Display all outstanding orders",
            MenuAction::ListComponents => "Display all components",
            MenuAction::ListSuppliers => "Display all suppliers",
            MenuAction::Save => "Save data",
            MenuAction::Help => "Help",
        }
    }
}

/// Menu lines printed by "Help"
pub fn help_text() -> String {
    let mut out = format!(
        "Pick one of the {} actions below:\n",
        MenuAction::ALL.len()
    );
    for (i, action) in MenuAction::ALL.iter().enumerate() {
        out.push_str(&format!("  {:>2}  {}\n", i, action.label()));
    }
    out
}

pub fn run(args: ShellArgs, global: &GlobalOpts) -> Result<()> {
    if !Term::stdout().is_term() {
        return Err(miette::miette!(
            code = "stockroom::not_a_terminal",
            help = "use the one-shot subcommands (component, supplier, link, order) in scripts",
            "the interactive shell needs a terminal"
        ));
    }

    let mut session = Session::open(global)?;
    let theme = ColorfulTheme::default();

    if session.store().exists() {
        println!("Working on {}", style(session.store().path().display()).cyan());
    } else {
        println!(
            "No data file yet; {} will be created on save.",
            style(session.store().path().display()).cyan()
        );
    }
    if !args.no_help {
        print!("{}", help_text());
    }

    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
    loop {
        println!();
        let choice = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact()
            .into_diagnostic()?;
        let action = MenuAction::ALL[choice];

        if action == MenuAction::Exit {
            if session.is_dirty() && confirm_save(&theme)? {
                session.save()?;
                println!("{} Saved", style("✓").green());
            }
            return Ok(());
        }

        if let Err(err) = dispatch(action, &mut session, &theme) {
            eprintln!("{} {:?}", style("✗").red(), err);
        }
    }
}

fn confirm_save(theme: &ColorfulTheme) -> Result<bool> {
    Confirm::with_theme(theme)
        .with_prompt("Save changes before exiting?")
        .default(true)
        .interact()
        .into_diagnostic()
}

fn dispatch(action: MenuAction, session: &mut Session, theme: &ColorfulTheme) -> Result<()> {
    match action {
        MenuAction::Exit => Ok(()),
        MenuAction::AddComponent => {
            let name = clean_name(&prompt(theme, "Component name")?, "component")?;
            let component = session.mutate(|c| c.add_component(name).cloned())?;
            println!("{} {}", style("✓").green(), component);
            Ok(())
        }
        MenuAction::AddSupplier => {
            let name = clean_name(&prompt(theme, "Supplier name")?, "supplier")?;
            let supplier = session.mutate(|c| c.add_supplier(name).cloned())?;
            println!("{} {}", style("✓").green(), supplier);
            Ok(())
        }
        MenuAction::Associate => {
            let component = prompt(theme, "Component ID")?;
            let supplier = prompt(theme, "Supplier ID")?;
            session.mutate(|c| c.associate(&component, &supplier).map(|_| ()))?;
            println!(
                "{} Component-supplier relationship created",
                style("✓").green()
            );
            Ok(())
        }
        MenuAction::Assign => {
            let component = prompt(theme, "Component ID")?;
            require_component(session, &component)?;
            let quantity = prompt_quantity(theme)?;
            let component = session.mutate(|c| c.assign(&component, quantity).cloned())?;
            println!("{} Assignment successful", style("✓").green());
            println!("   {}", component);
            Ok(())
        }
        MenuAction::PlaceOrder => {
            let component = prompt(theme, "Component ID")?;
            require_component(session, &component)?;
            let supplier = prompt(theme, "Supplier ID")?;
            session.company().find_relation(&component, &supplier)?;
            let quantity = prompt_quantity(theme)?;
            let order = session.mutate(|c| {
                c.place_order(&component, &supplier, quantity)
                    .cloned()
            })?;
            println!("{} Order created", style("✓").green());
            println!("   {}", order);
            Ok(())
        }
        MenuAction::FulfillOrder => {
            let order = prompt(theme, "Order ID")?;
            let fulfillment = session.mutate(|c| c.fulfill_order(&order))?;
            let view = FulfillmentView::new(session.company(), &fulfillment);
            println!("{} Order {} fulfilled", style("✓").green(), view.order.id());
            print_relation(&view);
            Ok(())
        }
        MenuAction::ShowComponent => {
            let id = prompt(theme, "Component ID")?;
            let company = session.company();
            let component = require_component(session, &id)?;
            let detail = ComponentDetail::new(company, component);
            println!("{}", component);
            println!("Suppliers:");
            for s in &detail.suppliers {
                println!("  {}, {}", s.name, s.id);
            }
            Ok(())
        }
        MenuAction::ShowSupplier => {
            let id = prompt(theme, "Supplier ID")?;
            let company = session.company();
            let supplier = require_supplier(session, &id)?;
            let detail = SupplierDetail::new(company, supplier);
            println!("{}", supplier);
            println!("Components supplied:");
            for c in &detail.components {
                println!("  {}, {}", c.name, c.id);
            }
            Ok(())
        }
        MenuAction::ListPendingOrders => {
            let orders = filter_orders(session.company(), None, None);
            print_list(&orders, &order_table(&orders), OutputFormat::Tsv, "pending order", false)
        }
        MenuAction::ListComponents => {
            let components = filter_components(session.company(), None, None);
            print_list(
                &components,
                &component_table(&components),
                OutputFormat::Tsv,
                "component",
                false,
            )
        }
        MenuAction::ListSuppliers => {
            let suppliers = filter_suppliers(session.company(), None);
            print_list(
                &suppliers,
                &supplier_table(&suppliers),
                OutputFormat::Tsv,
                "supplier",
                false,
            )
        }
        MenuAction::Save => {
            session.save()?;
            println!(
                "{} Saved to {}",
                style("✓").green(),
                style(session.store().path().display()).cyan()
            );
            Ok(())
        }
        MenuAction::Help => {
            print!("{}", help_text());
            Ok(())
        }
    }
}

fn prompt(theme: &ColorfulTheme, label: &str) -> Result<String> {
    let value: String = Input::with_theme(theme)
        .with_prompt(label)
        .interact_text()
        .into_diagnostic()?;
    Ok(value.trim().to_string())
}

/// Ask until the answer is a whole number; range checks are left to the company
fn prompt_quantity(theme: &ColorfulTheme) -> Result<i64> {
    Input::<i64>::with_theme(theme)
        .with_prompt("Quantity")
        .interact_text()
        .into_diagnostic()
}

/// Fail early on an unknown component so the user is not asked for the rest
fn require_component<'a>(session: &'a Session, id: &str) -> InventoryResult<&'a Component> {
    session
        .company()
        .find_component(id)
        .ok_or_else(|| InventoryError::not_found(Component::KIND, id))
}

fn require_supplier<'a>(session: &'a Session, id: &str) -> InventoryResult<&'a Supplier> {
    session
        .company()
        .find_supplier(id)
        .ok_or_else(|| InventoryError::not_found(Supplier::KIND, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_has_fourteen_actions_starting_with_exit() {
        assert_eq!(MenuAction::ALL.len(), 14);
        assert_eq!(MenuAction::ALL[0], MenuAction::Exit);
        assert_eq!(MenuAction::ALL[13], MenuAction::Help);
    }

    #[test]
    fn test_help_lists_every_action() {
        let help = help_text();
        for action in MenuAction::ALL {
            assert!(help.contains(action.label()));
        }
        assert!(help.contains(" 0  Exit"));
        assert!(help.contains("13  Help"));
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 14);
    }
}
