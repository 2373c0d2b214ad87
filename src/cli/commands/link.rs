//! `stockroom link` command - associate a component with a supplier

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::commands::utils::Session;
use crate::cli::helpers::{component_label, supplier_label};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
#[command(after_help = "\
A component can be ordered from a supplier only once the two are linked.
Each pair can be linked once; links are never removed.

EXAMPLES:
  stockroom link C1 S1                 # Acme (S1) supplies Bolt (C1)
  stockroom order place C1 S1 100      # now orders can be placed")]
pub struct LinkArgs {
    /// Component ID (e.g. C1)
    pub component: String,

    /// Supplier ID (e.g. S1)
    pub supplier: String,
}

#[derive(Debug, Serialize)]
struct Linked {
    component: String,
    supplier: String,
    quantity_supplied_to_date: u64,
}

pub fn run(args: LinkArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = Session::open(global)?;
    let relation = session.mutate(|c| c.associate(&args.component, &args.supplier).cloned())?;
    let linked = Linked {
        component: relation.component_id().to_string(),
        supplier: relation.supplier_id().to_string(),
        quantity_supplied_to_date: relation.quantity_supplied_to_date(),
    };
    session.save()?;

    match session.format() {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&linked).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&linked).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ if session.quiet() => {}
        _ => {
            let company = session.company();
            let component = company
                .find_component(&linked.component)
                .map(component_label)
                .unwrap_or_else(|| linked.component.clone());
            let supplier = company
                .find_supplier(&linked.supplier)
                .map(supplier_label)
                .unwrap_or_else(|| linked.supplier.clone());
            println!(
                "{} Linked {} {} {}",
                style("✓").green(),
                style(supplier).cyan(),
                style("supplies").dim(),
                style(component).cyan()
            );
        }
    }
    Ok(())
}
