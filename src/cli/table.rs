//! Table formatting utilities for CLI list commands
//!
//! Every list command builds a [`ListTable`] and hands it to [`print_list`]
//! together with the entities themselves, which are used for the structured
//! formats (JSON, YAML).

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{plural, truncate_str};
use crate::cli::OutputFormat;

/// A column of a list table: header text and display width
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub width: usize,
}

impl Column {
    pub const fn new(header: &'static str, width: usize) -> Self {
        Self { header, width }
    }
}

/// Rows of a list command; the first column is always the entity ID
#[derive(Debug, Clone)]
pub struct ListTable {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl ListTable {
    pub fn new(columns: &[Column]) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// IDs in row order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(|row| row.first().map(String::as_str))
    }

    /// Aligned, coloured columns for the terminal
    pub fn to_tsv(&self) -> String {
        let header: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{:<width$}", style(c.header).bold(), width = c.width))
            .collect();
        let rule_width: usize = self.columns.iter().map(|c| c.width + 1).sum();

        let mut out = String::new();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');
        out.push_str(&"-".repeat(rule_width.saturating_sub(1)));
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .zip(row)
                .enumerate()
                .map(|(i, (column, cell))| {
                    let cell = truncate_str(cell, column.width.saturating_sub(1).max(4));
                    if i == 0 {
                        format!("{:<width$}", style(cell).cyan(), width = column.width)
                    } else {
                        format!("{:<width$}", cell, width = column.width)
                    }
                })
                .collect();
            out.push_str(cells.join(" ").trim_end());
            out.push('\n');
        }
        out
    }

    /// A markdown table with full (untruncated) cells
    pub fn to_markdown(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.columns.iter().map(|c| c.header.to_string()));
        for row in &self.rows {
            builder.push_record(row.iter().cloned());
        }
        builder.build().with(Style::markdown()).to_string()
    }
}

/// Print a list in the requested format.
///
/// `noun` is the singular entity name used in the empty and summary lines.
pub fn print_list<T: Serialize>(
    items: &[T],
    table: &ListTable,
    format: OutputFormat,
    noun: &str,
    quiet: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&items).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Id => {
            for id in table.ids() {
                println!("{}", id);
            }
        }
        OutputFormat::Md => {
            if !table.is_empty() {
                println!("{}", table.to_markdown());
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            if table.is_empty() {
                if !quiet {
                    println!("No {}s found.", noun);
                }
                return Ok(());
            }
            print!("{}", table.to_tsv());
            if !quiet {
                println!();
                println!("{} found.", style(plural(table.len(), noun)).cyan());
            }
        }
    }
    Ok(())
}
