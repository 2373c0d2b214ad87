//! Shared utilities for CLI commands

use clap::ValueEnum;
use console::style;
use miette::Result;
use tracing::warn;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Company, Config, InventoryResult, Origin, Store};

/// One command's view of the data file: the loaded company plus where to save it
#[derive(Debug)]
pub struct Session {
    store: Store,
    company: Company,
    recovered: bool,
    dirty: bool,
    format: OutputFormat,
    quiet: bool,
}

impl Session {
    /// Resolve the data file from flags and config, then load it.
    ///
    /// A missing file starts a new company. An unusable file also starts a new
    /// company; it is moved aside on the first save.
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let config = Config::load();
        let store = Store::new(config.data_path(global.data.as_deref()));
        let format = resolve_format(global.format, &config);

        let opened = store.open();
        let recovered = match opened.origin {
            Origin::Recovered(err) => {
                if !global.quiet {
                    eprintln!(
                        "{} {} could not be read ({}); starting with an empty company.",
                        style("!").yellow(),
                        style(store.path().display()).yellow(),
                        err
                    );
                    eprintln!(
                        "  It will be moved to {} before anything is saved.",
                        style(store.quarantine_path().display()).dim()
                    );
                }
                true
            }
            Origin::Fresh | Origin::Loaded => false,
        };

        Ok(Self::new(store, opened.company, recovered, format, global.quiet))
    }

    fn new(
        store: Store,
        company: Company,
        recovered: bool,
        format: OutputFormat,
        quiet: bool,
    ) -> Self {
        Self {
            store,
            company,
            recovered,
            dirty: false,
            format,
            quiet,
        }
    }

    pub fn company(&self) -> &Company {
        &self.company
    }

    /// Run one company operation; only a successful one leaves unsaved changes.
    ///
    /// Failed operations do not touch the company, so the session stays clean.
    pub fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut Company) -> InventoryResult<T>,
    ) -> InventoryResult<T> {
        let value = op(&mut self.company)?;
        self.dirty = true;
        Ok(value)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Output format after applying the configured default
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the company back to the data file
    pub fn save(&mut self) -> Result<()> {
        if self.recovered {
            if self.store.exists() {
                let moved = self.store.quarantine()?;
                if !self.quiet {
                    eprintln!(
                        "{} Moved unreadable data file to {}",
                        style("!").yellow(),
                        style(moved.display()).dim()
                    );
                }
            }
            self.recovered = false;
        }
        self.store.save(&self.company)?;
        self.dirty = false;
        Ok(())
    }
}

/// The CLI flag wins unless it is `auto`, then the configured default applies
pub fn resolve_format(flag: OutputFormat, config: &Config) -> OutputFormat {
    if flag != OutputFormat::Auto {
        return flag;
    }
    match config.default_format.as_deref() {
        Some(name) => OutputFormat::from_str(name, true).unwrap_or_else(|_| {
            warn!(format = name, "unknown default_format in config, using auto");
            OutputFormat::Auto
        }),
        None => OutputFormat::Auto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Entity;

    fn config_with_format(format: Option<&str>) -> Config {
        Config {
            data_file: None,
            default_format: format.map(String::from),
        }
    }

    #[test]
    fn test_flag_wins_over_config() {
        let config = config_with_format(Some("json"));
        assert_eq!(resolve_format(OutputFormat::Yaml, &config), OutputFormat::Yaml);
    }

    #[test]
    fn test_config_default_applies_to_auto() {
        let config = config_with_format(Some("MD"));
        assert_eq!(resolve_format(OutputFormat::Auto, &config), OutputFormat::Md);
    }

    #[test]
    fn test_unknown_config_format_falls_back_to_auto() {
        let config = config_with_format(Some("xml"));
        assert_eq!(resolve_format(OutputFormat::Auto, &config), OutputFormat::Auto);
        assert_eq!(
            resolve_format(OutputFormat::Auto, &config_with_format(None)),
            OutputFormat::Auto
        );
    }

    fn session() -> Session {
        let mut company = Company::new();
        company.add_component("Bolt").unwrap();
        Session::new(
            Store::new("unused.yaml"),
            company,
            false,
            OutputFormat::Auto,
            true,
        )
    }

    #[test]
    fn test_failed_operation_leaves_session_clean() {
        let mut session = session();
        assert!(session.mutate(|c| c.assign("C1", 5).map(|_| ())).is_err());
        assert!(session.mutate(|c| c.associate("C1", "S9").map(|_| ())).is_err());
        assert!(session.mutate(|c| c.fulfill_order("O1")).is_err());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_successful_operation_marks_session_dirty() {
        let mut session = session();
        let id = session
            .mutate(|c| c.add_supplier("Acme").map(|s| *s.id()))
            .unwrap();
        assert_eq!(id.to_string(), "S1");
        assert!(session.is_dirty());
    }
}
