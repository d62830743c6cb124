//! `gold-linkml` CLI application.

use super::types::GoldLinkMLCli;
use crate::compiler::PathSchemaCompiler;
use crate::loader::{load_table, source_name};
use crate::rule_engine::{RuleCheckReport, RuleChecker};
use crate::schema::dump_schema;
use clap::Parser;
use colored::Colorize;
use linkml_core::config::PathSchemaConfig;
use linkml_core::error::{LinkMLError, Result};
use std::io::Write;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Main `gold-linkml` CLI application
pub struct GoldLinkMLApp {
    cli: GoldLinkMLCli,
}

impl GoldLinkMLApp {
    /// Create the application from command line arguments
    #[must_use]
    pub fn from_args() -> Self {
        Self {
            cli: GoldLinkMLCli::parse(),
        }
    }

    /// Create the application with a parsed CLI configuration
    #[must_use]
    pub fn new(cli: GoldLinkMLCli) -> Self {
        Self { cli }
    }

    /// Run the application
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be loaded, the schema cannot be
    /// compiled or written, or verification finds violations.
    pub fn run(self) -> Result<()> {
        self.init_logging();
        info!(input = %self.cli.input.display(), "Starting gold-linkml");

        match self.execute() {
            Ok(()) => {
                info!("Schema generated successfully");
                Ok(())
            }
            Err(err) => {
                error!("Schema generation failed: {err}");
                Err(err)
            }
        }
    }

    /// Configure the tracing subscriber from CLI flags; `RUST_LOG` wins when set.
    /// Logs go to stderr so the schema can be piped from stdout.
    fn init_logging(&self) {
        let level = if self.cli.quiet {
            "error"
        } else if self.cli.verbose {
            "debug"
        } else {
            "warn"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Merge the configuration file (if any) with command-line overrides
    fn config(&self) -> Result<PathSchemaConfig> {
        let mut config = match &self.cli.config {
            Some(path) => PathSchemaConfig::from_yaml_file(path)?,
            None => PathSchemaConfig::default(),
        };

        if let Some(sheet) = &self.cli.sheet {
            config.table.sheet = Some(sheet.clone());
        }
        if self.cli.keep_key_column {
            config.table.drop_key_column = false;
        }
        if let Some(order) = self.cli.rule_order {
            config.rules.order = order.into();
        }
        if let Some(title) = &self.cli.title {
            config.schema.title.clone_from(title);
        }
        if let Some(format) = self.cli.format {
            config.output.format = format.into();
        }

        config.validate()?;
        Ok(config)
    }

    fn execute(&self) -> Result<()> {
        let config = self.config()?;
        let input = &self.cli.input;

        let table = load_table(input, &config.table)?;
        let compiler = PathSchemaCompiler::new(config.clone());
        let schema = compiler.compile_source(&table, &source_name(input))?;

        if self.cli.verify {
            let checker = RuleChecker::for_class(&schema, &config.schema.class_name)?;
            let report = checker.check_table(&table)?;
            self.print_report(&report);
            if !report.is_valid() {
                return Err(LinkMLError::schema_validation(format!(
                    "{} row(s) violate the compiled rules",
                    report.violations.len()
                )));
            }
        }

        let rendered = dump_schema(&schema, config.output.format)?;
        match &self.cli.output {
            Some(path) => {
                std::fs::write(path, rendered)?;
                if !self.cli.quiet {
                    eprintln!("{} {}", "Wrote".green().bold(), path.display());
                }
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }

    fn print_report(&self, report: &RuleCheckReport) {
        if self.cli.quiet {
            return;
        }
        if report.is_valid() {
            eprintln!(
                "{} {} rows satisfy all rules ({} rule applications)",
                "✓".green().bold(),
                report.rows_checked,
                report.rules_applied
            );
        } else {
            eprintln!(
                "{} {} violation(s) in {} rows",
                "✗".red().bold(),
                report.violations.len(),
                report.rows_checked
            );
            for violation in &report.violations {
                let row = violation.row.map_or_else(|| "-".to_string(), |r| (r + 1).to_string());
                eprintln!(
                    "  row {}: rule {} rejects {} = {}",
                    row.yellow(),
                    violation.rule_index,
                    violation.slot.cyan(),
                    violation.value
                );
            }
        }
    }
}
