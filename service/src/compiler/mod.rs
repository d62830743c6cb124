//! Path-to-constraint compiler
//!
//! Turns a [`PathTable`] into a `LinkML` schema in four steps:
//!
//! 1. [`ColumnAnalyzer`] derives one slot and one enum per column.
//! 2. [`CompletionIndex`] maps each observed prefix to the values that follow it.
//! 3. [`RuleCompiler`] emits one precondition/postcondition rule per non-empty prefix.
//! 4. [`SchemaAssembler`] places slots, enums and rules on a single class.
//!
//! Compilation is a pure function of the table and the configuration.

pub mod assembler;
pub mod columns;
pub mod completion;
pub mod rules;

pub use assembler::SchemaAssembler;
pub use columns::{ColumnAnalyzer, ColumnDefinition};
pub use completion::{CompletionIndex, CompletionSet, PartialPath};
pub use rules::{PathRule, RuleCompiler};

use chrono::{SecondsFormat, Utc};
use linkml_core::config::PathSchemaConfig;
use linkml_core::error::Result;
use linkml_core::types::SchemaDefinition;
use tracing::{debug, info};

use crate::schema::LinkMLSchemaBuilder;
use crate::table::PathTable;

/// Compiles path tables into `LinkML` schemas
#[derive(Debug, Clone, Default)]
pub struct PathSchemaCompiler {
    config: PathSchemaConfig,
}

impl PathSchemaCompiler {
    /// Create a compiler with the given configuration
    pub fn new(config: PathSchemaConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &PathSchemaConfig {
        &self.config
    }

    /// Compile a table into a schema
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or two columns derive
    /// the same identifier.
    pub fn compile(&self, table: &PathTable) -> Result<SchemaDefinition> {
        self.compile_with(table, None)
    }

    /// Compile a table read from `source`, recording the source in the schema
    /// when configured to.
    ///
    /// # Errors
    ///
    /// See [`PathSchemaCompiler::compile`].
    pub fn compile_source(&self, table: &PathTable, source: &str) -> Result<SchemaDefinition> {
        self.compile_with(table, Some(source))
    }

    fn compile_with(&self, table: &PathTable, source: Option<&str>) -> Result<SchemaDefinition> {
        self.config.validate()?;

        let columns = ColumnAnalyzer::analyze_table(table)?;
        debug!(columns = columns.len(), rows = table.row_count(), "analyzed columns");

        let index = CompletionIndex::build(table);
        debug!(prefixes = index.len(), "built completion index");

        let field_names: Vec<String> = columns.iter().map(|c| c.field_name.clone()).collect();
        let rules = RuleCompiler::new(&field_names, self.config.rules.order).compile(&index)?;

        let schema = SchemaAssembler::assemble(
            self.builder(source),
            &self.config.schema.class_name,
            &columns,
            &rules,
        )?;

        info!(
            schema = %schema.name,
            slots = schema.slots.len(),
            enums = schema.enums.len(),
            rules = rules.len(),
            "compiled path schema"
        );
        Ok(schema)
    }

    fn builder(&self, source: Option<&str>) -> LinkMLSchemaBuilder {
        let meta = &self.config.schema;
        let mut builder =
            LinkMLSchemaBuilder::new(&meta.id, &meta.name).with_title(&meta.title);

        if let Some(description) = &meta.description {
            builder = builder.with_description(description);
        }
        if let Some(version) = &meta.version {
            builder = builder.with_version(version);
        }
        if let Some(license) = &meta.license {
            builder = builder.with_license(license);
        }
        for (prefix, reference) in &meta.prefixes {
            builder = builder.add_prefix(prefix, reference);
        }
        if let Some(prefix) = &meta.default_prefix {
            builder = builder.with_default_prefix(prefix);
        }
        if meta.record_source_file {
            if let Some(source) = source {
                builder = builder.with_source_file(source);
            }
        }
        if meta.stamp_generation_date {
            builder = builder
                .with_generation_date(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        builder
    }
}

/// Compile `table` with `config` in one call
///
/// # Errors
///
/// See [`PathSchemaCompiler::compile`].
pub fn compile_table(table: &PathTable, config: &PathSchemaConfig) -> Result<SchemaDefinition> {
    PathSchemaCompiler::new(config.clone()).compile(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkml_core::config::RuleOrder;

    fn sample() -> Result<PathTable> {
        PathTable::from_rows(
            ["ECOSYSTEM", "ECOSYSTEM CATEGORY"],
            vec![vec!["a1", "b1"], vec!["a1", "b2"], vec!["a2", "b3"]],
        )
    }

    #[test]
    fn test_compile_defaults() -> Result<()> {
        let schema = PathSchemaCompiler::default().compile(&sample()?)?;
        assert_eq!(schema.id, "http://example.com/gold-ecosystem");
        assert_eq!(schema.name, "gold-ecosystem-classification");
        assert_eq!(schema.title.as_deref(), Some("GOLD Ecosystem Classification"));
        assert!(schema.classes.contains_key("Path"));
        assert_eq!(schema.classes["Path"].rules.len(), 2);
        assert!(schema.source_file.is_none());
        assert!(schema.generation_date.is_none());
        Ok(())
    }

    #[test]
    fn test_source_file_recorded() -> Result<()> {
        let schema = PathSchemaCompiler::default().compile_source(&sample()?, "gold.xlsx")?;
        assert_eq!(schema.source_file.as_deref(), Some("gold.xlsx"));

        let mut config = PathSchemaConfig::default();
        config.schema.record_source_file = false;
        let schema = PathSchemaCompiler::new(config).compile_source(&sample()?, "gold.xlsx")?;
        assert!(schema.source_file.is_none());
        Ok(())
    }

    #[test]
    fn test_generation_date_stamp() -> Result<()> {
        let mut config = PathSchemaConfig::default();
        config.schema.stamp_generation_date = true;
        let schema = compile_table(&sample()?, &config)?;
        let stamp = schema.generation_date.unwrap_or_default();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
        Ok(())
    }

    #[test]
    fn test_custom_class_and_order() -> Result<()> {
        let mut config = PathSchemaConfig::default();
        config.schema.class_name = "EcosystemPath".to_string();
        config.rules.order = RuleOrder::Lexical;
        let schema = compile_table(&sample()?, &config)?;
        assert!(schema.classes.contains_key("EcosystemPath"));
        assert!(!schema.classes.contains_key("Path"));
        Ok(())
    }

    #[test]
    fn test_invalid_config_rejected() -> Result<()> {
        let mut config = PathSchemaConfig::default();
        config.schema.class_name = String::new();
        assert!(compile_table(&sample()?, &config).is_err());
        Ok(())
    }
}
