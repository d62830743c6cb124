//! Composition of columns and rules into the target model

use linkml_core::error::Result;
use tracing::debug;

use super::columns::ColumnDefinition;
use super::rules::PathRule;
use crate::schema::SchemaModelBuilder;

/// Hands analyzed columns and compiled rules to a [`SchemaModelBuilder`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaAssembler;

impl SchemaAssembler {
    /// Register every column, then every rule, then the composite type
    /// owning them, and return the finished model.
    ///
    /// # Errors
    ///
    /// Propagates any builder error.
    pub fn assemble<B>(
        mut builder: B,
        class_name: &str,
        columns: &[ColumnDefinition],
        rules: &[PathRule],
    ) -> Result<B::Model>
    where
        B: SchemaModelBuilder,
    {
        for column in columns {
            column.register(&mut builder)?;
        }
        for rule in rules {
            builder.define_rule(rule)?;
        }
        builder.assemble_composite_type(class_name)?;

        debug!(
            class = class_name,
            fields = columns.len(),
            rules = rules.len(),
            "assembled composite type"
        );
        Ok(builder.finish())
    }
}
