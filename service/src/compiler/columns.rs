//! Column analysis: one slot and one enum per path position

use indexmap::IndexSet;
use linkml_core::error::{LinkMLError, Result};
use std::collections::HashMap;

use crate::naming::{enum_name, field_name};
use crate::schema::SchemaModelBuilder;
use crate::table::{Column, PathTable, is_blank};

/// Slot and enum derived from one table column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Path position (0-based column index)
    pub position: usize,
    /// Column header as given in the source
    pub column: String,
    /// Slot name (`ecosystem_category`)
    pub field_name: String,
    /// Enum name (`EcosystemCategory`), also the slot's range
    pub enum_name: String,
    /// Distinct non-blank values in first-occurrence order
    pub permissible_values: Vec<String>,
}

impl ColumnDefinition {
    /// Define this column's enum and slot on `builder`
    ///
    /// # Errors
    ///
    /// Propagates builder errors (duplicate names, undefined range).
    pub fn register<B>(&self, builder: &mut B) -> Result<()>
    where
        B: SchemaModelBuilder + ?Sized,
    {
        builder.define_enumeration(&self.enum_name, &self.permissible_values)?;
        builder.define_field(&self.field_name, &self.enum_name)
    }
}

/// Derives slot/enum definitions from table columns
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnAnalyzer;

impl ColumnAnalyzer {
    /// Analyze a single column at `position`
    pub fn analyze(position: usize, column: &Column) -> ColumnDefinition {
        let distinct: IndexSet<&str> = column
            .values()
            .iter()
            .map(String::as_str)
            .filter(|v| !is_blank(v))
            .collect();

        ColumnDefinition {
            position,
            column: column.name().to_string(),
            field_name: field_name(column.name()),
            enum_name: enum_name(column.name()),
            permissible_values: distinct.into_iter().map(str::to_string).collect(),
        }
    }

    /// Analyze every path column of `table`, in column order
    ///
    /// # Errors
    ///
    /// Returns a schema validation error if two headers derive the same slot
    /// or enum name.
    pub fn analyze_table(table: &PathTable) -> Result<Vec<ColumnDefinition>> {
        let definitions: Vec<ColumnDefinition> = table
            .path_columns()
            .iter()
            .enumerate()
            .map(|(position, column)| Self::analyze(position, column))
            .collect();

        let mut seen_fields: HashMap<&str, &str> = HashMap::new();
        let mut seen_enums: HashMap<&str, &str> = HashMap::new();
        for def in &definitions {
            if def.field_name.is_empty() {
                return Err(LinkMLError::schema_element(
                    format!("column {} has no usable name", def.position + 1),
                    def.column.clone(),
                ));
            }
            if let Some(previous) = seen_fields.insert(&def.field_name, &def.column) {
                return Err(LinkMLError::schema_element(
                    format!(
                        "columns '{previous}' and '{}' both map to slot '{}'",
                        def.column, def.field_name
                    ),
                    def.field_name.clone(),
                ));
            }
            if let Some(previous) = seen_enums.insert(&def.enum_name, &def.column) {
                return Err(LinkMLError::schema_element(
                    format!(
                        "columns '{previous}' and '{}' both map to enum '{}'",
                        def.column, def.enum_name
                    ),
                    def.enum_name.clone(),
                ));
            }
        }

        Ok(definitions)
    }
}
