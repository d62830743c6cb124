//! Configuration types for the path schema compiler
//!
//! Every section is `#[serde(default)]`, so a configuration file only needs to
//! name the values it overrides.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{LinkMLError, Result};

/// Main configuration for compiling a path table into a `LinkML` schema
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathSchemaConfig {
    /// Schema metadata configuration
    pub schema: SchemaMetadataConfig,

    /// Source table configuration
    pub table: TableConfig,

    /// Rule compilation configuration
    pub rules: RuleConfig,

    /// Output configuration
    pub output: OutputConfig,
}

/// Metadata written into the generated schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SchemaMetadataConfig {
    /// Schema id (URI)
    pub id: String,

    /// Schema name
    pub name: String,

    /// Human-readable title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional version
    pub version: Option<String>,

    /// Optional license
    pub license: Option<String>,

    /// Optional default prefix
    pub default_prefix: Option<String>,

    /// Additional prefix declarations
    pub prefixes: IndexMap<String, String>,

    /// Name of the composite class owning every path slot
    pub class_name: String,

    /// Record the generation date in the schema
    pub stamp_generation_date: bool,

    /// Record the input file path as the schema's source file
    pub record_source_file: bool,
}

impl Default for SchemaMetadataConfig {
    fn default() -> Self {
        Self {
            id: "http://example.com/gold-ecosystem".to_string(),
            name: "gold-ecosystem-classification".to_string(),
            title: "GOLD Ecosystem Classification".to_string(),
            description: None,
            version: None,
            license: None,
            default_prefix: None,
            prefixes: IndexMap::new(),
            class_name: "Path".to_string(),
            stamp_generation_date: false,
            record_source_file: true,
        }
    }
}

/// How the source table is read
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    /// Worksheet to read (first sheet when unset)
    pub sheet: Option<String>,

    /// Drop the leftmost column, which holds the row key
    pub drop_key_column: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sheet: None,
            drop_key_column: true,
        }
    }
}

/// Order in which compiled rules are emitted
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleOrder {
    /// Prefixes in the order they were first observed
    #[default]
    FirstSeen,
    /// Prefixes sorted by their values
    Lexical,
}

/// Rule compilation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleConfig {
    /// Emission order
    pub order: RuleOrder,
}

/// Schema text formats
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SchemaFormat {
    /// `YAML` format
    #[default]
    Yaml,
    /// `JSON` format
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Serialization format
    pub format: SchemaFormat,
}

impl PathSchemaConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// fails [`PathSchemaConfig::validate`].
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LinkMLError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML or the result is invalid.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| LinkMLError::config(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that required values are present
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first empty required value.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("schema.id", &self.schema.id),
            ("schema.name", &self.schema.name),
            ("schema.class_name", &self.schema.class_name),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(LinkMLError::config(format!("{key} must not be empty")));
            }
        }
        if self.table.sheet.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(LinkMLError::config("table.sheet must not be empty when set"));
        }
        Ok(())
    }
}
