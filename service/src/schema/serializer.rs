//! Schema text rendering

use linkml_core::config::SchemaFormat;
use linkml_core::error::{LinkMLError, Result};
use linkml_core::types::SchemaDefinition;

/// Render a schema as YAML or pretty-printed JSON
///
/// # Errors
///
/// Returns a serialization error if the schema cannot be rendered.
pub fn dump_schema(schema: &SchemaDefinition, format: SchemaFormat) -> Result<String> {
    match format {
        SchemaFormat::Yaml => serde_yaml::to_string(schema)
            .map_err(|e| LinkMLError::serialization(format!("Failed to render YAML: {e}"))),
        SchemaFormat::Json => serde_json::to_string_pretty(schema)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| LinkMLError::serialization(format!("Failed to render JSON: {e}"))),
    }
}

/// Parse a schema previously rendered by [`dump_schema`]
///
/// # Errors
///
/// Returns a parse error if `content` is not a valid schema document.
pub fn load_schema_str(content: &str, format: SchemaFormat) -> Result<SchemaDefinition> {
    match format {
        SchemaFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| LinkMLError::parse(format!("Invalid YAML schema: {e}"))),
        SchemaFormat::Json => serde_json::from_str(content)
            .map_err(|e| LinkMLError::parse(format!("Invalid JSON schema: {e}"))),
    }
}
