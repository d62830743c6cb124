//! Schema model builders
//!
//! The compiler talks to its output model only through [`SchemaModelBuilder`].
//! [`LinkMLSchemaBuilder`] is the adapter producing a
//! [`SchemaDefinition`] and checks the structure as it is defined: a field's
//! range must name an enumeration defined earlier, and rules may only mention
//! defined fields.

use indexmap::IndexMap;
use linkml_core::config::SchemaFormat;
use linkml_core::error::{LinkMLError, Result};
use linkml_core::types::{
    ClassDefinition, EnumDefinition, PrefixDefinition, Rule, SchemaDefinition, SlotDefinition,
};

use super::serializer::dump_schema;
use crate::compiler::PathRule;

/// Capabilities the compiler needs from a schema library
pub trait SchemaModelBuilder {
    /// The finished model
    type Model;

    /// Define a field whose values range over the enumeration `range`
    ///
    /// # Errors
    ///
    /// Returns an error if the field already exists or `range` is unknown.
    fn define_field(&mut self, name: &str, range: &str) -> Result<()>;

    /// Define an enumeration with the given permissible values, in order
    ///
    /// # Errors
    ///
    /// Returns an error if the enumeration already exists.
    fn define_enumeration(&mut self, name: &str, values: &[String]) -> Result<()>;

    /// Attach a rule to the composite type
    ///
    /// # Errors
    ///
    /// Returns an error if the rule mentions an undefined field.
    fn define_rule(&mut self, rule: &PathRule) -> Result<()>;

    /// Create the composite type owning every field (in definition order)
    /// and every rule
    ///
    /// # Errors
    ///
    /// Returns an error if the composite type was already assembled.
    fn assemble_composite_type(&mut self, name: &str) -> Result<()>;

    /// Render the model built so far
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the model cannot be rendered.
    fn serialize(&self, format: SchemaFormat) -> Result<String>;

    /// Consume the builder and return the model
    fn finish(self) -> Self::Model
    where
        Self: Sized;
}

/// Builder for `LinkML` schema definitions
///
/// # Example
///
/// ```rust
/// use linkml_service::schema::{LinkMLSchemaBuilder, SchemaModelBuilder};
///
/// # fn main() -> linkml_core::Result<()> {
/// let mut builder = LinkMLSchemaBuilder::new("http://example.com/eco", "eco")
///     .with_title("Ecosystems");
/// builder.define_enumeration("Ecosystem", &["Environmental".to_string()])?;
/// builder.define_field("ecosystem", "Ecosystem")?;
/// builder.assemble_composite_type("Path")?;
/// let schema = builder.finish();
/// assert_eq!(schema.classes["Path"].slots, vec!["ecosystem"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LinkMLSchemaBuilder {
    schema: SchemaDefinition,
    rules: Vec<Rule>,
    assembled: Option<String>,
}

impl LinkMLSchemaBuilder {
    /// Create a builder for a schema with the given id and name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut prefixes = IndexMap::new();
        prefixes.insert(
            "linkml".to_string(),
            PrefixDefinition::Simple("https://w3id.org/linkml/".to_string()),
        );

        Self {
            schema: SchemaDefinition {
                id: id.into(),
                name: name.into(),
                prefixes,
                ..Default::default()
            },
            rules: Vec::new(),
            assembled: None,
        }
    }

    /// Set the schema title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.schema.title = Some(title.into());
        self
    }

    /// Set the schema description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.schema.description = Some(description.into());
        self
    }

    /// Set the schema version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.schema.version = Some(version.into());
        self
    }

    /// Set the schema license
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.schema.license = Some(license.into());
        self
    }

    /// Set the default prefix
    pub fn with_default_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.schema.default_prefix = Some(prefix.into());
        self
    }

    /// Add a prefix
    pub fn add_prefix(mut self, prefix: impl Into<String>, reference: impl Into<String>) -> Self {
        self.schema
            .prefixes
            .insert(prefix.into(), PrefixDefinition::Simple(reference.into()));
        self
    }

    /// Record the file the schema was generated from
    pub fn with_source_file(mut self, source: impl Into<String>) -> Self {
        self.schema.source_file = Some(source.into());
        self
    }

    /// Record when the schema was generated
    pub fn with_generation_date(mut self, date: impl Into<String>) -> Self {
        self.schema.generation_date = Some(date.into());
        self
    }

    fn ensure_open(&self, what: &str) -> Result<()> {
        match &self.assembled {
            Some(class) => Err(LinkMLError::schema_element(
                format!("cannot define {what} after class '{class}' was assembled"),
                class.clone(),
            )),
            None => Ok(()),
        }
    }

    fn ensure_field(&self, name: &str) -> Result<()> {
        if self.schema.slots.contains_key(name) {
            Ok(())
        } else {
            Err(LinkMLError::schema_element(
                format!("rule refers to undefined slot '{name}'"),
                name,
            ))
        }
    }
}

impl SchemaModelBuilder for LinkMLSchemaBuilder {
    type Model = SchemaDefinition;

    fn define_field(&mut self, name: &str, range: &str) -> Result<()> {
        self.ensure_open("slot")?;
        if self.schema.slots.contains_key(name) {
            return Err(LinkMLError::schema_element(
                format!("slot '{name}' is already defined"),
                name,
            ));
        }
        if !self.schema.enums.contains_key(range) {
            return Err(LinkMLError::schema_element(
                format!("slot '{name}' has undefined range '{range}'"),
                name,
            ));
        }

        let mut slot = SlotDefinition::new(name);
        slot.range = Some(range.to_string());
        self.schema.slots.insert(name.to_string(), slot);
        Ok(())
    }

    fn define_enumeration(&mut self, name: &str, values: &[String]) -> Result<()> {
        self.ensure_open("enum")?;
        if self.schema.enums.contains_key(name) {
            return Err(LinkMLError::schema_element(
                format!("enum '{name}' is already defined"),
                name,
            ));
        }
        self.schema.enums.insert(
            name.to_string(),
            EnumDefinition::with_values(name, values.iter().cloned()),
        );
        Ok(())
    }

    fn define_rule(&mut self, rule: &PathRule) -> Result<()> {
        self.ensure_open("rule")?;
        for field in rule.preconditions.keys() {
            self.ensure_field(field)?;
        }
        self.ensure_field(&rule.postcondition_field)?;
        self.rules.push(rule.to_linkml_rule());
        Ok(())
    }

    fn assemble_composite_type(&mut self, name: &str) -> Result<()> {
        self.ensure_open("class")?;

        let mut class = ClassDefinition::new(name);
        class.slots = self.schema.slots.keys().cloned().collect();
        class.rules = std::mem::take(&mut self.rules);
        self.schema.classes.insert(name.to_string(), class);
        self.assembled = Some(name.to_string());
        Ok(())
    }

    fn serialize(&self, format: SchemaFormat) -> Result<String> {
        dump_schema(&self.schema, format)
    }

    fn finish(self) -> SchemaDefinition {
        self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|v| (*v).to_string()).collect()
    }

    fn rule(pre: &[(&str, &str)], field: &str, allowed: &[&str]) -> PathRule {
        PathRule {
            preconditions: pre
                .iter()
                .map(|(f, v)| ((*f).to_string(), (*v).to_string()))
                .collect(),
            postcondition_field: field.to_string(),
            allowed_values: values(allowed),
        }
    }

    #[test]
    fn test_builds_schema_in_order() -> Result<()> {
        let mut builder = LinkMLSchemaBuilder::new("http://example.com/x", "x").with_title("X");
        builder.define_enumeration("Ecosystem", &values(&["a1", "a2"]))?;
        builder.define_field("ecosystem", "Ecosystem")?;
        builder.define_enumeration("EcosystemCategory", &values(&["b1"]))?;
        builder.define_field("ecosystem_category", "EcosystemCategory")?;
        builder.define_rule(&rule(&[("ecosystem", "a1")], "ecosystem_category", &["b1"]))?;
        builder.assemble_composite_type("Path")?;

        let schema = builder.finish();
        assert_eq!(schema.title.as_deref(), Some("X"));
        assert!(schema.prefixes.contains_key("linkml"));
        assert_eq!(
            schema.classes["Path"].slots,
            vec!["ecosystem", "ecosystem_category"]
        );
        assert_eq!(schema.classes["Path"].rules.len(), 1);
        assert_eq!(schema.slots["ecosystem"].range.as_deref(), Some("Ecosystem"));
        assert_eq!(schema.enums["Ecosystem"].value_texts(), vec!["a1", "a2"]);
        Ok(())
    }

    #[test]
    fn test_undefined_range_rejected() {
        let mut builder = LinkMLSchemaBuilder::new("id", "name");
        let err = builder.define_field("ecosystem", "Ecosystem").unwrap_err();
        assert!(err.to_string().contains("undefined range"));
    }

    #[test]
    fn test_duplicates_rejected() -> Result<()> {
        let mut builder = LinkMLSchemaBuilder::new("id", "name");
        builder.define_enumeration("E", &[])?;
        assert!(builder.define_enumeration("E", &[]).is_err());
        builder.define_field("e", "E")?;
        assert!(builder.define_field("e", "E").is_err());
        Ok(())
    }

    #[test]
    fn test_rule_on_unknown_slot_rejected() -> Result<()> {
        let mut builder = LinkMLSchemaBuilder::new("id", "name");
        builder.define_enumeration("E", &values(&["x"]))?;
        builder.define_field("e", "E")?;
        assert!(builder.define_rule(&rule(&[("e", "x")], "missing", &["y"])).is_err());
        assert!(builder.define_rule(&rule(&[("missing", "x")], "e", &["x"])).is_err());
        Ok(())
    }

    #[test]
    fn test_closed_after_assembly() -> Result<()> {
        let mut builder = LinkMLSchemaBuilder::new("id", "name");
        builder.assemble_composite_type("Path")?;
        assert!(builder.assemble_composite_type("Other").is_err());
        assert!(builder.define_enumeration("E", &[]).is_err());
        let schema = builder.finish();
        assert!(schema.classes["Path"].slots.is_empty());
        Ok(())
    }

    #[test]
    fn test_serialize_through_builder() -> Result<()> {
        let mut builder = LinkMLSchemaBuilder::new("id", "name").with_title("T");
        builder.assemble_composite_type("Path")?;
        let yaml = builder.serialize(SchemaFormat::Yaml)?;
        assert!(yaml.contains("\ntitle: T\n"));
        let json = builder.serialize(SchemaFormat::Json)?;
        assert!(json.contains("\"title\": \"T\""));
        Ok(())
    }
}
