//! Core type definitions for LinkML schemas
//!
//! Only the parts of the LinkML metamodel the path compiler emits are modelled:
//! schema metadata, prefixes, enums, slots, classes and class rules.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

/// Schema definition - the root of a `LinkML` schema
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaDefinition {
    /// Unique identifier for the schema
    pub id: String,

    /// Name of the schema
    pub name: String,

    /// Human-readable title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Description of the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Version of the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// License information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Prefix declarations
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub prefixes: IndexMap<String, PrefixDefinition>,

    /// Default prefix for the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_prefix: Option<String>,

    /// Default range for slots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_range: Option<String>,

    /// Import statements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,

    /// Enum definitions
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub enums: IndexMap<String, EnumDefinition>,

    /// Slot definitions
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub slots: IndexMap<String, SlotDefinition>,

    /// Class definitions
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub classes: IndexMap<String, ClassDefinition>,

    /// Source file the schema was compiled from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    /// Generation date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_date: Option<String>,
}

/// Class definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassDefinition {
    /// Name of the class
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tree root flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_root: Option<bool>,

    /// Slots used by this class
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<String>,

    /// Rules for class-level validation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

/// Slot definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlotDefinition {
    /// Name of the slot
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Range (type or enum) of the slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// Is this slot required?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// Enum definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnumDefinition {
    /// Name of the enum
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Permissible values, in declaration order
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_permissible_values",
        deserialize_with = "deserialize_permissible_values"
    )]
    pub permissible_values: Vec<PermissibleValue>,
}

/// Permissible value metadata as it appears in the map form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PermissibleValueMetadata {
    /// Text of the value (repeats the map key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Description of this permissible value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Meaning URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

/// Permissible value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PermissibleValue {
    /// Simple string value
    Simple(String),
    /// Complex value with metadata
    Complex {
        text: String,
        /// Description
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        /// Meaning URI
        #[serde(skip_serializing_if = "Option::is_none")]
        meaning: Option<String>,
    },
}

impl PermissibleValue {
    /// The literal text of this value
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Simple(text) | Self::Complex { text, .. } => text,
        }
    }
}

/// Prefix definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PrefixDefinition {
    /// Simple string expansion
    Simple(String),
    /// Complex prefix with reference
    Complex {
        /// Prefix expansion
        prefix_prefix: String,
        /// Reference URL
        #[serde(skip_serializing_if = "Option::is_none")]
        prefix_reference: Option<String>,
    },
}

/// Anonymous slot expression used inside boolean slot constraints
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnonymousSlotExpression {
    /// Range constraint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// Exact string match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equals_string: Option<String>,
}

/// Rule definition for class-level validation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    /// Human-readable description of the rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Title for the rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Conditions that must be met for rule to apply (IF)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preconditions: Option<RuleConditions>,

    /// Conditions that must be satisfied when preconditions match (THEN)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postconditions: Option<RuleConditions>,
}

/// Conditions used in rules
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuleConditions {
    /// Conditions on specific slots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_conditions: Option<IndexMap<String, SlotCondition>>,
}

/// Condition on a specific slot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlotCondition {
    /// Expected range/type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// Whether the slot is required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Exact string match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equals_string: Option<String>,

    /// `exactly_one_of` constraint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exactly_one_of: Option<Vec<AnonymousSlotExpression>>,
}

impl SlotCondition {
    /// Condition requiring the slot to equal `value` exactly
    pub fn string_equals(value: impl Into<String>) -> Self {
        Self {
            equals_string: Some(value.into()),
            ..Default::default()
        }
    }

    /// Condition requiring the slot to equal exactly one of `values`
    pub fn one_of_strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let alternatives = values
            .into_iter()
            .map(|value| AnonymousSlotExpression {
                equals_string: Some(value.into()),
                ..Default::default()
            })
            .collect();
        Self {
            exactly_one_of: Some(alternatives),
            ..Default::default()
        }
    }
}

impl ClassDefinition {
    /// Create a new class definition with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl SlotDefinition {
    /// Create a new slot definition with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl EnumDefinition {
    /// Create a new enum definition with simple permissible values
    pub fn with_values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            permissible_values: values
                .into_iter()
                .map(|value| PermissibleValue::Simple(value.into()))
                .collect(),
            ..Default::default()
        }
    }

    /// Texts of the permissible values, in declaration order
    #[must_use]
    pub fn value_texts(&self) -> Vec<&str> {
        self.permissible_values.iter().map(PermissibleValue::text).collect()
    }
}

#[derive(Serialize)]
struct PermissibleValueEntry<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meaning: Option<&'a str>,
}

/// Serialize permissible values in the `LinkML` map form: `{ value: { text: value } }`
fn serialize_permissible_values<S>(
    values: &[PermissibleValue],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let mut map = serializer.serialize_map(Some(values.len()))?;
    for value in values {
        let entry = match value {
            PermissibleValue::Simple(text) => PermissibleValueEntry {
                text,
                description: None,
                meaning: None,
            },
            PermissibleValue::Complex {
                text,
                description,
                meaning,
            } => PermissibleValueEntry {
                text,
                description: description.as_deref(),
                meaning: meaning.as_deref(),
            },
        };
        map.serialize_entry(value.text(), &entry)?;
    }
    map.end()
}

/// Custom deserializer for `permissible_values` that handles both map and sequence formats
fn deserialize_permissible_values<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<PermissibleValue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct PermissibleValuesVisitor;

    impl<'de> Visitor<'de> for PermissibleValuesVisitor {
        type Value = Vec<PermissibleValue>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a sequence or map of permissible values")
        }

        // ["value1", "value2"]
        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Vec<PermissibleValue>, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut values = Vec::new();
            while let Some(value) = seq.next_element::<PermissibleValue>()? {
                values.push(value);
            }
            Ok(values)
        }

        // { "value1": null, "value2": { "text": "value2", "description": "..." } }
        fn visit_map<M>(self, mut map: M) -> std::result::Result<Vec<PermissibleValue>, M::Error>
        where
            M: de::MapAccess<'de>,
        {
            let mut values = Vec::new();
            while let Some((key, value)) =
                map.next_entry::<String, Option<PermissibleValueMetadata>>()?
            {
                let pv = match value {
                    Some(metadata) if metadata.description.is_some() || metadata.meaning.is_some() => {
                        PermissibleValue::Complex {
                            text: key,
                            description: metadata.description,
                            meaning: metadata.meaning,
                        }
                    }
                    _ => PermissibleValue::Simple(key),
                };
                values.push(pv);
            }
            Ok(values)
        }
    }

    deserializer.deserialize_any(PermissibleValuesVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_serialization() -> crate::Result<()> {
        let schema = SchemaDefinition {
            id: "https://example.org/test".to_string(),
            name: "test_schema".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&schema)?;
        assert!(json.contains("test_schema"));

        let parsed: SchemaDefinition = serde_json::from_str(&json)?;
        assert_eq!(parsed.name, "test_schema");
        Ok(())
    }

    #[test]
    fn test_permissible_values_map_form() -> crate::Result<()> {
        let enum_def = EnumDefinition::with_values("Ecosystem", ["Environmental", "Host-associated"]);
        let yaml = serde_yaml::to_string(&enum_def)?;
        assert!(yaml.contains("permissible_values:\n  Environmental:\n    text: Environmental\n"));

        let parsed: EnumDefinition = serde_yaml::from_str(&yaml)?;
        assert_eq!(parsed, enum_def);
        Ok(())
    }

    #[test]
    fn test_permissible_values_list_form() -> crate::Result<()> {
        let yaml = "name: Color\npermissible_values:\n  - red\n  - green\n";
        let parsed: EnumDefinition = serde_yaml::from_str(yaml)?;
        assert_eq!(parsed.value_texts(), vec!["red", "green"]);
        Ok(())
    }

    #[test]
    fn test_complex_permissible_value_keeps_metadata() -> crate::Result<()> {
        let yaml = "name: Color\npermissible_values:\n  red:\n    text: red\n    description: warm\n";
        let parsed: EnumDefinition = serde_yaml::from_str(yaml)?;
        assert_eq!(
            parsed.permissible_values,
            vec![PermissibleValue::Complex {
                text: "red".to_string(),
                description: Some("warm".to_string()),
                meaning: None,
            }]
        );
        Ok(())
    }

    #[test]
    fn test_slot_condition_constructors() {
        let equals = SlotCondition::string_equals("a2");
        assert_eq!(equals.equals_string.as_deref(), Some("a2"));
        assert!(equals.exactly_one_of.is_none());

        let one_of = SlotCondition::one_of_strings(["d2", "d3"]);
        let alternatives = one_of.exactly_one_of.unwrap_or_default();
        let texts: Vec<_> = alternatives
            .iter()
            .filter_map(|alt| alt.equals_string.as_deref())
            .collect();
        assert_eq!(texts, vec!["d2", "d3"]);
    }
}
