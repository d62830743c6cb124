//! Rule compilation from the completion index

use indexmap::IndexMap;
use linkml_core::config::RuleOrder;
use linkml_core::error::{LinkMLError, Result};
use linkml_core::types::{Rule, RuleConditions, SlotCondition};

use super::completion::CompletionIndex;

/// A compiled path constraint.
///
/// If every precondition field equals its value, the postcondition field
/// must be exactly one of `allowed_values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRule {
    /// Field name -> required value, for positions `0..k`
    pub preconditions: IndexMap<String, String>,
    /// Field at position `k`
    pub postcondition_field: String,
    /// Sorted, deduplicated completion values
    pub allowed_values: Vec<String>,
}

impl PathRule {
    /// Express this rule as a `LinkML` class rule
    pub fn to_linkml_rule(&self) -> Rule {
        let preconditions = self
            .preconditions
            .iter()
            .map(|(field, value)| (field.clone(), SlotCondition::string_equals(value.clone())))
            .collect();

        let mut postconditions = IndexMap::new();
        postconditions.insert(
            self.postcondition_field.clone(),
            SlotCondition::one_of_strings(self.allowed_values.iter().cloned()),
        );

        Rule {
            preconditions: Some(RuleConditions {
                slot_conditions: Some(preconditions),
            }),
            postconditions: Some(RuleConditions {
                slot_conditions: Some(postconditions),
            }),
            ..Default::default()
        }
    }
}

/// Turns prefix completions into [`PathRule`]s
#[derive(Debug, Clone)]
pub struct RuleCompiler<'a> {
    field_names: &'a [String],
    order: RuleOrder,
}

impl<'a> RuleCompiler<'a> {
    /// Create a compiler for the given path field names (position order)
    pub fn new(field_names: &'a [String], order: RuleOrder) -> Self {
        Self { field_names, order }
    }

    /// Emit one rule per non-empty prefix in `index`
    ///
    /// # Errors
    ///
    /// Returns a schema validation error if a prefix is longer than the
    /// number of known fields allows.
    pub fn compile(&self, index: &CompletionIndex) -> Result<Vec<PathRule>> {
        let mut entries: Vec<_> = index.iter().filter(|(prefix, _)| !prefix.is_empty()).collect();
        if self.order == RuleOrder::Lexical {
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        }

        entries
            .into_iter()
            .map(|(prefix, completions)| {
                let postcondition_field = self.field_names.get(prefix.len()).ok_or_else(|| {
                    LinkMLError::schema_validation(format!(
                        "prefix of length {} has no following field (table has {} fields)",
                        prefix.len(),
                        self.field_names.len()
                    ))
                })?;

                let preconditions = self
                    .field_names
                    .iter()
                    .zip(prefix.iter())
                    .map(|(field, value)| (field.clone(), value.clone()))
                    .collect();

                Ok(PathRule {
                    preconditions,
                    postcondition_field: postcondition_field.clone(),
                    allowed_values: completions.iter().cloned().collect(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::PathTable;
    use pretty_assertions::assert_eq;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    fn index(rows: Vec<Vec<&str>>) -> Result<CompletionIndex> {
        let headers = ["A", "B", "C"];
        let table = PathTable::from_rows(headers, rows)?;
        Ok(CompletionIndex::build(&table))
    }

    #[test]
    fn test_rules_skip_root_prefix() -> Result<()> {
        let names = fields(&["a", "b", "c"]);
        let idx = index(vec![vec!["x", "y", "z"]])?;
        let rules = RuleCompiler::new(&names, RuleOrder::FirstSeen).compile(&idx)?;

        assert_eq!(rules.len(), 2);
        assert!(rules.iter().all(|r| !r.preconditions.is_empty()));
        assert_eq!(rules[0].postcondition_field, "b");
        assert_eq!(rules[1].postcondition_field, "c");
        assert_eq!(rules[1].preconditions.get("a").map(String::as_str), Some("x"));
        assert_eq!(rules[1].preconditions.get("b").map(String::as_str), Some("y"));
        Ok(())
    }

    #[test]
    fn test_allowed_values_sorted() -> Result<()> {
        let names = fields(&["a", "b", "c"]);
        let idx = index(vec![
            vec!["x", "y2", "z"],
            vec!["x", "y1", "z"],
            vec!["x", "y2", "w"],
        ])?;
        let rules = RuleCompiler::new(&names, RuleOrder::FirstSeen).compile(&idx)?;
        assert_eq!(rules[0].allowed_values, vec!["y1", "y2"]);
        Ok(())
    }

    #[test]
    fn test_lexical_order() -> Result<()> {
        let names = fields(&["a", "b", "c"]);
        let idx = index(vec![vec!["z", "1", "q"], vec!["a", "2", "q"]])?;

        let first_seen = RuleCompiler::new(&names, RuleOrder::FirstSeen).compile(&idx)?;
        assert_eq!(first_seen[0].preconditions["a"], "z");

        let lexical = RuleCompiler::new(&names, RuleOrder::Lexical).compile(&idx)?;
        let heads: Vec<&str> = lexical.iter().map(|r| r.preconditions["a"].as_str()).collect();
        assert_eq!(heads, vec!["a", "a", "z", "z"]);
        Ok(())
    }

    #[test]
    fn test_too_few_fields_is_an_error() -> Result<()> {
        let names = fields(&["a"]);
        let idx = index(vec![vec!["x", "y", "z"]])?;
        assert!(RuleCompiler::new(&names, RuleOrder::FirstSeen).compile(&idx).is_err());
        Ok(())
    }

    #[test]
    fn test_linkml_rule_shape() {
        let rule = PathRule {
            preconditions: IndexMap::from([("ecosystem".to_string(), "a2".to_string())]),
            postcondition_field: "ecosystem_category".to_string(),
            allowed_values: vec!["b3".to_string()],
        };
        let linkml = rule.to_linkml_rule();

        let pre = linkml
            .preconditions
            .and_then(|c| c.slot_conditions)
            .unwrap_or_default();
        assert_eq!(pre["ecosystem"].equals_string.as_deref(), Some("a2"));

        let post = linkml
            .postconditions
            .and_then(|c| c.slot_conditions)
            .unwrap_or_default();
        let alternatives = post["ecosystem_category"].exactly_one_of.clone().unwrap_or_default();
        assert_eq!(alternatives.len(), 1);
        assert_eq!(alternatives[0].equals_string.as_deref(), Some("b3"));
        assert_eq!(post["ecosystem_category"].required, None);
    }
}
