//! Rule checking
//!
//! Applies the rules of a compiled class to instances or to a whole table.
//! A rule fires when all of its preconditions hold; a fired rule whose
//! postconditions fail is a violation.

pub mod matcher;

pub use matcher::{Absent, RuleMatcher};

use indexmap::IndexMap;
use linkml_core::error::{LinkMLError, Result};
use linkml_core::types::{Rule, SchemaDefinition};
use serde::Serialize;
use tracing::debug;

use crate::table::PathTable;

/// A failed postcondition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleViolation {
    /// 0-based row index, when checking a table
    pub row: Option<usize>,
    /// Index of the rule within the class
    pub rule_index: usize,
    /// Slot whose postcondition failed
    pub slot: String,
    /// Offending value (empty when absent)
    pub value: String,
}

/// Outcome of checking a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleCheckReport {
    /// Rows examined
    pub rows_checked: usize,
    /// Rule firings summed over all rows
    pub rules_applied: usize,
    /// Failed postconditions, in row order
    pub violations: Vec<RuleViolation>,
}

impl RuleCheckReport {
    /// Whether no rule was violated
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Checks instances against the rules of one class
#[derive(Debug, Clone)]
pub struct RuleChecker<'s> {
    slots: &'s [String],
    rules: Vec<(usize, &'s Rule)>,
}

impl<'s> RuleChecker<'s> {
    /// Checker for the rules of `class_name`
    ///
    /// # Errors
    ///
    /// Returns a schema validation error if the class does not exist.
    pub fn for_class(schema: &'s SchemaDefinition, class_name: &str) -> Result<Self> {
        let class = schema.classes.get(class_name).ok_or_else(|| {
            LinkMLError::schema_element(format!("class '{class_name}' not found"), class_name)
        })?;
        let rules = class.rules.iter().enumerate().collect();
        Ok(Self {
            slots: &class.slots,
            rules,
        })
    }

    /// Check one instance, returning the violations and how many rules fired
    pub fn check_instance(&self, instance: &IndexMap<String, String>) -> (Vec<RuleViolation>, usize) {
        let mut violations = Vec::new();
        let mut applied = 0;
        for (rule_index, rule) in &self.rules {
            if !RuleMatcher::matches(rule.preconditions.as_ref(), instance, Absent::Fails) {
                continue;
            }
            applied += 1;
            if let Some(slot) =
                RuleMatcher::first_failure(rule.postconditions.as_ref(), instance, Absent::Passes)
            {
                violations.push(RuleViolation {
                    row: None,
                    rule_index: *rule_index,
                    slot: slot.to_string(),
                    value: instance.get(slot).cloned().unwrap_or_default(),
                });
            }
        }
        (violations, applied)
    }

    /// Check every row of `table`, mapping columns to the class slots by
    /// position
    ///
    /// # Errors
    ///
    /// Returns a schema validation error if the table is wider than the class.
    pub fn check_table(&self, table: &PathTable) -> Result<RuleCheckReport> {
        if table.width() > self.slots.len() {
            return Err(LinkMLError::schema_validation(format!(
                "table has {} columns but the class has {} slots",
                table.width(),
                self.slots.len()
            )));
        }

        let mut report = RuleCheckReport::default();
        for (row_idx, row) in table.rows().enumerate() {
            let instance: IndexMap<String, String> = self
                .slots
                .iter()
                .zip(row)
                .map(|(slot, value)| (slot.clone(), value.to_string()))
                .collect();
            let (violations, applied) = self.check_instance(&instance);
            report.rows_checked += 1;
            report.rules_applied += applied;
            report.violations.extend(violations.into_iter().map(|v| RuleViolation {
                row: Some(row_idx),
                ..v
            }));
        }

        debug!(
            rows = report.rows_checked,
            applied = report.rules_applied,
            violations = report.violations.len(),
            "checked table against rules"
        );
        Ok(report)
    }
}
