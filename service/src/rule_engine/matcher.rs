//! Slot condition matching
//!
//! Instances are flat maps from slot name to string value. A slot that is
//! missing or blank is absent.

use indexmap::IndexMap;
use linkml_core::types::{AnonymousSlotExpression, RuleConditions, SlotCondition};

/// How an absent value is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absent {
    /// An absent value never matches (rule preconditions)
    Fails,
    /// An absent value matches unless the condition is `required`
    /// (rule postconditions)
    Passes,
}

/// Evaluates `SlotCondition`s against string instances
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleMatcher;

impl RuleMatcher {
    /// Whether every slot condition in `conditions` holds.
    ///
    /// Conditions without slot conditions hold trivially.
    #[must_use]
    pub fn matches(
        conditions: Option<&RuleConditions>,
        instance: &IndexMap<String, String>,
        absent: Absent,
    ) -> bool {
        Self::first_failure(conditions, instance, absent).is_none()
    }

    /// Name of the first slot whose condition does not hold, if any
    #[must_use]
    pub fn first_failure<'c>(
        conditions: Option<&'c RuleConditions>,
        instance: &IndexMap<String, String>,
        absent: Absent,
    ) -> Option<&'c str> {
        let slot_conditions = conditions.and_then(|c| c.slot_conditions.as_ref())?;
        slot_conditions
            .iter()
            .find(|(slot, condition)| {
                let value = instance
                    .get(slot.as_str())
                    .map(String::as_str)
                    .filter(|v| !v.trim().is_empty());
                !Self::match_slot_condition(condition, value, absent)
            })
            .map(|(slot, _)| slot.as_str())
    }

    /// Evaluate one condition against an optional value
    #[must_use]
    pub fn match_slot_condition(
        condition: &SlotCondition,
        value: Option<&str>,
        absent: Absent,
    ) -> bool {
        let Some(value) = value else {
            return match absent {
                Absent::Fails => false,
                Absent::Passes => condition.required != Some(true),
            };
        };

        if let Some(expected) = &condition.equals_string
            && value != expected.as_str()
        {
            return false;
        }
        if let Some(alternatives) = &condition.exactly_one_of
            && alternatives
                .iter()
                .filter(|alt| Self::match_expression(alt, value))
                .count()
                != 1
        {
            return false;
        }
        true
    }

    fn match_expression(expression: &AnonymousSlotExpression, value: &str) -> bool {
        expression
            .equals_string
            .as_deref()
            .is_none_or(|expected| expected == value)
    }
}
