//! Identifier derivation for column headers
//!
//! Both functions lower-case the header and split it into words on
//! whitespace only; punctuation inside a word is kept as-is.

use convert_case::{Case, Casing};

/// Slot name for a column header: `ECOSYSTEM CATEGORY` -> `ecosystem_category`
pub fn field_name(column: &str) -> String {
    normalize(column).from_case(Case::Lower).to_case(Case::Snake)
}

/// Enum name for a column header: `ECOSYSTEM CATEGORY` -> `EcosystemCategory`
pub fn enum_name(column: &str) -> String {
    normalize(column).from_case(Case::Lower).to_case(Case::Pascal)
}

fn normalize(column: &str) -> String {
    column
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
