//! Prefix completion index
//!
//! Maps every observed path prefix (including the empty prefix) to the set of
//! values seen immediately after it. Prefixes keep first-observation order;
//! completion sets are kept sorted.

use indexmap::IndexMap;
use std::collections::BTreeSet;
use tracing::warn;

use crate::table::{PathTable, is_blank};

/// A path prefix: the first `k` values of a row
pub type PartialPath = Vec<String>;

/// Values observed at position `k` after a prefix of length `k`
pub type CompletionSet = BTreeSet<String>;

/// Prefix -> completion set mapping built from a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionIndex {
    completions: IndexMap<PartialPath, CompletionSet>,
}

impl CompletionIndex {
    /// Scan every row of `table` and record its prefix completions
    pub fn build(table: &PathTable) -> Self {
        let mut index = Self::default();
        for (row_idx, row) in table.rows().enumerate() {
            let path = table.path(row_idx).unwrap_or_default();
            if row[path.len()..].iter().any(|v| !is_blank(v)) {
                warn!(
                    row = row_idx + 1,
                    position = path.len(),
                    "values after a blank cell are not part of the path"
                );
            }
            index.record_path(&path);
        }
        index
    }

    fn record_path(&mut self, path: &[&str]) {
        let mut prefix: PartialPath = Vec::with_capacity(path.len());
        for value in path {
            match self.completions.get_mut(&prefix) {
                Some(set) => {
                    set.insert((*value).to_string());
                }
                None => {
                    self.completions
                        .insert(prefix.clone(), BTreeSet::from([(*value).to_string()]));
                }
            }
            prefix.push((*value).to_string());
        }
    }

    /// Completion set for `prefix`, if that prefix was observed
    pub fn get<S: AsRef<str>>(&self, prefix: &[S]) -> Option<&CompletionSet> {
        let key: PartialPath = prefix.iter().map(|s| s.as_ref().to_string()).collect();
        self.completions.get(&key)
    }

    /// Iterate prefixes in first-observed order
    pub fn iter(&self) -> impl Iterator<Item = (&PartialPath, &CompletionSet)> {
        self.completions.iter()
    }

    /// Number of distinct prefixes, the empty prefix included
    pub fn len(&self) -> usize {
        self.completions.len()
    }

    /// Whether no prefix was observed
    pub fn is_empty(&self) -> bool {
        self.completions.is_empty()
    }
}
