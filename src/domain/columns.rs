// ============================================================
// Layer 3 — Column Spec
// ============================================================
// Says which table columns feed the encoder and how:
//
//   numeric      → passed through as-is, in this order
//   categorical  → one-hot encoded, blocks in this order
//   label        → encoded to a dense integer class
//
// The three sets must not overlap.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::error::{PrepError, PrepResult};
use crate::domain::table::Table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub numeric:     Vec<String>,
    pub categorical: Vec<String>,
    pub label:       String,
}

impl ColumnSpec {
    pub fn new<N, C>(numeric: N, categorical: C, label: impl Into<String>) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            numeric:     numeric.into_iter().map(Into::into).collect(),
            categorical: categorical.into_iter().map(Into::into).collect(),
            label:       label.into(),
        }
    }

    /// Every column the encoder will read, label last
    pub fn referenced(&self) -> impl Iterator<Item = &str> {
        self.numeric
            .iter()
            .chain(self.categorical.iter())
            .map(String::as_str)
            .chain(std::iter::once(self.label.as_str()))
    }

    /// Check the sets are disjoint and every column exists in `table`
    pub fn validate(&self, table: &Table) -> PrepResult<()> {
        let mut seen = HashSet::new();
        for name in self.referenced() {
            if !seen.insert(name) {
                return Err(PrepError::InvalidSpec(format!(
                    "column '{name}' is referenced more than once"
                )));
            }
            if !table.has_column(name) {
                return Err(PrepError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }
}
