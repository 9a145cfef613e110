// ============================================================
// Layer 4 — Dataset Parsers
// ============================================================
// One DatasetParser per public dataset. Most of them are just
// data: a delimited-text layout plus a description of which
// columns are numeric, categorical or the label. Those are all
// instances of TabularParser below.
//
// The two that need real code:
//   ctr.rs     class-balanced random sampling of rows
//   images.rs  MNIST IDX files (two inputs) and precomputed
//              image-model feature tables

pub mod ctr;
pub mod images;
pub mod uci;

use crate::data::loader::{DelimitedFormat, DelimitedLoader};
use crate::domain::columns::ColumnSpec;
use crate::domain::error::PrepResult;
use crate::domain::table::Table;
use crate::domain::traits::DatasetParser;

/// How a parsed table maps onto a ColumnSpec
#[derive(Debug, Clone)]
pub enum ColumnLayout {
    /// Fixed numeric / categorical / label lists
    Explicit(ColumnSpec),
    /// Listed numeric columns; every other column except the
    /// label is categorical, in table order
    NumericThenRest { numeric: Vec<String>, label: String },
    /// Every column except the label is numeric, in table order
    AllNumeric { label: String },
}

impl ColumnLayout {
    pub fn resolve(&self, table: &Table) -> PrepResult<ColumnSpec> {
        let spec = match self {
            ColumnLayout::Explicit(spec) => spec.clone(),
            ColumnLayout::NumericThenRest { numeric, label } => {
                let rest = table
                    .column_names()
                    .filter(|c| *c != label.as_str() && !numeric.iter().any(|n| n == *c))
                    .map(str::to_string)
                    .collect::<Vec<_>>();
                ColumnSpec::new(numeric.clone(), rest, label.clone())
            }
            ColumnLayout::AllNumeric { label } => {
                let numeric = table
                    .column_names()
                    .filter(|c| *c != label.as_str())
                    .map(str::to_string)
                    .collect::<Vec<_>>();
                ColumnSpec::new(numeric, Vec::<String>::new(), label.clone())
            }
        };
        spec.validate(table)?;
        Ok(spec)
    }
}

/// A single delimited-text file with a fixed column layout
#[derive(Debug, Clone)]
pub struct TabularParser {
    pub name:   &'static str,
    pub format: DelimitedFormat,
    pub layout: ColumnLayout,
    /// Columns removed right after loading (ids, mostly-empty fields)
    pub ignore: Vec<&'static str>,
}

impl TabularParser {
    pub fn new(name: &'static str, format: DelimitedFormat, layout: ColumnLayout) -> Self {
        Self { name, format, layout, ignore: Vec::new() }
    }

    pub fn ignoring(mut self, columns: &[&'static str]) -> Self {
        self.ignore = columns.to_vec();
        self
    }
}

impl DatasetParser for TabularParser {
    fn name(&self) -> &'static str {
        self.name
    }

    fn parse(&self, inputs: &[Vec<u8>]) -> PrepResult<Table> {
        let raw = single_input(self.name, inputs)?;
        let table = DelimitedLoader::new(self.format.clone()).load(raw, self.name)?;
        Ok(if self.ignore.is_empty() { table } else { table.drop_columns(&self.ignore) })
    }

    fn column_spec(&self, table: &Table) -> PrepResult<ColumnSpec> {
        self.layout.resolve(table)
    }
}

/// Helper for parsers that read exactly one input
pub(crate) fn single_input<'a>(name: &str, inputs: &'a [Vec<u8>]) -> PrepResult<&'a [u8]> {
    match inputs {
        [only] => Ok(only.as_slice()),
        _ => Err(crate::domain::error::PrepError::parse(
            name,
            format!("expected 1 input, got {}", inputs.len()),
        )),
    }
}

/// `prefix1 .. prefixN` column names
pub(crate) fn numbered(prefix: &str, range: std::ops::RangeInclusive<usize>) -> Vec<String> {
    range.map(|i| format!("{prefix}{i}")).collect()
}
