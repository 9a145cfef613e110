// ============================================================
// Layer 3 — Table Domain Type
// ============================================================
// A Table is the raw, parsed-but-not-yet-encoded form of a
// dataset: named columns of equal length, each holding Cells.
//
// A Cell is one of:
//   - Number  → anything that parsed as a float
//   - Text    → everything else
//   - Missing → the placeholder marker (usually "?")
//
// Cells are totally ordered so that categorical and label
// indices can be assigned by sorting:
//
//   Number (IEEE total order) < Text (lexicographic) < Missing
//
// e.g. ["red", 3, "blue", 1.5]  sorts to  [1.5, 3, "blue", "red"]

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{PrepError, PrepResult};

/// One raw table value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Parse a raw token. The token is expected to be trimmed already.
    pub fn parse(token: &str, missing_marker: Option<&str>) -> Self {
        if missing_marker == Some(token) {
            return Cell::Missing;
        }
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::from(v),
            _ => Cell::Text(token.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    fn rank(&self) -> u8 {
        match self {
            Cell::Number(_) => 0,
            Cell::Text(_) => 1,
            Cell::Missing => 2,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Missing => f.write_str("<missing>"),
        }
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => a.total_cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality must agree with Ord, so numbers compare bitwise via total_cmp
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl From<f64> for Cell {
    /// -0.0 is stored as 0.0 so the two never become separate categories
    fn from(v: f64) -> Self {
        Cell::Number(if v == 0.0 { 0.0 } else { v })
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// A single named column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name:   String,
    pub values: Vec<Cell>,
}

/// A collection of equally long named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns:  Vec<Column>,
    num_rows: usize,
}

impl Table {
    /// An empty table with no columns and no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from column names and row-major cells.
    /// Every row must have exactly one cell per name.
    pub fn from_rows(names: &[String], rows: Vec<Vec<Cell>>) -> PrepResult<Self> {
        let mut columns: Vec<Column> = names
            .iter()
            .map(|n| Column { name: n.clone(), values: Vec::with_capacity(rows.len()) })
            .collect();

        let num_rows = rows.len();
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != names.len() {
                return Err(PrepError::shape(format!(
                    "row {i} has {} cells, expected {}",
                    row.len(),
                    names.len()
                )));
            }
            for (col, cell) in columns.iter_mut().zip(row) {
                col.values.push(cell);
            }
        }

        let mut table = Self { columns: Vec::new(), num_rows };
        for col in columns {
            table.ensure_unique(&col.name)?;
            table.columns.push(col);
        }
        Ok(table)
    }

    /// Append a column. The first column fixes the row count.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Cell>) -> PrepResult<()> {
        let name = name.into();
        self.ensure_unique(&name)?;
        if self.columns.is_empty() {
            self.num_rows = values.len();
        } else if values.len() != self.num_rows {
            return Err(PrepError::shape(format!(
                "column '{name}' has {} values, table has {} rows",
                values.len(),
                self.num_rows
            )));
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Look up a column's values by name
    pub fn column(&self, name: &str) -> PrepResult<&[Cell]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| PrepError::MissingColumn(name.to_string()))
    }

    /// A new table keeping only the given row indices, in that order
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name:   c.name.clone(),
                values: indices.iter().map(|&i| c.values[i].clone()).collect(),
            })
            .collect();
        Table { columns, num_rows: indices.len() }
    }

    /// A new table without the named columns. Unknown names are ignored.
    pub fn drop_columns(&self, names: &[&str]) -> Table {
        let columns = self
            .columns
            .iter()
            .filter(|c| !names.contains(&c.name.as_str()))
            .cloned()
            .collect();
        Table { columns, num_rows: self.num_rows }
    }

    fn ensure_unique(&self, name: &str) -> PrepResult<()> {
        if self.has_column(name) {
            return Err(PrepError::InvalidSpec(format!("duplicate column '{name}'")));
        }
        Ok(())
    }
}
