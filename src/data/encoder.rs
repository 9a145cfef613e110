// ============================================================
// Layer 4 — Tabular Encoder
// ============================================================
// Turns a Table into a FeatureMatrix + LabelVector.
//
// Output row layout for ColumnSpec { numeric: [n1, n2],
// categorical: [c1, c2], label: y }:
//
//   [ n1, n2, one_hot(c1)..., one_hot(c2)... ]
//
// Fitting:
//   For every categorical column, and for the label column,
//   collect the distinct values and SORT them (Cell order:
//   numbers ascending, then text lexicographically). A value's
//   position in that sorted list is its one-hot bit / class id.
//   Sorting rather than first-seen order means the mapping only
//   depends on the set of values, not on row order.
//
// Example:
//   color ∈ {red, blue}  → sorted [blue, red]
//   red  → [0, 1]
//   blue → [1, 0]
//
// The fitted mapping is returned as a FittedEncoder value so
// it can be saved next to the records and applied to new data
// later (transform). Values outside the fitted sets fail with
// UnknownCategory.
//
// Missing cells are never encoded: the whole table is rejected
// with MissingValue. Callers filter first (see preprocessor.rs).

use serde::{Deserialize, Serialize};

use crate::domain::columns::ColumnSpec;
use crate::domain::error::{PrepError, PrepResult};
use crate::domain::record::{FeatureMatrix, LabelVector};
use crate::domain::table::{Cell, Table};

/// Sorted distinct values of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryIndex {
    pub column: String,
    values:     Vec<Cell>,
}

impl CategoryIndex {
    /// Collect the distinct values of `cells`, sorted
    pub fn fit(column: &str, cells: &[Cell]) -> PrepResult<Self> {
        if let Some(row) = cells.iter().position(Cell::is_missing) {
            return Err(PrepError::MissingValue { column: column.to_string(), row });
        }
        let mut values = cells.to_vec();
        values.sort();
        values.dedup();
        Ok(Self { column: column.to_string(), values })
    }

    /// Number of distinct values (the one-hot block width)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[Cell] {
        &self.values
    }

    /// Position of `cell` in the sorted value list
    pub fn index_of(&self, cell: &Cell) -> PrepResult<usize> {
        self.values
            .binary_search(cell)
            .map_err(|_| PrepError::UnknownCategory {
                column: self.column.clone(),
                value:  cell.to_string(),
            })
    }
}

/// The fitted encoding: everything needed to encode more data
/// into exactly the same feature layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedEncoder {
    pub spec:    ColumnSpec,
    categories:  Vec<CategoryIndex>,
    classes:     CategoryIndex,
}

impl FittedEncoder {
    /// Learn the categorical and label mappings from `table`
    pub fn fit(table: &Table, spec: &ColumnSpec) -> PrepResult<Self> {
        spec.validate(table)?;

        let categories = spec
            .categorical
            .iter()
            .map(|name| CategoryIndex::fit(name, table.column(name)?))
            .collect::<PrepResult<Vec<_>>>()?;
        let classes = CategoryIndex::fit(&spec.label, table.column(&spec.label)?)?;

        Ok(Self { spec: spec.clone(), categories, classes })
    }

    /// Output width: numeric columns plus every one-hot block
    pub fn width(&self) -> usize {
        self.spec.numeric.len() + self.categories.iter().map(CategoryIndex::len).sum::<usize>()
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn categories(&self) -> &[CategoryIndex] {
        &self.categories
    }

    /// Raw label values in class-id order
    pub fn classes(&self) -> &[Cell] {
        self.classes.values()
    }

    /// Encode `table` with the fitted mappings
    pub fn transform(&self, table: &Table) -> PrepResult<(FeatureMatrix, LabelVector)> {
        self.spec.validate(table)?;

        let numeric = self
            .spec
            .numeric
            .iter()
            .map(|name| table.column(name).map(|cells| (name.as_str(), cells)))
            .collect::<PrepResult<Vec<_>>>()?;
        let categorical = self
            .categories
            .iter()
            .map(|idx| table.column(&idx.column).map(|cells| (idx, cells)))
            .collect::<PrepResult<Vec<_>>>()?;
        let label_cells = table.column(&self.spec.label)?;

        let width = self.width();
        let mut matrix = FeatureMatrix::with_width(width);
        let mut labels = Vec::with_capacity(table.num_rows());
        let mut row = vec![0.0f32; width];

        for r in 0..table.num_rows() {
            row.iter_mut().for_each(|v| *v = 0.0);

            for (c, (name, cells)) in numeric.iter().enumerate() {
                row[c] = numeric_value(name, r, &cells[r])?;
            }

            let mut offset = numeric.len();
            for (idx, cells) in &categorical {
                let cell = &cells[r];
                if cell.is_missing() {
                    return Err(PrepError::MissingValue { column: idx.column.clone(), row: r });
                }
                row[offset + idx.index_of(cell)?] = 1.0;
                offset += idx.len();
            }

            let label = &label_cells[r];
            if label.is_missing() {
                return Err(PrepError::MissingValue { column: self.spec.label.clone(), row: r });
            }
            labels.push(self.classes.index_of(label)? as u32);

            matrix.push_row(&row)?;
        }

        Ok((matrix, LabelVector::new(labels)))
    }
}

fn numeric_value(column: &str, row: usize, cell: &Cell) -> PrepResult<f32> {
    match cell {
        Cell::Number(v) => {
            let f = *v as f32;
            if f.is_infinite() {
                // finite in f64 but past f32::MAX
                return Err(PrepError::NotNumeric { column: column.to_string(), row, value: v.to_string() });
            }
            Ok(f)
        }
        Cell::Missing => Err(PrepError::MissingValue { column: column.to_string(), row }),
        Cell::Text(s) => Err(PrepError::NotNumeric {
            column: column.to_string(),
            row,
            value: s.clone(),
        }),
    }
}

/// Fit on `table` and encode it in one go.
pub fn encode(table: &Table, spec: &ColumnSpec) -> PrepResult<(FeatureMatrix, LabelVector, FittedEncoder)> {
    let encoder = FittedEncoder::fit(table, spec)?;
    let (matrix, labels) = encoder.transform(table)?;

    log_numeric_ranges(table, spec);
    tracing::debug!(
        "Encoded {} rows into {} columns ({} numeric, {} one-hot), {} classes",
        matrix.num_rows(),
        matrix.num_cols(),
        spec.numeric.len(),
        matrix.num_cols() - spec.numeric.len(),
        encoder.num_classes()
    );

    Ok((matrix, labels, encoder))
}

/// Debug-level min/max per numeric column
fn log_numeric_ranges(table: &Table, spec: &ColumnSpec) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    for name in &spec.numeric {
        let Ok(cells) = table.column(name) else { continue };
        let (lo, hi) = cells
            .iter()
            .filter_map(Cell::as_number)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        tracing::debug!("{}: {} to {}", name, lo, hi);
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// age / color / y example table
    fn people() -> Table {
        let mut t = Table::new();
        t.push_column("age", vec![Cell::from(20.0), Cell::from(30.0), Cell::from(40.0)]).unwrap();
        t.push_column("color", vec!["red".into(), "blue".into(), "red".into()]).unwrap();
        t.push_column("y", vec!["yes".into(), "no".into(), "no".into()]).unwrap();
        t
    }

    fn people_spec() -> ColumnSpec {
        ColumnSpec::new(["age"], ["color"], "y")
    }

    #[test]
    fn test_concrete_scenario() {
        let (m, l, enc) = encode(&people(), &people_spec()).unwrap();

        // sorted categories: blue < red
        assert_eq!(m.num_cols(), 3);
        assert_eq!(m.row(0), &[20.0, 0.0, 1.0]);
        assert_eq!(m.row(1), &[30.0, 1.0, 0.0]);
        assert_eq!(m.row(2), &[40.0, 0.0, 1.0]);

        // sorted labels: no = 0, yes = 1
        assert_eq!(l.as_slice(), &[1, 0, 0]);
        assert_eq!(enc.classes(), &[Cell::from("no"), Cell::from("yes")]);
    }

    #[test]
    fn test_shape_matches_spec() {
        let mut t = people();
        t.push_column("size", vec!["s".into(), "m".into(), "l".into()]).unwrap();
        let spec = ColumnSpec::new(["age"], ["color", "size"], "y");

        let (m, l, enc) = encode(&t, &spec).unwrap();
        assert_eq!(m.num_rows(), t.num_rows());
        assert_eq!(m.num_cols(), 1 + 2 + 3);
        assert_eq!(enc.width(), m.num_cols());
        assert_eq!(l.len(), 3);
        // exactly one bit set per one-hot block
        for row in (0..m.num_rows()).map(|i| m.row(i)) {
            assert_eq!(row[1..3].iter().sum::<f32>(), 1.0);
            assert_eq!(row[3..6].iter().sum::<f32>(), 1.0);
        }
    }

    #[test]
    fn test_deterministic() {
        let (m1, l1, e1) = encode(&people(), &people_spec()).unwrap();
        let (m2, l2, e2) = encode(&people(), &people_spec()).unwrap();
        assert_eq!(m1, m2);
        assert_eq!(l1, l2);
        assert_eq!(e1, e2);
    }

    #[test]
    fn test_mapping_independent_of_row_order() {
        let t = people();
        let reversed = t.select_rows(&[2, 1, 0]);
        let (_, _, e1) = encode(&t, &people_spec()).unwrap();
        let (_, _, e2) = encode(&reversed, &people_spec()).unwrap();
        assert_eq!(e1, e2);
    }

    #[test]
    fn test_labels_are_dense() {
        let mut t = Table::new();
        let raw: Vec<Cell> = [4.0, 2.0, 4.0, 10.0, 2.0].iter().map(|&v| Cell::from(v)).collect();
        t.push_column("x", raw.clone()).unwrap();
        t.push_column("class", raw).unwrap();

        let (_, l, enc) = encode(&t, &ColumnSpec::new(["x"], Vec::<String>::new(), "class")).unwrap();
        let distinct: BTreeSet<u32> = l.as_slice().iter().copied().collect();
        assert_eq!(distinct, (0..enc.num_classes() as u32).collect::<BTreeSet<u32>>());
        // numeric sort: 2 < 4 < 10
        assert_eq!(l.as_slice(), &[1, 0, 1, 2, 0]);
    }

    #[test]
    fn test_missing_value_rejects_table() {
        let mut t = people();
        t.push_column("w", vec![Cell::from(1.0), Cell::Missing, Cell::from(3.0)]).unwrap();
        let spec = ColumnSpec::new(["age", "w"], ["color"], "y");
        let err = encode(&t, &spec).unwrap_err();
        assert!(matches!(err, PrepError::MissingValue { ref column, row: 1 } if column == "w"));
    }

    #[test]
    fn test_missing_categorical_rejected_at_fit() {
        let mut t = Table::new();
        t.push_column("c", vec!["a".into(), Cell::Missing]).unwrap();
        t.push_column("y", vec!["p".into(), "q".into()]).unwrap();
        let err = encode(&t, &ColumnSpec::new(Vec::<String>::new(), ["c"], "y")).unwrap_err();
        assert!(matches!(err, PrepError::MissingValue { .. }));
    }

    #[test]
    fn test_text_in_numeric_column() {
        let spec = ColumnSpec::new(["color"], Vec::<String>::new(), "y");
        let err = encode(&people(), &spec).unwrap_err();
        assert!(matches!(err, PrepError::NotNumeric { .. }));
    }

    #[test]
    fn test_value_beyond_f32_range() {
        let mut t = people();
        t.push_column("w", vec![Cell::from(1.0), Cell::parse("1e300", None), Cell::from(3.0)]).unwrap();
        let spec = ColumnSpec::new(["age", "w"], ["color"], "y");
        let err = encode(&t, &spec).unwrap_err();
        assert!(matches!(err, PrepError::NotNumeric { ref column, row: 1, .. } if column == "w"));
    }

    #[test]
    fn test_negative_zero_is_one_category() {
        let mut t = Table::new();
        t.push_column("c", vec![Cell::parse("0", None), Cell::parse("-0", None), Cell::parse("0.0", None)])
            .unwrap();
        t.push_column("y", vec!["p".into(), "q".into(), "p".into()]).unwrap();
        let (m, _, enc) = encode(&t, &ColumnSpec::new(Vec::<String>::new(), ["c"], "y")).unwrap();
        assert_eq!(enc.width(), 1);
        assert_eq!(m.as_slice(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_transform_new_data_with_fitted_encoder() {
        let (_, _, enc) = encode(&people(), &people_spec()).unwrap();

        let mut fresh = Table::new();
        fresh.push_column("age", vec![Cell::from(50.0)]).unwrap();
        fresh.push_column("color", vec!["blue".into()]).unwrap();
        fresh.push_column("y", vec!["yes".into()]).unwrap();

        let (m, l) = enc.transform(&fresh).unwrap();
        assert_eq!(m.row(0), &[50.0, 1.0, 0.0]);
        assert_eq!(l.as_slice(), &[1]);
    }

    #[test]
    fn test_unknown_category() {
        let (_, _, enc) = encode(&people(), &people_spec()).unwrap();

        let mut fresh = Table::new();
        fresh.push_column("age", vec![Cell::from(50.0)]).unwrap();
        fresh.push_column("color", vec!["green".into()]).unwrap();
        fresh.push_column("y", vec!["yes".into()]).unwrap();

        let err = enc.transform(&fresh).unwrap_err();
        assert!(matches!(err, PrepError::UnknownCategory { ref value, .. } if value == "green"));
    }

    #[test]
    fn test_unknown_label() {
        let (_, _, enc) = encode(&people(), &people_spec()).unwrap();

        let mut fresh = Table::new();
        fresh.push_column("age", vec![Cell::from(50.0)]).unwrap();
        fresh.push_column("color", vec!["red".into()]).unwrap();
        fresh.push_column("y", vec!["maybe".into()]).unwrap();

        let err = enc.transform(&fresh).unwrap_err();
        assert!(matches!(
            err,
            PrepError::UnknownCategory { ref column, ref value } if column == "y" && value == "maybe"
        ));
    }

    #[test]
    fn test_empty_table() {
        let mut t = Table::new();
        t.push_column("age", vec![]).unwrap();
        t.push_column("color", vec![]).unwrap();
        t.push_column("y", vec![]).unwrap();

        let (m, l, enc) = encode(&t, &people_spec()).unwrap();
        assert_eq!(m.num_rows(), 0);
        assert_eq!(m.num_cols(), 1);
        assert!(l.as_slice().is_empty());
        assert_eq!(enc.num_classes(), 0);
    }

    #[test]
    fn test_encoder_json_round_trip() {
        let (_, _, enc) = encode(&people(), &people_spec()).unwrap();
        let json = serde_json::to_string(&enc).unwrap();
        let back: FittedEncoder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, enc);
    }
}
