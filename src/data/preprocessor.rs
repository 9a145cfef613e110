// ============================================================
// Layer 4 — Table / Matrix Preprocessor
// ============================================================
// Two clean-up steps that sit either side of the encoder:
//
//   Before encoding — drop_incomplete_rows
//     Public datasets mark unknown values with a placeholder
//     (usually "?"). The encoder refuses to guess what those
//     mean, so the pipeline removes every row that has a
//     missing cell in any column it is about to encode.
//     Columns the encoder never reads are not checked: a "?"
//     in a dropped id column must not cost us the row.
//
//   After encoding — normalize_min_max
//     Image-model feature vectors come out on arbitrary scales.
//     Each feature column is rescaled into [0, 1) with
//
//         x' = (x - min) / (max - min + epsilon)
//
//     The epsilon keeps constant columns finite (they map to 0).
//     On wide ranges f32 rounding can swallow the epsilon, so
//     results are clamped to the largest f32 below 1.

use crate::domain::error::PrepResult;
use crate::domain::record::FeatureMatrix;
use crate::domain::table::Table;

const DEFAULT_EPSILON: f32 = 1e-6;
const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

pub struct Preprocessor {
    epsilon: f32,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self { epsilon: DEFAULT_EPSILON }
    }

    /// Remove rows with a missing cell in any of `columns`.
    /// Returns the filtered table and how many rows were dropped;
    /// a table with nothing to drop is handed back as is.
    pub fn drop_incomplete_rows(&self, table: Table, columns: &[&str]) -> PrepResult<(Table, usize)> {
        let keep: Vec<usize> = {
            let cols = columns
                .iter()
                .map(|c| table.column(c))
                .collect::<PrepResult<Vec<_>>>()?;
            (0..table.num_rows())
                .filter(|&r| cols.iter().all(|col| !col[r].is_missing()))
                .collect()
        };

        let dropped = table.num_rows() - keep.len();
        if dropped == 0 {
            return Ok((table, 0));
        }

        tracing::debug!("Dropping {} of {} rows with missing values", dropped, table.num_rows());
        Ok((table.select_rows(&keep), dropped))
    }

    /// Rescale every column of `matrix` into [0, 1) in place
    pub fn normalize_min_max(&self, matrix: &mut FeatureMatrix) {
        for col in 0..matrix.num_cols() {
            let (min, max) = matrix
                .column_values_mut(col)
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(*v), hi.max(*v))
                });
            if !min.is_finite() {
                // zero rows
                continue;
            }
            let scale = max - min + self.epsilon;
            for v in matrix.column_values_mut(col) {
                *v = ((*v - min) / scale).min(BELOW_ONE);
            }
        }
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::Cell;

    fn table() -> Table {
        let mut t = Table::new();
        t.push_column("id", vec![Cell::Missing, Cell::from(2.0), Cell::from(3.0)]).unwrap();
        t.push_column("a", vec![Cell::from(1.0), Cell::Missing, Cell::from(3.0)]).unwrap();
        t.push_column("y", vec![Cell::from("p"), Cell::from("q"), Cell::from("p")]).unwrap();
        t
    }

    #[test]
    fn test_drops_only_rows_missing_in_referenced_columns() {
        let p = Preprocessor::new();
        let (t, dropped) = p.drop_incomplete_rows(table(), &["a", "y"]).unwrap();
        // row 0 has a missing id, but "id" is not referenced
        assert_eq!(dropped, 1);
        assert_eq!(t.num_rows(), 2);
        assert_eq!(t.column("a").unwrap(), &[Cell::from(1.0), Cell::from(3.0)]);
    }

    #[test]
    fn test_nothing_to_drop_returns_same_table() {
        let p = Preprocessor::new();
        let original = table();
        let cells = original.column("y").unwrap().as_ptr();

        let (t, dropped) = p.drop_incomplete_rows(original, &["y"]).unwrap();
        assert_eq!(dropped, 0);
        assert_eq!(t.num_rows(), 3);
        // same column storage, no copy
        assert_eq!(t.column("y").unwrap().as_ptr(), cells);
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let p = Preprocessor::new();
        assert!(p.drop_incomplete_rows(table(), &["nope"]).is_err());
    }

    #[test]
    fn test_normalize_range() {
        let p = Preprocessor::new();
        let mut m = FeatureMatrix::from_rows(&[
            vec![-2.0, 5.0],
            vec![0.0, 5.0],
            vec![2.0, 5.0],
        ])
        .unwrap();
        p.normalize_min_max(&mut m);

        for v in m.as_slice() {
            assert!((0.0..1.0).contains(v), "{v} out of range");
        }
        assert_eq!(m.row(0)[0], 0.0);
        assert!((m.row(1)[0] - 0.5).abs() < 1e-4);
        // constant column collapses to zero
        assert_eq!(m.row(2)[1], 0.0);
    }

    #[test]
    fn test_normalize_wide_range_stays_below_one() {
        let p = Preprocessor::new();
        let mut m = FeatureMatrix::from_rows(&[vec![0.0], vec![1.0e6]]).unwrap();
        p.normalize_min_max(&mut m);
        assert!(m.row(1)[0] < 1.0);
    }

    #[test]
    fn test_normalize_empty_matrix() {
        let p = Preprocessor::new();
        let mut m = FeatureMatrix::with_width(3);
        p.normalize_min_max(&mut m);
        assert_eq!(m.num_rows(), 0);
    }
}
