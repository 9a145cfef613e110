// ============================================================
// Layer 3 — Feature Matrix, Label Vector and Dataset Record
// ============================================================
// The encoded, trainer-ready form of a dataset.
//
//   FeatureMatrix  num_rows × num_cols f32 values, row-major
//   LabelVector    one dense integer class per row
//   DatasetRecord  the pair of them, as written to disk
//
// The matrix stores its width explicitly: a matrix with zero
// rows still knows how many columns it has, so an empty test
// partition round-trips with the right shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::{PrepError, PrepResult};

/// Row-major dense matrix of features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    num_rows: usize,
    num_cols: usize,
    data:     Vec<f32>,
}

impl FeatureMatrix {
    /// An empty matrix with a fixed width
    pub fn with_width(num_cols: usize) -> Self {
        Self { num_rows: 0, num_cols, data: Vec::new() }
    }

    /// Wrap a flat row-major buffer. Fails if the buffer length
    /// is not `num_rows * num_cols`.
    pub fn from_flat(num_rows: usize, num_cols: usize, data: Vec<f32>) -> PrepResult<Self> {
        let expected = num_rows
            .checked_mul(num_cols)
            .ok_or_else(|| PrepError::shape(format!("{num_rows} x {num_cols} overflows")))?;
        if data.len() != expected {
            return Err(PrepError::shape(format!(
                "{} values cannot fill a {num_rows} x {num_cols} matrix",
                data.len()
            )));
        }
        Ok(Self { num_rows, num_cols, data })
    }

    /// Build from rows. Every row must be as wide as the first one.
    /// An empty row list produces a 0 x 0 matrix.
    pub fn from_rows(rows: &[Vec<f32>]) -> PrepResult<Self> {
        let num_cols = rows.first().map_or(0, Vec::len);
        let mut m = Self::with_width(num_cols);
        for row in rows {
            m.push_row(row)?;
        }
        Ok(m)
    }

    pub fn push_row(&mut self, row: &[f32]) -> PrepResult<()> {
        if row.len() != self.num_cols {
            return Err(PrepError::shape(format!(
                "row {} has width {}, expected {}",
                self.num_rows,
                row.len(),
                self.num_cols
            )));
        }
        self.data.extend_from_slice(row);
        self.num_rows += 1;
        Ok(())
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// The flat row-major buffer
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Borrow row `i`. Panics if out of range, like slice indexing.
    pub fn row(&self, i: usize) -> &[f32] {
        let start = i * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Mutable access to one column across all rows
    pub fn column_values_mut(&mut self, col: usize) -> impl Iterator<Item = &mut f32> {
        let width = self.num_cols;
        self.data.iter_mut().skip(col).step_by(width.max(1))
    }

    /// A new matrix containing the given rows, in that order
    pub fn select_rows(&self, indices: &[usize]) -> FeatureMatrix {
        let mut data = Vec::with_capacity(indices.len() * self.num_cols);
        for &i in indices {
            data.extend_from_slice(self.row(i));
        }
        FeatureMatrix { num_rows: indices.len(), num_cols: self.num_cols, data }
    }
}

/// Dense integer class labels, one per row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelVector(Vec<u32>);

impl LabelVector {
    pub fn new(labels: Vec<u32>) -> Self {
        Self(labels)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Number of distinct values present
    pub fn num_distinct(&self) -> usize {
        self.counts().len()
    }

    /// Frequency of each label value, ordered by label
    pub fn counts(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for &l in &self.0 {
            *counts.entry(l).or_insert(0) += 1;
        }
        counts
    }

    pub fn select(&self, indices: &[usize]) -> LabelVector {
        LabelVector(indices.iter().map(|&i| self.0[i]).collect())
    }
}

impl From<Vec<u32>> for LabelVector {
    fn from(v: Vec<u32>) -> Self {
        Self(v)
    }
}

/// A feature matrix with its labels: the unit written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRecord {
    pub features: FeatureMatrix,
    pub labels:   LabelVector,
}

impl DatasetRecord {
    /// Pair a matrix with its labels; row counts must agree.
    pub fn new(features: FeatureMatrix, labels: LabelVector) -> PrepResult<Self> {
        if features.num_rows() != labels.len() {
            return Err(PrepError::shape(format!(
                "{} feature rows but {} labels",
                features.num_rows(),
                labels.len()
            )));
        }
        Ok(Self { features, labels })
    }

    pub fn num_rows(&self) -> usize {
        self.features.num_rows()
    }

    pub fn num_cols(&self) -> usize {
        self.features.num_cols()
    }

    /// Recomputed from the labels, never stored separately
    pub fn num_labels(&self) -> usize {
        self.labels.num_distinct()
    }
}
