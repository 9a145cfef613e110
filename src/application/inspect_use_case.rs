// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Decodes a record file and reports its shape and label
// distribution. Useful for checking a record before shipping it
// to the trainer: a corrupt or truncated file fails here with
// the same checks the trainer would apply.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::infra::record_store::read_record;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordReport {
    pub path:        PathBuf,
    pub rows:        usize,
    pub cols:        usize,
    /// label → number of rows carrying it
    pub label_counts: BTreeMap<u32, usize>,
    /// Smallest and largest feature value, if any
    pub value_range: Option<(f32, f32)>,
}

impl RecordReport {
    pub fn num_labels(&self) -> usize {
        self.label_counts.len()
    }
}

pub struct InspectUseCase {
    path: PathBuf,
}

impl InspectUseCase {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn execute(&self) -> Result<RecordReport> {
        let record = read_record(&self.path)?;
        tracing::debug!("Decoded '{}'", self.path.display());

        let value_range = record.features.as_slice().iter().fold(None, |acc, &v| match acc {
            None             => Some((v, v)),
            Some((lo, hi))   => Some((lo.min(v), hi.max(v))),
        });

        Ok(RecordReport {
            path:         self.path.clone(),
            rows:         record.num_rows(),
            cols:         record.num_cols(),
            label_counts: record.labels.counts(),
            value_range,
        })
    }
}
