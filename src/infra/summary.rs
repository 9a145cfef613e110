// ============================================================
// Layer 6 — Summary Log
// ============================================================
// Appends one line per written record to summary.csv in the
// output directory, so a whole preparation sweep can be checked
// at a glance without decoding every record.
//
// Example CSV output:
//   name,rows,cols,labels
//   adult_train,30163,104,2
//   adult_test,15060,104,2
//   ...
//
// Re-running a dataset appends new lines; nothing is rewritten.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::record::DatasetRecord;

const HEADER: &str = "name,rows,cols,labels";

/// One row of summary.csv
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    /// File name of the record, e.g. "adult_train"
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    /// Distinct labels present in this record
    pub labels: usize,
}

impl RecordSummary {
    pub fn of(name: impl Into<String>, record: &DatasetRecord) -> Self {
        Self {
            name:   name.into(),
            rows:   record.num_rows(),
            cols:   record.num_cols(),
            labels: record.num_labels(),
        }
    }
}

pub struct SummaryLogger {
    csv_path: PathBuf,
}

impl SummaryLogger {
    /// Open (or start) summary.csv in `dir`.
    /// Writes the header only if the file doesn't exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;

        let csv_path = dir.join("summary.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")
                .with_context(|| format!("Cannot write '{}'", csv_path.display()))?;
            tracing::debug!("Created summary CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, s: &RecordSummary) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(f, "{},{},{},{}", s.name, s.rows, s.cols, s.labels)
            .with_context(|| format!("Cannot write '{}'", self.csv_path.display()))
    }
}
