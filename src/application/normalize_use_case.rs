// ============================================================
// Layer 2 — NormalizeUseCase
// ============================================================
// Rescales every feature column of a record into [0, 1) and
// writes the result to a new record. Labels pass through
// unchanged. Used on features exported from the pretrained
// image model, whose activations have arbitrary ranges.

use anyhow::Result;
use std::path::PathBuf;

use crate::data::preprocessor::Preprocessor;
use crate::infra::{
    record_store::{read_record, write_record},
    summary::RecordSummary,
};

pub struct NormalizeUseCase {
    input:  PathBuf,
    output: PathBuf,
}

impl NormalizeUseCase {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self { input: input.into(), output: output.into() }
    }

    pub fn execute(&self) -> Result<RecordSummary> {
        let mut record = read_record(&self.input)?;
        Preprocessor::new().normalize_min_max(&mut record.features);
        write_record(&self.output, &record)?;

        tracing::info!(
            "Normalised {} x {} features: '{}' → '{}'",
            record.num_rows(),
            record.num_cols(),
            self.input.display(),
            self.output.display()
        );

        let name = self
            .output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(RecordSummary::of(name, &record))
    }
}
