// ============================================================
// Layer 6 — Record Store
// ============================================================
// Reads and writes prepared records and their encoder sidecars.
//
// File naming convention:
//   <out_dir>/
//     adult_train          ← protobuf record, no extension
//     adult_test           ← protobuf record, no extension
//     adult_encoder.json   ← FittedEncoder (spec + category lists)
//     summary.csv          ← see summary.rs
//
// Every write goes to a temporary file in the same directory
// and is renamed over the destination only once fully written,
// so an interrupted run never leaves a truncated record behind.
// The rename is atomic because source and destination share a
// filesystem.

use anyhow::{Context, Result};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

use crate::data::encoder::FittedEncoder;
use crate::domain::record::{DatasetRecord, FeatureMatrix, LabelVector};
use crate::infra::codec::RecordCodec;

/// Which half of a split a record file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Train,
    Test,
}

impl Partition {
    fn suffix(self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Test  => "test",
        }
    }
}

/// All record files for one output directory.
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// Create a store rooted at `dir`, creating it if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn record_path(&self, dataset: &str, part: Partition) -> PathBuf {
        self.dir.join(format!("{dataset}_{}", part.suffix()))
    }

    pub fn encoder_path(&self, dataset: &str) -> PathBuf {
        self.dir.join(format!("{dataset}_encoder.json"))
    }

    /// Serialise and write one partition. Returns the path written.
    pub fn save_record(
        &self,
        dataset:  &str,
        part:     Partition,
        features: &FeatureMatrix,
        labels:   &LabelVector,
    ) -> Result<PathBuf> {
        let path  = self.record_path(dataset, part);
        let bytes = RecordCodec::serialize(features, labels)
            .with_context(|| format!("Cannot encode record for '{}'", path.display()))?;
        write_atomic(&path, &bytes)?;

        tracing::debug!(
            "Wrote {} ({} rows, {} bytes)",
            path.display(),
            features.num_rows(),
            bytes.len()
        );
        Ok(path)
    }

    /// Save the fitted encoder next to the records so later data can
    /// be transformed with the same column layout.
    pub fn save_encoder(&self, dataset: &str, encoder: &FittedEncoder) -> Result<PathBuf> {
        let path = self.encoder_path(dataset);
        let json = serde_json::to_string_pretty(encoder)?;
        write_atomic(&path, json.as_bytes())?;
        tracing::debug!("Saved encoder to '{}'", path.display());
        Ok(path)
    }
}

/// Read and decode any record file.
pub fn read_record(path: &Path) -> Result<DatasetRecord> {
    let bytes = fs::read(path)
        .with_context(|| format!("Cannot read record '{}'", path.display()))?;
    RecordCodec::deserialize(&bytes)
        .with_context(|| format!("Cannot decode record '{}'", path.display()))
}

/// Encode and atomically write a record to an arbitrary path.
pub fn write_record(path: &Path, record: &DatasetRecord) -> Result<()> {
    let bytes = RecordCodec::serialize(&record.features, &record.labels)
        .with_context(|| format!("Cannot encode record for '{}'", path.display()))?;
    write_atomic(path, &bytes)
}

/// Write `bytes` to a temp file beside `path`, then rename it into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Cannot create temporary file in '{}'", dir.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("Cannot write '{}'", path.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("Cannot flush '{}'", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("Cannot move temporary file to '{}'", path.display()))?;
    Ok(())
}
