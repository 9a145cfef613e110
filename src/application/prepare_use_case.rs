// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Turns one raw dataset into train/test records for the trainer:
//
//   Step 1: Check the input file count
//   Step 2: Read and parse into a Table     (Layer 4 - data)
//   Step 3: Drop rows with missing values   (Layer 4 - data)
//   Step 4: Dataset-specific row sampling   (Layer 4 - data)
//   Step 5: Encode features and labels      (Layer 4 - data)
//   Step 6: Split train/test                (Layer 4 - data)
//   Step 7: Write records + encoder + log   (Layer 6 - infra)

use anyhow::{bail, Context, Result};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    datasets::ctr::CtrParser,
    encoder::{encode, FittedEncoder},
    loader::read_inputs,
    preprocessor::Preprocessor,
    registry::DatasetRegistry,
    splitter::{split_train_test, split_train_test_with_rng},
};
use crate::domain::record::DatasetRecord;
use crate::infra::{
    record_store::{Partition, RecordStore},
    summary::{RecordSummary, SummaryLogger},
};

// ─── Prepare Configuration ───────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    /// Registry name of the dataset, e.g. "adult"
    pub dataset:        String,
    /// Raw input files, in the order the parser lists its inputs
    pub inputs:         Vec<PathBuf>,
    pub out_dir:        PathBuf,
    /// Fraction of rows held out for testing, in [0, 1)
    pub test_ratio:     f64,
    /// Fixed seed for sampling and splitting; random when absent
    pub seed:           Option<u64>,
    /// Rows drawn per click class for ctr
    pub rows_per_class: Option<usize>,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            dataset:        String::new(),
            inputs:         Vec::new(),
            out_dir:        PathBuf::from("data"),
            test_ratio:     0.1,
            seed:           None,
            rows_per_class: None,
        }
    }
}

/// What a successful run wrote
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareReport {
    pub train:         RecordSummary,
    pub test:          RecordSummary,
    pub dropped_rows:  usize,
    pub files_written: Vec<PathBuf>,
}

// ─── PrepareUseCase ──────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config:   PrepareConfig,
    registry: DatasetRegistry,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        let mut registry = DatasetRegistry::builtin();
        if let Some(n) = config.rows_per_class {
            registry.register(Box::new(CtrParser::new(n)));
        }
        Self { config, registry }
    }

    pub fn execute(&self) -> Result<PrepareReport> {
        let cfg = &self.config;

        // Fail before reading possibly very large inputs
        if !(0.0..1.0).contains(&cfg.test_ratio) {
            bail!("test ratio must be in [0, 1), got {}", cfg.test_ratio);
        }

        let mut rng: Box<dyn RngCore> = match cfg.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None       => Box::new(StdRng::from_entropy()),
        };

        // ── Step 1: Check inputs ─────────────────────────────────────────────
        let parser   = self.registry.get(&cfg.dataset)?;
        let expected = parser.input_names();
        if cfg.inputs.len() != expected.len() {
            bail!(
                "dataset '{}' needs {} input file(s) ({}), got {}",
                cfg.dataset,
                expected.len(),
                expected.join(", "),
                cfg.inputs.len()
            );
        }

        // ── Step 2: Parse ────────────────────────────────────────────────────
        // The raw bytes are released as soon as the table exists
        let table = {
            let raw = read_inputs(&cfg.inputs)?;
            parser
                .parse(&raw)
                .with_context(|| format!("Cannot parse dataset '{}'", cfg.dataset))?
        };
        let spec = parser.column_spec(&table)?;
        tracing::info!(
            "Parsed {}: {} rows, {} columns ({} numeric, {} categorical)",
            cfg.dataset,
            table.num_rows(),
            table.num_columns(),
            spec.numeric.len(),
            spec.categorical.len()
        );

        // ── Step 3: Drop incomplete rows ─────────────────────────────────────
        let referenced: Vec<&str> = spec.referenced().collect();
        let (table, dropped) = Preprocessor::new().drop_incomplete_rows(table, &referenced)?;
        if dropped > 0 {
            tracing::info!("Dropped {} rows with missing values", dropped);
        }

        // ── Step 4: Sample ───────────────────────────────────────────────────
        let table = parser.sample_rows(table, rng.as_mut())?;

        // ── Step 5: Encode ───────────────────────────────────────────────────
        let (features, labels, encoder) = encode(&table, &spec)?;
        drop(table);
        tracing::info!(
            "Encoded {} rows into {} features, {} classes",
            features.num_rows(),
            features.num_cols(),
            encoder.num_classes()
        );
        log_mappings(&encoder);

        // ── Step 6: Split ────────────────────────────────────────────────────
        let split = match cfg.seed {
            Some(_) => split_train_test_with_rng(&features, &labels, cfg.test_ratio, rng.as_mut())?,
            None    => split_train_test(&features, &labels, cfg.test_ratio)?,
        };
        drop((features, labels));
        tracing::info!(
            "Split: {} train, {} test",
            split.train.num_rows(),
            split.test.num_rows()
        );

        // ── Step 7: Write ────────────────────────────────────────────────────
        let store   = RecordStore::new(&cfg.out_dir)?;
        let summary = SummaryLogger::new(&cfg.out_dir)?;

        let mut files_written = Vec::with_capacity(3);
        let train = self.write(&store, &summary, Partition::Train, &split.train, &mut files_written)?;
        let test  = self.write(&store, &summary, Partition::Test, &split.test, &mut files_written)?;
        files_written.push(store.save_encoder(&cfg.dataset, &encoder)?);

        Ok(PrepareReport { train, test, dropped_rows: dropped, files_written })
    }

    fn write(
        &self,
        store:   &RecordStore,
        summary: &SummaryLogger,
        part:    Partition,
        record:  &DatasetRecord,
        written: &mut Vec<PathBuf>,
    ) -> Result<RecordSummary> {
        let path = store.save_record(&self.config.dataset, part, &record.features, &record.labels)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let row = RecordSummary::of(name, record);
        summary.log(&row)?;

        written.push(path);
        Ok(row)
    }
}

/// Debug-level dump of the learned label and category mappings
fn log_mappings(encoder: &FittedEncoder) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    let classes: Vec<String> = encoder.classes().iter().map(ToString::to_string).collect();
    tracing::debug!("Label ids: {}", classes.join(", "));
    for idx in encoder.categories() {
        tracing::debug!("{}: {} categories", idx.column, idx.len());
    }
}
