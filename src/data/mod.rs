// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw dataset bytes and an encoded,
// partitioned dataset.
//
// The pipeline flows in this order:
//
//   raw file bytes
//       │
//       ▼
//   DatasetParser     → loader.rs / idx.rs turn bytes into a Table
//       │
//       ▼
//   Preprocessor      → drops rows with missing values
//       │
//       ▼
//   sample_rows       → optional per-dataset sampling (ctr)
//       │
//       ▼
//   encoder           → FeatureMatrix + LabelVector + FittedEncoder
//       │
//       ▼
//   splitter          → train / test partitions
//
// Serialisation of the result lives in infra/.

/// Delimited text → Table
pub mod loader;

/// MNIST IDX binary files → Table
pub mod idx;

/// Missing-value filtering and min-max normalisation
pub mod preprocessor;

/// Numeric passthrough + one-hot + label encoding
pub mod encoder;

/// Random train/test partitioning
pub mod splitter;

/// Per-dataset parser definitions
pub mod datasets;

/// Name → parser lookup
pub mod registry;
