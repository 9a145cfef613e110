// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that describe a dataset at each stage:
//
//   Table            raw cells, as parsed from the source file
//   ColumnSpec       which columns are numeric / categorical / label
//   FeatureMatrix    encoded f32 features
//   LabelVector      encoded dense class ids
//   DatasetRecord    features + labels, the on-disk unit
//
// Rules for this layer:
//   - NO file I/O
//   - NO wire-format code (that lives in infra/codec.rs)
//   - Only structs, enums, errors and traits

/// Raw cells and named columns
pub mod table;

/// Numeric / categorical / label column selection
pub mod columns;

/// Encoded matrix, labels and the record that pairs them
pub mod record;

/// Typed validation errors
pub mod error;

/// The DatasetParser abstraction
pub mod traits;
