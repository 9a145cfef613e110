// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Every validation failure the pipeline can raise on its own.
// The application layer wraps these in anyhow with file paths
// attached; below that boundary everything returns PrepError.
//
// All of these are fail-fast: a batch run stops at the first
// one and the operator reruns after fixing the input.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the encoder, splitter, codec and parsers.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A referenced cell holds the missing-value placeholder
    #[error("missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },

    /// A value is outside the fitted categorical (or label) set
    #[error("unknown category '{value}' in column '{column}'")]
    UnknownCategory { column: String, value: String },

    /// Ragged rows, or row/label counts disagree
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A serialised record could not be decoded or is inconsistent
    #[error("corrupt record: {0}")]
    CorruptRecord(String),

    /// The column spec names a column the table does not have
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// The column spec itself is malformed (overlapping sets, duplicates)
    #[error("invalid column spec: {0}")]
    InvalidSpec(String),

    /// A numeric column holds a non-numeric value
    #[error("non-numeric value '{value}' in numeric column '{column}' at row {row}")]
    NotNumeric {
        column: String,
        row: usize,
        value: String,
    },

    /// Test ratio outside [0, 1)
    #[error("invalid test ratio: {0} (must be in [0, 1))")]
    InvalidRatio(f64),

    /// Raw input could not be parsed into a table
    #[error("parse error in {source_name}: {reason}")]
    Parse { source_name: String, reason: String },

    /// No parser is registered under this name
    #[error("unknown dataset '{0}'")]
    UnknownDataset(String),

    /// A raw input file could not be read
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PrepError {
    /// Shorthand for a parse error
    pub fn parse(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            reason:      reason.into(),
        }
    }

    /// Shorthand for a corrupt-record error
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptRecord(reason.into())
    }

    /// Shorthand for a shape-mismatch error
    pub fn shape(reason: impl Into<String>) -> Self {
        Self::ShapeMismatch(reason.into())
    }
}

/// Result alias used throughout the domain and data layers
pub type PrepResult<T> = std::result::Result<T, PrepError>;
