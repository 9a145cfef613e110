// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches bytes on disk or formats owned by
// other programs:
//
//   codec.rs        — Record wire format
//                     protobuf (prost) encoding of a feature
//                     matrix plus labels, as read by the
//                     decision tree trainer.
//
//   record_store.rs — Record and encoder persistence
//                     Names the output files and writes them
//                     atomically (temp file + rename).
//
//   summary.rs      — Summary log
//                     One CSV line per written record.
//
//   batch.rs        — Batch job request documents
//                     serde types for AWS Batch submit-job.

/// Protobuf record serialisation
pub mod codec;

/// Output file naming and atomic writes
pub mod record_store;

/// summary.csv logger
pub mod summary;

/// AWS Batch submit-job request types
pub mod batch;
