// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Each use case runs one CLI command end to end by calling the
// data (Layer 4) and infra (Layer 6) layers in order.
//
// Rules for this layer:
//   - No parsing or encoding logic here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Use cases take plain config structs, never clap types.

// Raw dataset → train/test records
pub mod prepare_use_case;

// Record → shape and label report
pub mod inspect_use_case;

// Record → min-max normalised record
pub mod normalize_use_case;

// Parameter sweep → batch job request files
pub mod submit_use_case;
