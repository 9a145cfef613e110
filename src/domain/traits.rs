// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// DatasetParser is the one seam every raw dataset plugs into.
// A parser knows:
//   - which raw inputs it needs (most need one file, MNIST two)
//   - how to turn those raw bytes into a Table
//   - which columns of that Table are numeric / categorical /
//     label
//
// Parsing is a pure function of the input bytes. The only
// exception is row sampling (the CTR dataset is class-balanced
// by random sampling), which gets its own hook and is handed
// the caller's RNG.
//
// The application layer only ever sees `dyn DatasetParser`,
// looked up by name in the registry (data/registry.rs).

use rand::RngCore;

use crate::domain::columns::ColumnSpec;
use crate::domain::error::PrepResult;
use crate::domain::table::Table;

pub trait DatasetParser {
    /// Registry key, e.g. "adult"
    fn name(&self) -> &'static str;

    /// Names of the raw inputs, in the order `parse` expects them
    fn input_names(&self) -> &'static [&'static str] {
        &["data"]
    }

    /// Raw bytes → Table. `inputs` has one entry per `input_names()`.
    fn parse(&self, inputs: &[Vec<u8>]) -> PrepResult<Table>;

    /// How the parsed table maps onto the encoder
    fn column_spec(&self, table: &Table) -> PrepResult<ColumnSpec>;

    /// Optional row sampling applied after missing-value filtering
    fn sample_rows(&self, table: Table, _rng: &mut dyn RngCore) -> PrepResult<Table> {
        Ok(table)
    }
}
