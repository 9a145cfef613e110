// ============================================================
// Layer 4 — Click-Through-Rate Dataset
// ============================================================
// The raw CTR log is tens of millions of impressions with very
// few clicks. Training on it as-is would give a trainer that
// always predicts "no click", so we draw the same number of
// rows from each class (click = 0 and click = 1), uniformly at
// random without replacement.
//
// Only a subset of the log's columns is used; the rest (ids,
// site/app identifiers with millions of distinct values) are
// simply not referenced by the column spec.

use rand::seq::index;
use rand::RngCore;

use crate::data::datasets::{ColumnLayout, TabularParser};
use crate::data::loader::DelimitedFormat;
use crate::domain::columns::ColumnSpec;
use crate::domain::error::{PrepError, PrepResult};
use crate::domain::table::{Cell, Table};
use crate::domain::traits::DatasetParser;

pub const DEFAULT_ROWS_PER_CLASS: usize = 550_000;

pub struct CtrParser {
    inner:          TabularParser,
    rows_per_class: usize,
}

impl CtrParser {
    pub fn new(rows_per_class: usize) -> Self {
        let spec = ColumnSpec::new(
            [
                "hour", "banner_pos", "C1", "C14", "C15", "C16", "C17", "C18", "C19", "C20", "C21",
            ],
            ["site_category", "app_category", "device_type", "device_conn_type"],
            "click",
        );
        let inner = TabularParser::new("ctr", DelimitedFormat::csv(), ColumnLayout::Explicit(spec));
        Self { inner, rows_per_class }
    }
}

impl Default for CtrParser {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_PER_CLASS)
    }
}

impl DatasetParser for CtrParser {
    fn name(&self) -> &'static str {
        "ctr"
    }

    fn parse(&self, inputs: &[Vec<u8>]) -> PrepResult<Table> {
        self.inner.parse(inputs)
    }

    fn column_spec(&self, table: &Table) -> PrepResult<ColumnSpec> {
        self.inner.column_spec(table)
    }

    fn sample_rows(&self, table: Table, rng: &mut dyn RngCore) -> PrepResult<Table> {
        let labels = table.column("click")?;

        let mut classes: Vec<&Cell> = labels.iter().collect();
        classes.sort();
        classes.dedup();

        let mut keep = Vec::with_capacity(classes.len() * self.rows_per_class);
        for class in classes {
            let members: Vec<usize> = labels
                .iter()
                .enumerate()
                .filter(|(_, l)| *l == class)
                .map(|(i, _)| i)
                .collect();

            if members.len() < self.rows_per_class {
                return Err(PrepError::parse(
                    "ctr",
                    format!(
                        "click={class} has {} rows, cannot sample {}",
                        members.len(),
                        self.rows_per_class
                    ),
                ));
            }

            let mut picked: Vec<usize> = index::sample(&mut *rng, members.len(), self.rows_per_class)
                .into_iter()
                .map(|k| members[k])
                .collect();
            picked.sort_unstable();
            keep.extend(picked);
        }

        tracing::info!(
            "Sampled {} of {} rows ({} per class)",
            keep.len(),
            table.num_rows(),
            self.rows_per_class
        );
        Ok(table.select_rows(&keep))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const HEADER: &str = "id,click,hour,C1,banner_pos,site_id,site_category,app_category,device_type,device_conn_type,C14,C15,C16,C17,C18,C19,C20,C21";

    fn raw(clicks: &[u8]) -> Vec<u8> {
        let mut out = format!("{HEADER}\n");
        for (i, c) in clicks.iter().enumerate() {
            out.push_str(&format!(
                "{i},{c},14102100,1005,0,1fbe01fe,28905ebd,07d7df22,1,0,15706,320,50,1722,0,35,-1,79\n"
            ));
        }
        out.into_bytes()
    }

    #[test]
    fn test_balanced_sample() {
        let p = CtrParser::new(2);
        let table = p.parse(&[raw(&[0, 0, 0, 0, 1, 1, 1])]).unwrap();
        let sampled = p.sample_rows(table, &mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(sampled.num_rows(), 4);
        let clicks = sampled.column("click").unwrap();
        assert_eq!(clicks.iter().filter(|c| **c == Cell::from(0.0)).count(), 2);
        assert_eq!(clicks.iter().filter(|c| **c == Cell::from(1.0)).count(), 2);
    }

    #[test]
    fn test_too_few_rows_in_a_class() {
        let p = CtrParser::new(3);
        let table = p.parse(&[raw(&[0, 0, 0, 1])]).unwrap();
        let err = p.sample_rows(table, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(err.to_string().contains("click=1"));
    }

    #[test]
    fn test_spec_width() {
        let p = CtrParser::new(1);
        let table = p.parse(&[raw(&[0, 1])]).unwrap();
        let spec = p.column_spec(&table).unwrap();
        assert_eq!(spec.numeric.len(), 11);
        assert_eq!(spec.categorical.len(), 4);
    }
}
