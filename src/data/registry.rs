// ============================================================
// Layer 4 — Dataset Registry
// ============================================================
// Maps a dataset name (as typed on the command line) to its
// DatasetParser. The application layer never names a concrete
// parser type; it asks the registry.

use crate::data::datasets::ctr::CtrParser;
use crate::data::datasets::images::{self, MnistParser};
use crate::data::datasets::uci;
use crate::domain::error::{PrepError, PrepResult};
use crate::domain::traits::DatasetParser;

pub struct DatasetRegistry {
    parsers: Vec<Box<dyn DatasetParser>>,
}

impl DatasetRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self { parsers: Vec::new() }
    }

    /// Every dataset this tool knows how to prepare
    pub fn builtin() -> Self {
        let mut r = Self::new();
        r.register(Box::new(uci::adult()));
        r.register(Box::new(uci::bank()));
        r.register(Box::new(uci::creditcard()));
        r.register(Box::new(CtrParser::default()));
        r.register(Box::new(uci::dermatology()));
        r.register(Box::new(uci::diabetes()));
        r.register(Box::new(images::features()));
        r.register(Box::new(uci::kddcup()));
        r.register(Box::new(MnistParser));
        r.register(Box::new(uci::nursery()));
        r.register(Box::new(uci::skin()));
        r.register(Box::new(uci::wbc()));
        r
    }

    /// Add or replace a parser under its own name
    pub fn register(&mut self, parser: Box<dyn DatasetParser>) {
        self.parsers.retain(|p| p.name() != parser.name());
        self.parsers.push(parser);
    }

    pub fn get(&self, name: &str) -> PrepResult<&dyn DatasetParser> {
        self.parsers
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
            .ok_or_else(|| PrepError::UnknownDataset(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn DatasetParser> {
        self.parsers.iter().map(|p| p.as_ref())
    }
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::datasets::ctr::CtrParser;

    #[test]
    fn test_builtin_names() {
        let r = DatasetRegistry::builtin();
        let names: Vec<&str> = r.iter().map(|p| p.name()).collect();
        for expected in ["adult", "bank", "creditcard", "ctr", "dermatology", "diabetes",
                         "features", "kddcup", "mnist", "nursery", "skin", "wbc"] {
            assert!(names.contains(&expected), "{expected} not registered");
        }
    }

    #[test]
    fn test_lookup() {
        let r = DatasetRegistry::builtin();
        assert_eq!(r.get("mnist").unwrap().input_names(), &["images", "labels"]);
        assert_eq!(r.get("adult").unwrap().input_names(), &["data"]);
        assert!(matches!(r.get("iris"), Err(PrepError::UnknownDataset(_))));
    }

    #[test]
    fn test_register_replaces() {
        let mut r = DatasetRegistry::builtin();
        let before = r.iter().count();
        r.register(Box::new(CtrParser::new(10)));
        assert_eq!(r.iter().count(), before);
    }
}
