// ============================================================
// Layer 4 — Delimited Text Loader
// ============================================================
// Turns the raw bytes of a delimited text file (CSV, TSV,
// semicolon-separated, ...) into a Table. read_inputs loads
// those bytes from disk.
//
// Every public tabular dataset we handle is a variation on:
//
//   [header line]            optional, gives column names
//   [junk lines]             optional, skipped after header
//   v1<sep>v2<sep>...<sep>vN one record per line
//
// Per-token handling, in order:
//   1. trim surrounding whitespace  ("  Private" → "Private")
//   2. strip one pair of quotes     ("\"married\"" → "married")
//   3. missing marker → Cell::Missing
//   4. float parse    → Cell::Number, otherwise Cell::Text
//
// Blank lines are skipped. A line with the wrong number of
// fields is an error; we never guess how to realign it.
//
// Quoted fields containing the delimiter are not supported;
// none of the datasets in the registry need them.

use std::{fs, path::PathBuf};

use crate::domain::error::{PrepError, PrepResult};
use crate::domain::table::{Cell, Table};

/// Read every raw input file into memory, in order
pub fn read_inputs(paths: &[PathBuf]) -> PrepResult<Vec<Vec<u8>>> {
    paths
        .iter()
        .map(|p| -> PrepResult<Vec<u8>> {
            let bytes = fs::read(p).map_err(|source| PrepError::Read { path: p.clone(), source })?;
            tracing::debug!("Read {} bytes from '{}'", bytes.len(), p.display());
            Ok(bytes)
        })
        .collect()
}

/// Where column names come from
#[derive(Debug, Clone)]
pub enum Header {
    /// First line holds the names
    FirstLine,
    /// No header line, names supplied by the parser
    Names(Vec<String>),
}

/// Describes one delimited text layout
#[derive(Debug, Clone)]
pub struct DelimitedFormat {
    pub delimiter:      char,
    pub header:         Header,
    /// Data lines skipped right after the header
    pub skip_rows:      usize,
    pub missing_marker: Option<String>,
    pub quote:          Option<char>,
}

impl DelimitedFormat {
    /// Comma separated, header line, `?` as missing, `"` quotes
    pub fn csv() -> Self {
        Self {
            delimiter:      ',',
            header:         Header::FirstLine,
            skip_rows:      0,
            missing_marker: Some("?".to_string()),
            quote:          Some('"'),
        }
    }

    /// Comma separated with fixed column names and no header line
    pub fn headerless<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: Header::Names(names.into_iter().map(Into::into).collect()),
            ..Self::csv()
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }
}

/// Loads delimited text into a Table according to a DelimitedFormat
pub struct DelimitedLoader {
    format: DelimitedFormat,
}

impl DelimitedLoader {
    pub fn new(format: DelimitedFormat) -> Self {
        Self { format }
    }

    /// Parse `bytes`. `source_name` only appears in error messages.
    pub fn load(&self, bytes: &[u8], source_name: &str) -> PrepResult<Table> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| PrepError::parse(source_name, format!("not valid UTF-8: {e}")))?;

        // Keep 1-based line numbers for error messages
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l))
            .filter(|(_, l)| !l.trim().is_empty());

        let names: Vec<String> = match &self.format.header {
            Header::Names(names) => names.clone(),
            Header::FirstLine => match lines.next() {
                Some((_, line)) => self.split(line).into_iter().map(str::to_string).collect(),
                None => return Err(PrepError::parse(source_name, "missing header line")),
            },
        };

        let marker = self.format.missing_marker.as_deref();
        let mut rows = Vec::new();

        for (line_no, line) in lines.skip(self.format.skip_rows) {
            let fields = self.split(line);
            if fields.len() != names.len() {
                return Err(PrepError::parse(
                    source_name,
                    format!(
                        "line {line_no} has {} fields, expected {}",
                        fields.len(),
                        names.len()
                    ),
                ));
            }
            rows.push(fields.into_iter().map(|f| Cell::parse(f, marker)).collect());
        }

        tracing::debug!(
            "Loaded {} rows x {} columns from {}",
            rows.len(),
            names.len(),
            source_name
        );

        Table::from_rows(&names, rows)
    }

    /// Split one line into trimmed, unquoted tokens
    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        line.split(self.format.delimiter)
            .map(|f| {
                let f = f.trim();
                match self.format.quote {
                    Some(q) if f.len() >= 2 && f.starts_with(q) && f.ends_with(q) => {
                        &f[q.len_utf8()..f.len() - q.len_utf8()]
                    }
                    _ => f,
                }
            })
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_quotes() {
        let raw = b"\"age\";\"job\";\"y\"\n58;\"management\";\"no\"\n44;\"technician\";\"yes\"\n";
        let fmt = DelimitedFormat::csv().with_delimiter(';');
        let t = DelimitedLoader::new(fmt).load(raw, "bank").unwrap();

        assert_eq!(t.num_rows(), 2);
        assert_eq!(t.column_names().collect::<Vec<_>>(), vec!["age", "job", "y"]);
        assert_eq!(t.column("age").unwrap()[0], Cell::Number(58.0));
        assert_eq!(t.column("job").unwrap()[1], Cell::from("technician"));
    }

    #[test]
    fn test_headerless_trims_whitespace() {
        // adult.data separates fields with ", "
        let raw = b"39, State-gov, <=50K\n50, ?, >50K\n\n";
        let fmt = DelimitedFormat::headerless(["age", "workclass", "label"]);
        let t = DelimitedLoader::new(fmt).load(raw, "adult").unwrap();

        assert_eq!(t.num_rows(), 2);
        assert_eq!(t.column("workclass").unwrap()[0], Cell::from("State-gov"));
        assert!(t.column("workclass").unwrap()[1].is_missing());
        assert_eq!(t.column("label").unwrap()[1], Cell::from(">50K"));
    }

    #[test]
    fn test_skip_rows_after_header() {
        let raw = b"X1,Y\nLIMIT_BAL,default payment\n20000,1\n";
        let fmt = DelimitedFormat::csv().with_skip_rows(1);
        let t = DelimitedLoader::new(fmt).load(raw, "creditcard").unwrap();
        assert_eq!(t.num_rows(), 1);
        assert_eq!(t.column("X1").unwrap()[0], Cell::Number(20000.0));
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let raw = b"a,b\n1,2\n3\n";
        let err = DelimitedLoader::new(DelimitedFormat::csv()).load(raw, "t").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_empty_input_without_header() {
        let err = DelimitedLoader::new(DelimitedFormat::csv()).load(b"", "t").unwrap_err();
        assert!(matches!(err, PrepError::Parse { .. }));
    }

    #[test]
    fn test_read_inputs_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"first").unwrap();
        fs::write(&b, b"second").unwrap();

        let raw = read_inputs(&[a, b]).unwrap();
        assert_eq!(raw, vec![b"first".to_vec(), b"second".to_vec()]);
    }

    #[test]
    fn test_read_inputs_names_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_inputs(&[dir.path().join("adult.data")]).unwrap_err();
        assert!(matches!(err, PrepError::Read { .. }));
        assert!(err.to_string().contains("adult.data"));
    }

    #[test]
    fn test_tab_delimited() {
        let raw = b"74\t85\t123\t1\n";
        let fmt = DelimitedFormat::headerless(["b", "g", "r", "class"]).with_delimiter('\t');
        let t = DelimitedLoader::new(fmt).load(raw, "skin").unwrap();
        assert_eq!(t.column("class").unwrap()[0], Cell::Number(1.0));
    }
}
