// ============================================================
// Layer 4 — Image Datasets
// ============================================================
//   mnist     raw pixels from the IDX image + label files;
//             every pixel is a numeric feature (0..255)
//   features  output of a pretrained image model, exported as
//             a CSV with a header and a "label" column; every
//             other column is a numeric feature
//
// Running the image model itself happens elsewhere. The
// `normalize` command rescales its features into [0, 1) once
// they are stored as a record.

use crate::data::datasets::{ColumnLayout, TabularParser};
use crate::data::idx;
use crate::data::loader::DelimitedFormat;
use crate::domain::columns::ColumnSpec;
use crate::domain::error::{PrepError, PrepResult};
use crate::domain::table::Table;
use crate::domain::traits::DatasetParser;

pub struct MnistParser;

impl DatasetParser for MnistParser {
    fn name(&self) -> &'static str {
        "mnist"
    }

    fn input_names(&self) -> &'static [&'static str] {
        &["images", "labels"]
    }

    fn parse(&self, inputs: &[Vec<u8>]) -> PrepResult<Table> {
        let [images, labels] = inputs else {
            return Err(PrepError::parse(
                "mnist",
                format!("expected images and labels inputs, got {}", inputs.len()),
            ));
        };
        let images = idx::parse_images(images, "mnist images")?;
        let labels = idx::parse_labels(labels, "mnist labels")?;
        tracing::debug!(
            "MNIST: {} images of {}x{}",
            images.count,
            images.rows,
            images.cols
        );
        idx::images_to_table(&images, &labels)
    }

    fn column_spec(&self, table: &Table) -> PrepResult<ColumnSpec> {
        ColumnLayout::AllNumeric { label: "label".to_string() }.resolve(table)
    }
}

pub fn features() -> TabularParser {
    TabularParser::new(
        "features",
        DelimitedFormat::csv(),
        ColumnLayout::AllNumeric { label: "label".to_string() },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::encoder::encode;
    use crate::data::idx::tests::{image_bytes, label_bytes};

    #[test]
    fn test_mnist_parse_and_encode() {
        let p = MnistParser;
        let inputs = vec![image_bytes(3, 2, 2, &[0; 12]), label_bytes(&[7, 1, 7])];
        let table = p.parse(&inputs).unwrap();
        let spec = p.column_spec(&table).unwrap();
        assert_eq!(spec.numeric.len(), 4);

        let (m, l, _) = encode(&table, &spec).unwrap();
        assert_eq!((m.num_rows(), m.num_cols()), (3, 4));
        assert_eq!(l.as_slice(), &[1, 0, 1]);
    }

    #[test]
    fn test_mnist_needs_two_inputs() {
        let err = MnistParser.parse(&[label_bytes(&[1])]).unwrap_err();
        assert!(matches!(err, PrepError::Parse { .. }));
    }

    #[test]
    fn test_features_csv() {
        let p = features();
        let raw = b"f0,f1,label\n0.25,3.5,cat\n1.5,0.0,dog\n".to_vec();
        let table = p.parse(&[raw]).unwrap();
        let spec = p.column_spec(&table).unwrap();
        let (m, l, _) = encode(&table, &spec).unwrap();
        assert_eq!(m.row(0), &[0.25, 3.5]);
        assert_eq!(l.as_slice(), &[0, 1]);
    }
}
