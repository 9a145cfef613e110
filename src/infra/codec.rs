// ============================================================
// Layer 6 — Record Codec
// ============================================================
// Serialises a DatasetRecord to the byte format the decision
// tree trainer reads, and back.
//
// The format is the protobuf message protoDataset.Dataset:
//
//   message Dataset {
//     uint32 numRows   = 1;
//     uint32 numCols   = 2;
//     repeated float data   = 3 [packed = true];  // row-major
//     repeated int32 labels = 4;                  // packed (proto3)
//     uint32 numLabels = 5;
//   }
//
// We declare the message with prost's derive macros instead of
// generating it from a .proto file, so no build script or
// protoc is needed.
//
// Writing checks shapes (rows vs labels) and recomputes
// numLabels from the labels actually present. Reading checks
// every header field against the payload; any disagreement is
// a CorruptRecord.

use prost::Message;

use crate::domain::error::{PrepError, PrepResult};
use crate::domain::record::{DatasetRecord, FeatureMatrix, LabelVector};

/// Wire representation of a record
#[derive(Clone, PartialEq, Message)]
pub struct DatasetProto {
    #[prost(uint32, tag = "1")]
    pub num_rows: u32,
    #[prost(uint32, tag = "2")]
    pub num_cols: u32,
    #[prost(float, repeated, packed = "true", tag = "3")]
    pub data: Vec<f32>,
    #[prost(int32, repeated, packed = "true", tag = "4")]
    pub labels: Vec<i32>,
    #[prost(uint32, tag = "5")]
    pub num_labels: u32,
}

/// Converts between DatasetRecord and DatasetProto
pub struct RecordCodec;

impl RecordCodec {
    /// Encode a matrix and its labels
    pub fn serialize(features: &FeatureMatrix, labels: &LabelVector) -> PrepResult<Vec<u8>> {
        Ok(Self::to_proto(features, labels)?.encode_to_vec())
    }

    /// Decode bytes produced by `serialize` (or by any other
    /// writer of the same message)
    pub fn deserialize(bytes: &[u8]) -> PrepResult<DatasetRecord> {
        // every field at its default decodes as a 0 x 0 record
        if bytes.is_empty() {
            return Err(PrepError::corrupt("empty record"));
        }
        let proto = DatasetProto::decode(bytes)
            .map_err(|e| PrepError::corrupt(format!("cannot decode protobuf: {e}")))?;
        Self::from_proto(proto)
    }

    pub fn to_proto(features: &FeatureMatrix, labels: &LabelVector) -> PrepResult<DatasetProto> {
        if features.num_rows() != labels.len() {
            return Err(PrepError::shape(format!(
                "{} feature rows but {} labels",
                features.num_rows(),
                labels.len()
            )));
        }

        Ok(DatasetProto {
            num_rows:   to_u32(features.num_rows(), "numRows")?,
            num_cols:   to_u32(features.num_cols(), "numCols")?,
            data:       features.as_slice().to_vec(),
            labels:     labels
                .as_slice()
                .iter()
                .map(|&l| {
                    i32::try_from(l).map_err(|_| PrepError::shape(format!("label {l} exceeds int32")))
                })
                .collect::<PrepResult<Vec<_>>>()?,
            num_labels: to_u32(labels.num_distinct(), "numLabels")?,
        })
    }

    pub fn from_proto(proto: DatasetProto) -> PrepResult<DatasetRecord> {
        let rows = proto.num_rows as usize;
        let cols = proto.num_cols as usize;

        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| PrepError::corrupt(format!("{rows} x {cols} overflows")))?;
        if proto.data.len() != expected {
            return Err(PrepError::corrupt(format!(
                "header declares {rows} x {cols} = {expected} values, payload has {}",
                proto.data.len()
            )));
        }
        if proto.labels.len() != rows {
            return Err(PrepError::corrupt(format!(
                "header declares {rows} rows, payload has {} labels",
                proto.labels.len()
            )));
        }

        let labels = proto
            .labels
            .iter()
            .map(|&l| u32::try_from(l).map_err(|_| PrepError::corrupt(format!("negative label {l}"))))
            .collect::<PrepResult<Vec<_>>>()?;
        let labels = LabelVector::new(labels);

        if labels.num_distinct() != proto.num_labels as usize {
            return Err(PrepError::corrupt(format!(
                "header declares {} distinct labels, payload has {}",
                proto.num_labels,
                labels.num_distinct()
            )));
        }

        let features = FeatureMatrix::from_flat(rows, cols, proto.data)
            .map_err(|e| PrepError::corrupt(e.to_string()))?;
        DatasetRecord::new(features, labels).map_err(|e| PrepError::corrupt(e.to_string()))
    }
}

fn to_u32(v: usize, field: &str) -> PrepResult<u32> {
    u32::try_from(v).map_err(|_| PrepError::shape(format!("{field} = {v} does not fit in uint32")))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic, non-trivial, finite values
    fn record(rows: usize, cols: usize) -> (FeatureMatrix, LabelVector) {
        let data = (0..rows * cols).map(|i| (i as f32) * 0.37 - 5.0).collect();
        let labels = (0..rows).map(|i| (i % 4) as u32).collect();
        (FeatureMatrix::from_flat(rows, cols, data).unwrap(), LabelVector::new(labels))
    }

    #[test]
    fn test_round_trip_shapes() {
        for rows in [0, 1, 50] {
            for cols in [1, 5] {
                let (m, l) = record(rows, cols);
                let bytes = RecordCodec::serialize(&m, &l).unwrap();
                let back = RecordCodec::deserialize(&bytes).unwrap();
                assert_eq!(back.features, m, "{rows} x {cols}");
                assert_eq!(back.labels, l, "{rows} x {cols}");
            }
        }
    }

    #[test]
    fn test_num_labels_recomputed() {
        let m = FeatureMatrix::from_rows(&[vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        let l = LabelVector::new(vec![0, 0, 1]);
        let proto = RecordCodec::to_proto(&m, &l).unwrap();
        assert_eq!(proto.num_labels, 2);
    }

    #[test]
    fn test_row_label_mismatch() {
        let (m, _) = record(3, 2);
        let err = RecordCodec::serialize(&m, &LabelVector::new(vec![0])).unwrap_err();
        assert!(matches!(err, PrepError::ShapeMismatch(_)));
    }

    #[test]
    fn test_payload_length_mismatch_is_corrupt() {
        let (m, l) = record(2, 3);
        let mut proto = RecordCodec::to_proto(&m, &l).unwrap();
        proto.num_cols = 4;
        let err = RecordCodec::deserialize(&proto.encode_to_vec()).unwrap_err();
        assert!(matches!(err, PrepError::CorruptRecord(_)));
    }

    #[test]
    fn test_label_count_mismatch_is_corrupt() {
        let (m, l) = record(2, 3);
        let mut proto = RecordCodec::to_proto(&m, &l).unwrap();
        proto.labels.pop();
        assert!(RecordCodec::deserialize(&proto.encode_to_vec()).is_err());
    }

    #[test]
    fn test_wrong_num_labels_is_corrupt() {
        let (m, l) = record(4, 1);
        let mut proto = RecordCodec::to_proto(&m, &l).unwrap();
        proto.num_labels = 9;
        assert!(RecordCodec::deserialize(&proto.encode_to_vec()).is_err());
    }

    #[test]
    fn test_negative_label_is_corrupt() {
        let (m, l) = record(1, 1);
        let mut proto = RecordCodec::to_proto(&m, &l).unwrap();
        proto.labels[0] = -1;
        assert!(RecordCodec::deserialize(&proto.encode_to_vec()).is_err());
    }

    #[test]
    fn test_garbage_bytes_are_corrupt() {
        // field 1 with wire type 7 (invalid)
        let err = RecordCodec::deserialize(&[0x0f, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, PrepError::CorruptRecord(_)));
    }

    #[test]
    fn test_empty_bytes_are_corrupt() {
        let err = RecordCodec::deserialize(&[]).unwrap_err();
        assert!(matches!(err, PrepError::CorruptRecord(_)));
    }

    #[test]
    fn test_truncated_bytes_are_corrupt() {
        let (m, l) = record(10, 5);
        let bytes = RecordCodec::serialize(&m, &l).unwrap();
        assert!(RecordCodec::deserialize(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn test_wire_layout_matches_trainer_schema() {
        let m = FeatureMatrix::from_rows(&[vec![1.0]]).unwrap();
        let l = LabelVector::new(vec![0]);
        let bytes = RecordCodec::serialize(&m, &l).unwrap();
        // numRows = 1 (tag 1 varint), numCols = 1 (tag 2 varint),
        // data packed (tag 3, len 4, 1.0f32 LE), labels packed (tag 4,
        // len 1, 0), numLabels = 1 (tag 5 varint)
        let expected = [
            0x08, 0x01, 0x10, 0x01, 0x1a, 0x04, 0x00, 0x00, 0x80, 0x3f, 0x22, 0x01, 0x00, 0x28,
            0x01,
        ];
        assert_eq!(bytes, expected);
    }
}
