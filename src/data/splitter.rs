// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Randomly partitions an encoded dataset into:
//   - Test set:  the first floor(test_ratio * n) rows of a
//                random permutation
//   - Train set: everything else
//
// Every row lands in exactly one partition and keeps its label.
//
// test_ratio must be in [0, 1). A ratio of 0 (or a dataset too
// small for one test row) gives an empty test set; an empty
// dataset gives two empty partitions. Both keep the matrix
// width so they still serialise with the right shape.
//
// We shuffle row INDICES with Fisher-Yates
// (rand::seq::SliceRandom) and then gather rows, rather than
// shuffling the matrix in place.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::error::{PrepError, PrepResult};
use crate::domain::record::{DatasetRecord, FeatureMatrix, LabelVector};

/// The two partitions produced by a split
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub train: DatasetRecord,
    pub test:  DatasetRecord,
}

/// Number of rows that go to the test partition
pub fn test_size(num_rows: usize, test_ratio: f64) -> usize {
    (test_ratio * num_rows as f64).floor() as usize
}

/// Split with a fresh thread-local RNG
pub fn split_train_test(
    features:   &FeatureMatrix,
    labels:     &LabelVector,
    test_ratio: f64,
) -> PrepResult<TrainTestSplit> {
    split_train_test_with_rng(features, labels, test_ratio, &mut rand::thread_rng())
}

/// Split using the caller's RNG (seed it for reproducible splits)
pub fn split_train_test_with_rng<R: Rng + ?Sized>(
    features:   &FeatureMatrix,
    labels:     &LabelVector,
    test_ratio: f64,
    rng:        &mut R,
) -> PrepResult<TrainTestSplit> {
    if !(0.0..1.0).contains(&test_ratio) {
        return Err(PrepError::InvalidRatio(test_ratio));
    }
    if features.num_rows() != labels.len() {
        return Err(PrepError::shape(format!(
            "{} feature rows but {} labels",
            features.num_rows(),
            labels.len()
        )));
    }

    let total = features.num_rows();
    let mut order: Vec<usize> = (0..total).collect();
    order.shuffle(rng);

    let split_at = test_size(total, test_ratio).min(total);
    let (test_idx, train_idx) = order.split_at(split_at);

    let test  = DatasetRecord::new(features.select_rows(test_idx), labels.select(test_idx))?;
    let train = DatasetRecord::new(features.select_rows(train_idx), labels.select(train_idx))?;

    tracing::debug!(
        "Dataset split: {} train, {} test (test ratio {})",
        train.num_rows(),
        test.num_rows(),
        test_ratio
    );

    Ok(TrainTestSplit { train, test })
}
