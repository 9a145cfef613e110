// ============================================================
// Layer 2 — SubmitUseCase
// ============================================================
// Expands a parameter sweep into one AWS Batch submit-job
// request per combination of
//
//   dataset × training fraction × budget function × leaf privacy fraction
//
// and writes each request to <out_dir>/<jobName>.json. Each job
// is an array job: the container reads START_INDEX plus its
// array index to pick which repetition it runs.
//
// The sweep is either the built-in default or a JSON file with
// the same field names as SweepConfig (missing fields take the
// default).

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::infra::batch::{
    float_token, float_value, read_json, write_requests, ArrayProperties, ContainerOverrides,
    JobTimeout, KeyValuePair, RetryStrategy, SubmitJobRequest,
};

// ─── Sweep Configuration ─────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub datasets:               Vec<String>,
    pub training_fractions:     Vec<f64>,
    pub leaf_privacy_fractions: Vec<f64>,
    pub budget_fns:             Vec<String>,
    /// Where the trainer writes its results
    pub out_directory:          String,
    pub start_index:            u32,
    pub array_size:             u32,
    pub job_definition:         String,
    pub job_queue:              String,
    pub command:                Vec<String>,
    pub vcpus:                  u32,
    /// MiB; an m4.xlarge has 16 GB over 4 vCPUs
    pub memory:                 u32,
    pub attempts:               u32,
    pub attempt_duration_secs:  u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            datasets:               vec!["kddcup".into(), "mnist60k".into(), "ctr".into()],
            training_fractions:     vec![1.0],
            leaf_privacy_fractions: (4..=8).map(|k| 2f64.powi(-k)).collect(),
            budget_fns:             vec!["decay".into()],
            out_directory:          "s3://private-decision-trees-kaiwen/icml-supp/".into(),
            start_index:            0,
            array_size:             100,
            job_definition:         "PrivateDT:3".into(),
            job_queue:              "m4xlarge-256".into(),
            command:                vec!["/user/run.sh".into()],
            vcpus:                  1,
            memory:                 3800,
            attempts:               1,
            attempt_duration_secs:  10_000_000,
        }
    }
}

impl SweepConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        read_json(path)
    }

    /// Number of jobs the sweep expands to
    pub fn num_jobs(&self) -> usize {
        self.datasets.len()
            * self.training_fractions.len()
            * self.budget_fns.len()
            * self.leaf_privacy_fractions.len()
    }
}

pub fn job_name(dataset: &str, training_fraction: f64, budget_fn: &str, leaf_fraction: f64) -> String {
    format!(
        "privateDT-dataset_{}-trainingFraction_{}-budgetFn_{}-leafPrivacyFraction_{}",
        dataset,
        float_token(training_fraction),
        budget_fn,
        float_token(leaf_fraction)
    )
}

/// Expand the sweep, datasets outermost, leaf fractions innermost
pub fn plan_jobs(sweep: &SweepConfig) -> Vec<SubmitJobRequest> {
    let mut jobs = Vec::with_capacity(sweep.num_jobs());

    for dataset in &sweep.datasets {
        for &training_fraction in &sweep.training_fractions {
            for budget_fn in &sweep.budget_fns {
                for &leaf_fraction in &sweep.leaf_privacy_fractions {
                    let environment = vec![
                        KeyValuePair::new("OUT_DIRECTORY", sweep.out_directory.as_str()),
                        KeyValuePair::new("TRAINING_FRACTION", float_value(training_fraction)),
                        KeyValuePair::new("LEAF_PRIVACY_FRACTION", float_value(leaf_fraction)),
                        KeyValuePair::new("DATASET", dataset.as_str()),
                        KeyValuePair::new("BUDGET_FN", budget_fn.as_str()),
                        KeyValuePair::new("START_INDEX", sweep.start_index.to_string()),
                    ];

                    jobs.push(SubmitJobRequest {
                        job_name:            job_name(dataset, training_fraction, budget_fn, leaf_fraction),
                        job_definition:      sweep.job_definition.clone(),
                        job_queue:           sweep.job_queue.clone(),
                        retry_strategy:      RetryStrategy { attempts: sweep.attempts },
                        timeout:             JobTimeout {
                            attempt_duration_seconds: sweep.attempt_duration_secs,
                        },
                        array_properties:    ArrayProperties { size: sweep.array_size },
                        container_overrides: ContainerOverrides {
                            command: sweep.command.clone(),
                            vcpus:   sweep.vcpus,
                            memory:  sweep.memory,
                            environment,
                        },
                    });
                }
            }
        }
    }

    jobs
}

// ─── SubmitUseCase ───────────────────────────────────────────────────────────
pub struct SubmitUseCase {
    sweep:   SweepConfig,
    out_dir: PathBuf,
}

impl SubmitUseCase {
    pub fn new(sweep: SweepConfig, out_dir: impl Into<PathBuf>) -> Self {
        Self { sweep, out_dir: out_dir.into() }
    }

    /// Write one request file per job. Returns the paths written.
    pub fn execute(&self) -> Result<Vec<PathBuf>> {
        let jobs = plan_jobs(&self.sweep);
        if jobs.is_empty() {
            bail!("sweep expands to no jobs; every parameter list needs at least one value");
        }

        let written = write_requests(&self.out_dir, &jobs)?;
        tracing::info!("Wrote {} job requests to '{}'", written.len(), self.out_dir.display());
        Ok(written)
    }
}
