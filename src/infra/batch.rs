// ============================================================
// Layer 6 — Batch Job Specs
// ============================================================
// Request documents for AWS Batch `submit-job`.
//
// Field names serialise in camelCase so each file can be passed
// straight to the CLI:
//
//   aws batch submit-job --cli-input-json file://<jobName>.json
//
// Only the subset of the request the training jobs use is
// modelled. Nothing here talks to the network; requests are
// written to <out_dir>/<jobName>.json.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::infra::record_store::write_atomic;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitJobRequest {
    pub job_name:            String,
    pub job_definition:      String,
    pub job_queue:           String,
    pub retry_strategy:      RetryStrategy,
    pub timeout:             JobTimeout,
    pub array_properties:    ArrayProperties,
    pub container_overrides: ContainerOverrides,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryStrategy {
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTimeout {
    pub attempt_duration_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayProperties {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerOverrides {
    pub command:     Vec<String>,
    pub vcpus:       u32,
    /// MiB
    pub memory:      u32,
    pub environment: Vec<KeyValuePair>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub name:  String,
    pub value: String,
}

impl KeyValuePair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Load a JSON sweep (or any other JSON config) from disk
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Malformed JSON in '{}'", path.display()))
}

/// Write one `<jobName>.json` per request. Returns the paths written.
pub fn write_requests(out_dir: &Path, jobs: &[SubmitJobRequest]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Cannot create '{}'", out_dir.display()))?;

    let mut written = Vec::with_capacity(jobs.len());
    for job in jobs {
        let path = out_dir.join(format!("{}.json", job.job_name));
        let json = serde_json::to_string_pretty(job)?;
        write_atomic(&path, json.as_bytes())?;
        tracing::debug!("Planned job {}", job.job_name);
        written.push(path);
    }
    Ok(written)
}

/// Render a float the way the training container parses it:
/// always with a decimal point ("1.0", "0.0625"), never in
/// exponent notation.
pub fn float_value(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// A float made safe for job names, which may not contain '.'
pub fn float_token(v: f64) -> String {
    float_value(v).replace('.', "o")
}
