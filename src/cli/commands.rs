// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands and all their configurable flags.
//
// clap's derive macros generate --help text, error messages for
// missing args and type conversion (string → f64, PathBuf, ...).

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::prepare_use_case::PrepareConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a raw dataset, encode it and write train/test records
    Prepare(PrepareArgs),

    /// Print the shape and label distribution of a record
    Inspect(InspectArgs),

    /// Min-max scale a record's features into [0, 1)
    Normalize(NormalizeArgs),

    /// Write AWS Batch submit-job requests for a training sweep
    Submit(SubmitArgs),

    /// List the datasets `prepare` understands
    List,
}

/// All arguments for the `prepare` command
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Dataset name (see `list`)
    pub dataset: String,

    /// Raw input file(s), in the order the dataset expects
    /// (mnist: images then labels)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory for the records, encoder and summary.csv
    #[arg(long, default_value = "data")]
    pub out_dir: PathBuf,

    /// Fraction of rows held out for testing
    #[arg(long, default_value_t = 0.1)]
    pub test_ratio: f64,

    /// Seed for sampling and splitting; omit for a random split
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rows drawn per class when sampling ctr
    #[arg(long)]
    pub rows_per_class: Option<usize>,
}

/// Convert CLI PrepareArgs into the application-layer PrepareConfig.
impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            dataset:        a.dataset,
            inputs:         a.inputs,
            out_dir:        a.out_dir,
            test_ratio:     a.test_ratio,
            seed:           a.seed,
            rows_per_class: a.rows_per_class,
        }
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Record file(s) to decode
    #[arg(required = true)]
    pub records: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Record to read
    pub input: PathBuf,

    /// Where to write the normalised record
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// JSON sweep file; the built-in sweep is used when omitted
    #[arg(long)]
    pub sweep: Option<PathBuf>,

    /// Directory for the <jobName>.json request files
    #[arg(long, default_value = "jobs")]
    pub out_dir: PathBuf,

    /// Only print the job names
    #[arg(long)]
    pub dry_run: bool,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_prepare_args_into_config() {
        let cli = Cli::try_parse_from([
            "dptree-prep", "prepare", "adult", "adult.data", "--seed", "3", "--test-ratio", "0.25",
        ])
        .unwrap();
        let Commands::Prepare(args) = cli.command else { panic!("expected prepare") };

        let cfg: PrepareConfig = args.into();
        assert_eq!(cfg.dataset, "adult");
        assert_eq!(cfg.inputs, vec![PathBuf::from("adult.data")]);
        assert_eq!(cfg.seed, Some(3));
        assert_eq!(cfg.test_ratio, 0.25);
        assert_eq!(cfg.out_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_prepare_needs_inputs() {
        assert!(Cli::try_parse_from(["dptree-prep", "prepare", "adult"]).is_err());
    }

    #[test]
    fn test_list_and_submit_parse() {
        assert!(Cli::try_parse_from(["dptree-prep", "list"]).is_ok());
        let cli = Cli::try_parse_from(["dptree-prep", "submit", "--dry-run"]).unwrap();
        let Commands::Submit(args) = cli.command else { panic!("expected submit") };
        assert!(args.dry_run);
        assert_eq!(args.out_dir, PathBuf::from("jobs"));
    }
}
