// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Uses `clap` to parse
// command line arguments and prints results; all work is
// delegated to Layer 2 (application).
//
// Commands:
//   1. `prepare`   — raw dataset → <name>_train / <name>_test
//   2. `inspect`   — describe one or more record files
//   3. `normalize` — min-max scale a record's features
//   4. `submit`    — write batch job requests for a sweep
//   5. `list`      — show the known datasets

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs, NormalizeArgs, PrepareArgs, SubmitArgs};

use crate::application::{
    inspect_use_case::InspectUseCase,
    normalize_use_case::NormalizeUseCase,
    prepare_use_case::PrepareUseCase,
    submit_use_case::{plan_jobs, SubmitUseCase, SweepConfig},
};
use crate::data::registry::DatasetRegistry;

#[derive(Parser, Debug)]
#[command(
    name = "dptree-prep",
    version,
    about = "Prepare tabular and image datasets for the private decision tree trainer."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args)   => run_prepare(args),
            Commands::Inspect(args)   => run_inspect(args),
            Commands::Normalize(args) => run_normalize(args),
            Commands::Submit(args)    => run_submit(args),
            Commands::List            => run_list(),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    tracing::info!("Preparing '{}' into '{}'", args.dataset, args.out_dir.display());

    let report = PrepareUseCase::new(args.into()).execute()?;

    for s in [&report.train, &report.test] {
        println!("{:<24} {:>9} rows  {:>6} cols  {:>4} labels", s.name, s.rows, s.cols, s.labels);
    }
    if report.dropped_rows > 0 {
        println!("({} rows with missing values dropped)", report.dropped_rows);
    }
    for path in &report.files_written {
        tracing::info!("Wrote '{}'", path.display());
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    for path in args.records {
        let r = InspectUseCase::new(path).execute()?;

        println!("{}", r.path.display());
        println!("  rows:   {}", r.rows);
        println!("  cols:   {}", r.cols);
        println!("  labels: {}", r.num_labels());
        if let Some((lo, hi)) = r.value_range {
            println!("  values: [{lo}, {hi}]");
        }
        for (label, count) in &r.label_counts {
            let share = *count as f64 / r.rows as f64 * 100.0;
            println!("    {label:>4}: {count:>9} ({share:.1}%)");
        }
    }
    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    let s = NormalizeUseCase::new(args.input, args.output).execute()?;
    println!("Wrote {} ({} rows, {} cols)", s.name, s.rows, s.cols);
    Ok(())
}

fn run_submit(args: SubmitArgs) -> Result<()> {
    let sweep = match &args.sweep {
        Some(path) => SweepConfig::from_json_file(path)?,
        None       => SweepConfig::default(),
    };

    if args.dry_run {
        for job in plan_jobs(&sweep) {
            println!("{}", job.job_name);
        }
        return Ok(());
    }

    let written = SubmitUseCase::new(sweep, &args.out_dir).execute()?;
    println!("Wrote {} job requests to {}", written.len(), args.out_dir.display());
    println!("Submit each with: aws batch submit-job --cli-input-json file://<file>");
    Ok(())
}

fn run_list() -> Result<()> {
    let registry = DatasetRegistry::builtin();
    let mut parsers: Vec<_> = registry.iter().collect();
    parsers.sort_by_key(|p| p.name());

    for p in parsers {
        println!("{:<12} {}", p.name(), p.input_names().join(" "));
    }
    Ok(())
}
