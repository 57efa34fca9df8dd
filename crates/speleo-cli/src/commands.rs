use anyhow::Result;
use speleo_cli::pipeline::{self, NormalizeOutcome};
use speleo_cli::types::CheckResult;
use speleo_ingest::IngestOptions;
use speleo_model::catalog;
use tracing::info;

use crate::cli::{CheckArgs, NormalizeArgs, OutputArg};
use crate::summary::{print_check_summary, print_normalize_summary, print_vocabularies};

/// Process exit codes.
pub const EXIT_ACCEPT: i32 = 0;
pub const EXIT_REVIEW: i32 = 1;
pub const EXIT_FAILURE: i32 = 2;

pub fn run_check(args: &CheckArgs) -> Result<i32> {
    let options = IngestOptions::default().with_skip_rows(args.skip_rows);
    let result = pipeline::run_check(&args.workbook_dir, options)?;
    if let Some(path) = &args.report {
        pipeline::write_report(path, &result)?;
        info!(report = %path.display(), "report written");
    }
    match args.output {
        OutputArg::Text => print_check_summary(&result),
        OutputArg::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(exit_code(&result))
}

fn exit_code(result: &CheckResult) -> i32 {
    if result.accepted() {
        EXIT_ACCEPT
    } else {
        EXIT_REVIEW
    }
}

pub fn run_normalize(args: &NormalizeArgs) -> Result<i32> {
    let options = IngestOptions::default().with_skip_rows(args.skip_rows);
    let outcome = pipeline::run_normalize(
        &args.workbook_dir,
        args.output_dir.as_deref(),
        args.force,
        options,
    )?;
    match outcome {
        NormalizeOutcome::Written(result) => {
            print_normalize_summary(&result);
            Ok(EXIT_ACCEPT)
        }
        NormalizeOutcome::Refused { warnings } => {
            eprintln!(
                "{warnings} warning/s were detected; nothing written. Run `speleo check` for details or pass --force."
            );
            Ok(EXIT_REVIEW)
        }
    }
}

pub fn run_vocabularies() -> Result<i32> {
    print_vocabularies(&catalog());
    Ok(EXIT_ACCEPT)
}
